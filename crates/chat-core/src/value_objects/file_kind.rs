//! Attachment kind derived from a stored file URL

use serde::{Deserialize, Serialize};

/// How a message attachment is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
}

impl FileKind {
    /// Classify a file URL by its extension.
    ///
    /// `pdf` is a PDF; anything else that is present is treated as an image,
    /// since uploads only accept those two families.
    pub fn from_url(url: Option<&str>) -> Option<Self> {
        let url = url.filter(|u| !u.is_empty())?;
        if extension(url).eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else {
            Some(Self::Image)
        }
    }

    /// Classify an upload by its MIME type; `None` when it is neither family.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence == "application/pdf" {
            Some(Self::Pdf)
        } else if essence.starts_with("image/") {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// Text after the last `.`, ignoring any query string or fragment
fn extension(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    last_segment.rsplit_once('.').map_or("", |(_, ext)| ext)
}
