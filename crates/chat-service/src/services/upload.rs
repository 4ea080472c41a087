//! Upload service
//!
//! Two named upload routes, each with its own file families and limits.
//! Accepted files land in the configured directory and are served back as
//! static files under the public URL prefix.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chat_common::{AppError, StorageConfig};
use chat_core::{FileKind, Profile};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// 4 MB, the limit both routes share
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Named upload endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRoute {
    /// Server icon: images only
    ServerImage,
    /// Message attachment: image or PDF
    MessageFile,
}

impl FileRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerImage => "serverImage",
            Self::MessageFile => "messageFile",
        }
    }

    pub fn allowed_kinds(&self) -> &'static [FileKind] {
        match self {
            Self::ServerImage => &[FileKind::Image],
            Self::MessageFile => &[FileKind::Image, FileKind::Pdf],
        }
    }

    pub fn max_file_size(&self) -> usize {
        MAX_UPLOAD_BYTES
    }

    pub fn max_file_count(&self) -> usize {
        1
    }

    /// Check one batch of files against this route's limits
    pub fn validate(&self, files: &[IncomingFile]) -> ServiceResult<()> {
        if files.is_empty() {
            return Err(ServiceError::missing("File"));
        }
        if files.len() > self.max_file_count() {
            return Err(ServiceError::validation(format!(
                "{} accepts at most {} file",
                self.as_str(),
                self.max_file_count()
            )));
        }
        for file in files {
            if file.bytes.len() > self.max_file_size() {
                return Err(AppError::PayloadTooLarge(format!(
                    "{} is larger than 4MB",
                    file.file_name
                ))
                .into());
            }
            let kind = FileKind::from_content_type(&file.content_type);
            let allowed = kind.is_some_and(|k| self.allowed_kinds().contains(&k));
            if !allowed || stored_extension(&file.content_type).is_none() {
                return Err(ServiceError::validation(format!(
                    "{} does not accept {}",
                    self.as_str(),
                    file.content_type
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for FileRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileRoute {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serverImage" => Ok(Self::ServerImage),
            "messageFile" => Ok(Self::MessageFile),
            other => Err(ServiceError::not_found("Upload route", other)),
        }
    }
}

/// A file as received from the client
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where a stored file can be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub url: String,
    /// Original file name
    pub name: String,
    pub size: usize,
    pub content_type: String,
}

/// Local directory plus the URL prefix it is served under
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_url: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    /// Public URL of a stored file name
    pub fn url_for(&self, stored_name: &str) -> String {
        format!("{}/{stored_name}", self.public_url)
    }
}

impl From<&StorageConfig> for UploadStore {
    fn from(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_url)
    }
}

/// Upload service
pub struct UploadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UploadService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store the files posted to `route`
    #[instrument(skip(self, profile, files), fields(profile_id = %profile.id, count = files.len()))]
    pub async fn upload(
        &self,
        profile: &Profile,
        route: FileRoute,
        files: Vec<IncomingFile>,
    ) -> ServiceResult<Vec<UploadedFile>> {
        route.validate(&files)?;

        let store = self.ctx.upload_store();
        tokio::fs::create_dir_all(store.dir())
            .await
            .map_err(|e| AppError::Storage(format!("cannot create upload dir: {e}")))?;

        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            let extension = stored_extension(&file.content_type).ok_or_else(|| {
                ServiceError::validation(format!("{} does not accept {}", route, file.content_type))
            })?;
            let stored_name = format!("{}.{extension}", uuid::Uuid::new_v4());
            let path = store.dir().join(&stored_name);
            if let Err(e) = tokio::fs::write(&path, &file.bytes).await {
                warn!(path = %path.display(), error = %e, "Failed to write upload");
                return Err(AppError::Storage(format!("cannot store {}", file.file_name)).into());
            }

            info!(
                route = %route,
                uploaded_by = %profile.user_id,
                size = file.bytes.len(),
                "Upload complete"
            );
            stored.push(UploadedFile {
                url: store.url_for(&stored_name),
                name: file.file_name,
                size: file.bytes.len(),
                content_type: file.content_type,
            });
        }
        Ok(stored)
    }
}

/// Extension for the stored copy, taken from the MIME type alone.
///
/// The client's file name never reaches the disk: the static file server picks
/// the response type from this extension.
fn stored_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "application/pdf" => Some("pdf"),
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{claims, memory_context};
    use crate::services::ProfileService;

    fn file(name: &str, content_type: &str, size: usize) -> IncomingFile {
        IncomingFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn test_route_names() {
        assert_eq!("serverImage".parse::<FileRoute>().unwrap(), FileRoute::ServerImage);
        assert_eq!("messageFile".parse::<FileRoute>().unwrap(), FileRoute::MessageFile);
        assert_eq!("avatar".parse::<FileRoute>().unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_server_image_accepts_images_only() {
        let route = FileRoute::ServerImage;
        assert!(route.validate(&[file("a.png", "image/png", 10)]).is_ok());
        let err = route.validate(&[file("a.pdf", "application/pdf", 10)]).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_message_file_accepts_pdf() {
        let route = FileRoute::MessageFile;
        assert!(route.validate(&[file("doc.pdf", "application/pdf", 10)]).is_ok());
        assert!(route.validate(&[file("cat.webp", "image/webp", 10)]).is_ok());
        assert!(route.validate(&[file("a.zip", "application/zip", 10)]).is_err());
    }

    #[test]
    fn test_size_and_count_limits() {
        let route = FileRoute::MessageFile;
        let big = route
            .validate(&[file("big.png", "image/png", MAX_UPLOAD_BYTES + 1)])
            .unwrap_err();
        assert_eq!(big.status_code(), 413);
        assert!(route.validate(&[file("edge.png", "image/png", MAX_UPLOAD_BYTES)]).is_ok());

        let two = [file("a.png", "image/png", 1), file("b.png", "image/png", 1)];
        assert_eq!(route.validate(&two).unwrap_err().status_code(), 400);
        assert_eq!(route.validate(&[]).unwrap_err().status_code(), 400);
    }

    #[test]
    fn test_stored_extension_comes_from_mime_type() {
        assert_eq!(stored_extension("image/png"), Some("png"));
        assert_eq!(stored_extension("image/jpeg"), Some("jpg"));
        assert_eq!(stored_extension("Application/PDF; charset=binary"), Some("pdf"));
        assert_eq!(stored_extension("image/svg+xml"), None);
        assert_eq!(stored_extension("text/html"), None);
    }

    #[test]
    fn test_scriptable_images_are_rejected() {
        let route = FileRoute::MessageFile;
        let err = route.validate(&[file("logo.svg", "image/svg+xml", 10)]).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_html_name_is_stored_under_image_extension() {
        let (ctx, _) = memory_context();
        let profile = ProfileService::new(&ctx).initial(&claims("ada")).await.unwrap();

        let stored = UploadService::new(&ctx)
            .upload(
                &profile,
                FileRoute::ServerImage,
                vec![file("evil.html", "image/png", 16)],
            )
            .await
            .unwrap();

        let url = &stored[0].url;
        assert!(url.ends_with(".png"), "{url}");
        assert!(!url.contains("html"));
        assert_eq!(stored[0].name, "evil.html");
        let stored_name = url.rsplit('/').next().unwrap();
        assert!(ctx.upload_store().dir().join(stored_name).exists());
    }

    #[test]
    fn test_store_urls() {
        let store = UploadStore::new("/tmp/up", "/uploads/");
        assert_eq!(store.url_for("x.png"), "/uploads/x.png");
    }
}
