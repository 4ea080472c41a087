//! View models for the channel list and the chat feed
//!
//! These carry every decision the client would otherwise make while
//! rendering: which icon to show, which actions to offer, how to render an
//! attachment, where edits and deletes are sent.

use chat_core::{
    Channel, ChannelPolicy, ChannelType, DomainError, FileKind, Member, MemberRole,
    MessagePolicy, MessageWithMember, Snowflake,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Channel list item
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelIcon {
    MessagesSquare,
    Mic,
    Video,
}

impl From<ChannelType> for ChannelIcon {
    fn from(t: ChannelType) -> Self {
        match t {
            ChannelType::Text => Self::MessagesSquare,
            ChannelType::Audio => Self::Mic,
            ChannelType::Video => Self::Video,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelListItemView {
    pub id: Snowflake,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub icon: ChannelIcon,
    pub href: String,
    /// The channel currently open
    pub active: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    /// `general` shows a lock instead of actions
    pub locked: bool,
}

impl ChannelListItemView {
    /// `role` is `None` when the viewer is not a member; no actions then.
    pub fn build(
        channel: &Channel,
        server_id: Snowflake,
        role: Option<MemberRole>,
        selected: Option<Snowflake>,
    ) -> Self {
        let manageable = role.is_some_and(|r| ChannelPolicy::for_role(r).can_manage(channel));
        Self {
            id: channel.id,
            name: channel.name.clone(),
            channel_type: channel.channel_type,
            icon: channel.channel_type.into(),
            href: format!("/servers/{server_id}/channels/{}", channel.id),
            active: selected == Some(channel.id),
            can_edit: manageable,
            can_delete: manageable,
            locked: channel.is_general(),
        }
    }
}

// ============================================================================
// Chat item
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleIcon {
    ShieldCheck,
    ShieldAlert,
}

impl RoleIcon {
    pub fn for_role(role: MemberRole) -> Option<Self> {
        match role {
            MemberRole::Guest => None,
            MemberRole::Moderator => Some(Self::ShieldCheck),
            MemberRole::Admin => Some(Self::ShieldAlert),
        }
    }
}

/// Piece of message text: plain, or a link to open in a new tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ContentSegment {
    Text(String),
    Link(String),
}

/// Split text into plain runs and `http(s)://` links
pub fn linkify(text: &str) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(offset) = next_scheme(&text[cursor..]) {
        let start = cursor + offset;
        let end = text[start..]
            .find(char::is_whitespace)
            .map_or(text.len(), |i| start + i);
        let link = trim_link(&text[start..end]);
        let link_end = start + link.len();

        let scheme_len = if link.starts_with("https://") { 8 } else { 7 };
        if link.len() > scheme_len {
            if text_start < start {
                segments.push(ContentSegment::Text(text[text_start..start].to_string()));
            }
            segments.push(ContentSegment::Link(link.to_string()));
            text_start = link_end;
        }
        cursor = link_end.max(start + 1);
    }

    if text_start < text.len() {
        segments.push(ContentSegment::Text(text[text_start..].to_string()));
    }
    segments
}

fn next_scheme(s: &str) -> Option<usize> {
    match (s.find("http://"), s.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

// Sentence punctuation right after a link is not part of it
fn trim_link(link: &str) -> &str {
    let balanced = link.contains('(');
    link.trim_end_matches(|c: char| {
        matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '"' | '\'') || (c == ')' && !balanced)
    })
}

/// Where the chat item sends edits and deletes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketTarget {
    pub url: String,
    pub server_id: Snowflake,
    pub channel_id: Snowflake,
}

impl SocketTarget {
    pub fn new(url: impl Into<String>, server_id: Snowflake, channel_id: Snowflake) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            server_id,
            channel_id,
        }
    }

    /// `{url}/{message_id}?server_id=..&channel_id=..`
    pub fn message_url(&self, message_id: Snowflake) -> String {
        format!(
            "{}/{message_id}?channel_id={}&server_id={}",
            self.url, self.channel_id, self.server_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatAuthorView {
    pub member_id: Snowflake,
    pub name: String,
    pub image_url: String,
    pub role: MemberRole,
    pub role_icon: Option<RoleIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatItemView {
    pub id: Snowflake,
    pub content: String,
    pub segments: Vec<ContentSegment>,
    pub author: ChatAuthorView,
    pub timestamp: DateTime<Utc>,
    pub file_url: Option<String>,
    pub file_kind: Option<FileKind>,
    /// Text is only rendered for messages without an attachment
    pub show_text: bool,
    pub deleted: bool,
    /// Deleted content renders in italics
    pub italic: bool,
    pub is_updated: bool,
    /// The `(edited)` label
    pub show_edited_label: bool,
    pub is_admin: bool,
    pub is_moderator: bool,
    pub is_owner: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    /// Direct conversation with the author; absent on your own messages
    pub member_href: Option<String>,
    pub edit_url: String,
    pub delete_url: String,
}

impl ChatItemView {
    pub fn build(item: &MessageWithMember, current: &Member, socket: &SocketTarget) -> Self {
        let message = &item.message;
        let author = &item.author;
        let policy = MessagePolicy::new(current, message);
        let is_updated = message.is_updated();
        let url = socket.message_url(message.id);

        Self {
            id: message.id,
            content: message.content.clone(),
            segments: linkify(&message.content),
            author: ChatAuthorView {
                member_id: author.member.id,
                name: author.profile.name.clone(),
                image_url: author.profile.image_url.clone(),
                role: author.member.role,
                role_icon: RoleIcon::for_role(author.member.role),
            },
            timestamp: message.created_at,
            file_url: message.file_url.clone(),
            file_kind: message.file_kind(),
            show_text: message.file_url.is_none(),
            deleted: message.deleted,
            italic: message.deleted,
            is_updated,
            show_edited_label: is_updated && !message.deleted,
            is_admin: policy.is_admin,
            is_moderator: policy.is_moderator,
            is_owner: policy.is_owner,
            can_edit: policy.can_edit(message),
            can_delete: policy.can_delete(message),
            member_href: (!policy.is_owner).then(|| {
                format!("/servers/{}/conversations/{}", socket.server_id, author.member.id)
            }),
            edit_url: url.clone(),
            delete_url: url,
        }
    }

    /// Editing state for this item, if the viewer may edit it
    pub fn begin_edit(&self) -> Option<EditState> {
        self.can_edit.then(|| EditState::editing(self.content.clone()))
    }
}

// ============================================================================
// Inline edit
// ============================================================================

/// Inline edit form of one chat item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    #[default]
    Viewing,
    Editing { draft: String },
}

impl EditState {
    /// Open the form filled with `content`
    pub fn editing(content: impl Into<String>) -> Self {
        Self::Editing {
            draft: content.into(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Viewing -> Editing; the draft starts from the current content
    pub fn edit(&mut self, content: &str) {
        if !self.is_editing() {
            *self = Self::editing(content);
        }
    }

    pub fn input(&mut self, text: impl Into<String>) {
        if let Self::Editing { draft } = self {
            *draft = text.into();
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }

    /// Escape closes the form; other keys are ignored
    pub fn key_down(&mut self, key: &str) {
        if key == "Escape" || key == "Esc" {
            self.cancel();
        }
    }

    /// Take the draft for sending and return to viewing.
    ///
    /// An empty draft keeps the form open.
    pub fn submit(&mut self) -> Result<String, DomainError> {
        match self {
            Self::Viewing => Err(DomainError::ValidationError("Not editing".to_string())),
            Self::Editing { draft } if draft.is_empty() => {
                Err(DomainError::ValidationError("Content missing".to_string()))
            }
            Self::Editing { draft } => {
                let content = std::mem::take(draft);
                *self = Self::Viewing;
                Ok(content)
            }
        }
    }
}
