//! Channel entity - a text, audio or video room inside a server

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Name of the channel every server starts with
pub const GENERAL_CHANNEL_NAME: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelType {
    #[default]
    Text,
    Audio,
    Video,
}

impl ChannelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(Self::Text),
            "AUDIO" => Ok(Self::Audio),
            "VIDEO" => Ok(Self::Video),
            other => Err(DomainError::ValidationError(format!("unknown channel type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub channel_type: ChannelType,
    /// Profile that created the channel
    pub profile_id: Snowflake,
    pub server_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    pub fn new(
        id: Snowflake,
        name: impl Into<String>,
        channel_type: ChannelType,
        profile_id: Snowflake,
        server_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            channel_type,
            profile_id,
            server_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The default text channel created alongside a server
    pub fn general(id: Snowflake, profile_id: Snowflake, server_id: Snowflake) -> Self {
        Self::new(id, GENERAL_CHANNEL_NAME, ChannelType::Text, profile_id, server_id)
    }

    #[inline]
    pub fn is_general(&self) -> bool {
        self.name == GENERAL_CHANNEL_NAME
    }

    pub fn update(&mut self, name: impl Into<String>, channel_type: ChannelType) {
        self.name = name.into();
        self.channel_type = channel_type;
        self.updated_at = Utc::now();
    }

    /// Path the web client uses for this channel
    pub fn path(&self) -> String {
        format!("/servers/{}/channels/{}", self.server_id, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_channel() {
        let c = Channel::general(Snowflake::new(5), Snowflake::new(1), Snowflake::new(2));
        assert!(c.is_general());
        assert_eq!(c.channel_type, ChannelType::Text);
        assert_eq!(c.path(), "/servers/2/channels/5");
    }

    #[test]
    fn test_channel_type_parse() {
        assert_eq!("VIDEO".parse::<ChannelType>().unwrap(), ChannelType::Video);
        assert!("video".parse::<ChannelType>().is_err());
    }

    #[test]
    fn test_update() {
        let mut c = Channel::new(Snowflake::new(5), "talk", ChannelType::Text, Snowflake::new(1), Snowflake::new(2));
        c.update("voice", ChannelType::Audio);
        assert_eq!(c.name, "voice");
        assert_eq!(c.channel_type, ChannelType::Audio);
        assert!(!c.is_general());
    }
}
