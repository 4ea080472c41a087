//! Domain events - emitted when state changes so subscribers can refresh
//!
//! Every event names the topic it is published on, scoped to its server.
//! Messages go out on the `chat:{channel_id}:messages` keys instead, carrying
//! the full message.

use serde::{Deserialize, Serialize};

use crate::entities::MemberRole;
use crate::value_objects::Snowflake;

/// Which of the two per-channel message topics an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEventKind {
    /// A new message was posted
    Added,
    /// An existing message was edited or deleted
    Updated,
}

impl MessageEventKind {
    pub fn key(self, channel_id: Snowflake) -> String {
        match self {
            Self::Added => format!("chat:{channel_id}:messages"),
            Self::Updated => format!("chat:{channel_id}:messages:update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Server Events
    // =========================================================================
    ServerUpdated { server_id: Snowflake },
    ServerDeleted { server_id: Snowflake },

    // =========================================================================
    // Member Events
    // =========================================================================
    MemberJoined {
        server_id: Snowflake,
        member_id: Snowflake,
        profile_id: Snowflake,
    },
    MemberLeft {
        server_id: Snowflake,
        profile_id: Snowflake,
    },
    MemberRoleChanged {
        server_id: Snowflake,
        member_id: Snowflake,
        role: MemberRole,
    },
    MemberKicked {
        server_id: Snowflake,
        member_id: Snowflake,
        profile_id: Snowflake,
    },

    // =========================================================================
    // Channel Events
    // =========================================================================
    ChannelCreated {
        server_id: Snowflake,
        channel_id: Snowflake,
    },
    ChannelUpdated {
        server_id: Snowflake,
        channel_id: Snowflake,
    },
    ChannelDeleted {
        server_id: Snowflake,
        channel_id: Snowflake,
    },
}

impl DomainEvent {
    /// Topic carrying every event of one server
    pub fn server_topic(server_id: Snowflake) -> String {
        format!("server:{server_id}")
    }

    /// Topic subscribers listen on for this event
    pub fn topic(&self) -> String {
        match self {
            Self::ServerUpdated { server_id }
            | Self::ServerDeleted { server_id }
            | Self::MemberJoined { server_id, .. }
            | Self::MemberLeft { server_id, .. }
            | Self::MemberRoleChanged { server_id, .. }
            | Self::MemberKicked { server_id, .. }
            | Self::ChannelCreated { server_id, .. }
            | Self::ChannelUpdated { server_id, .. }
            | Self::ChannelDeleted { server_id, .. } => Self::server_topic(*server_id),
        }
    }

    /// Whether this event takes away `profile_id`'s access to the server, or
    /// to `channel_id` when one is given.
    pub fn revokes_access(&self, profile_id: Snowflake, channel_id: Option<Snowflake>) -> bool {
        match self {
            Self::ServerDeleted { .. } => true,
            Self::MemberLeft { profile_id: gone, .. }
            | Self::MemberKicked { profile_id: gone, .. } => *gone == profile_id,
            Self::ChannelDeleted { channel_id: deleted, .. } => Some(*deleted) == channel_id,
            _ => false,
        }
    }
}
