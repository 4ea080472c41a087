//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chat_core::{Channel, Member, MemberWithProfile, MessageWithMember, Profile, Server};

use super::responses::{
    ChannelResponse, MemberResponse, MessageResponse, ProfileResponse, ServerResponse,
};

impl From<&Profile> for ProfileResponse {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id.clone(),
            name: p.name.clone(),
            image_url: p.image_url.clone(),
            email: p.email.clone(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self::from(&p)
    }
}

impl From<&Server> for ServerResponse {
    fn from(s: &Server) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            image_url: s.image_url.clone(),
            invite_code: s.invite_code.clone(),
            profile_id: s.profile_id,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<Server> for ServerResponse {
    fn from(s: Server) -> Self {
        Self::from(&s)
    }
}

impl From<&Channel> for ChannelResponse {
    fn from(c: &Channel) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            channel_type: c.channel_type,
            profile_id: c.profile_id,
            server_id: c.server_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<Channel> for ChannelResponse {
    fn from(c: Channel) -> Self {
        Self::from(&c)
    }
}

impl From<&Member> for MemberResponse {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id,
            role: m.role,
            profile_id: m.profile_id,
            server_id: m.server_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
            profile: None,
        }
    }
}

impl From<&MemberWithProfile> for MemberResponse {
    fn from(m: &MemberWithProfile) -> Self {
        Self {
            profile: Some(ProfileResponse::from(&m.profile)),
            ..Self::from(&m.member)
        }
    }
}

impl From<MemberWithProfile> for MemberResponse {
    fn from(m: MemberWithProfile) -> Self {
        Self::from(&m)
    }
}

impl From<&MessageWithMember> for MessageResponse {
    fn from(m: &MessageWithMember) -> Self {
        let msg = &m.message;
        Self {
            id: msg.id,
            content: msg.content.clone(),
            file_url: msg.file_url.clone(),
            file_kind: msg.file_kind(),
            member_id: msg.member_id,
            channel_id: msg.channel_id,
            deleted: msg.deleted,
            created_at: msg.created_at,
            updated_at: msg.updated_at,
            member: MemberResponse::from(&m.author),
        }
    }
}

impl From<MessageWithMember> for MessageResponse {
    fn from(m: MessageWithMember) -> Self {
        Self::from(&m)
    }
}
