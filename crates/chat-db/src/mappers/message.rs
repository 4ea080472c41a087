use chat_core::entities::{Member, MemberWithProfile, Message, MessageWithMember, Profile};
use chat_core::error::DomainError;
use chat_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageWithMemberModel};

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            content: model.content,
            file_url: model.file_url,
            member_id: Snowflake::new(model.member_id),
            channel_id: Snowflake::new(model.channel_id),
            deleted: model.deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TryFrom<MessageWithMemberModel> for MessageWithMember {
    type Error = DomainError;

    fn try_from(model: MessageWithMemberModel) -> Result<Self, Self::Error> {
        let profile = Profile {
            id: Snowflake::new(model.member_profile_id),
            user_id: model.profile_user_id,
            name: model.profile_name,
            image_url: model.profile_image_url,
            email: model.profile_email,
            created_at: model.profile_created_at,
            updated_at: model.profile_updated_at,
        };
        let member = Member {
            id: Snowflake::new(model.member_id),
            role: model.member_role.parse()?,
            profile_id: profile.id,
            server_id: Snowflake::new(model.member_server_id),
            created_at: model.member_created_at,
            updated_at: model.member_updated_at,
        };
        let message = Message {
            id: Snowflake::new(model.id),
            content: model.content,
            file_url: model.file_url,
            member_id: member.id,
            channel_id: Snowflake::new(model.channel_id),
            deleted: model.deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        };
        Ok(MessageWithMember {
            message,
            author: MemberWithProfile { member, profile },
        })
    }
}
