use chat_core::entities::{Member, MemberWithProfile, Profile};
use chat_core::error::DomainError;
use chat_core::value_objects::Snowflake;

use crate::models::{MemberModel, MemberWithProfileModel};

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        Ok(Member {
            id: Snowflake::new(model.id),
            role: model.role.parse()?,
            profile_id: Snowflake::new(model.profile_id),
            server_id: Snowflake::new(model.server_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<MemberWithProfileModel> for MemberWithProfile {
    type Error = DomainError;

    fn try_from(model: MemberWithProfileModel) -> Result<Self, Self::Error> {
        let profile = Profile {
            id: Snowflake::new(model.profile_id),
            user_id: model.profile_user_id,
            name: model.profile_name,
            image_url: model.profile_image_url,
            email: model.profile_email,
            created_at: model.profile_created_at,
            updated_at: model.profile_updated_at,
        };
        let member = Member {
            id: Snowflake::new(model.id),
            role: model.role.parse()?,
            profile_id: profile.id,
            server_id: Snowflake::new(model.server_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        };
        Ok(MemberWithProfile { member, profile })
    }
}
