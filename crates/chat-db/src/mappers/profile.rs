use chat_core::entities::Profile;
use chat_core::value_objects::Snowflake;

use crate::models::ProfileModel;

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: Snowflake::new(model.id),
            user_id: model.user_id,
            name: model.name,
            image_url: model.image_url,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
