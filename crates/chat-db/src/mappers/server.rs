use chat_core::entities::Server;
use chat_core::value_objects::Snowflake;

use crate::models::ServerModel;

impl From<ServerModel> for Server {
    fn from(model: ServerModel) -> Self {
        Server {
            id: Snowflake::new(model.id),
            name: model.name,
            image_url: model.image_url,
            invite_code: model.invite_code,
            profile_id: Snowflake::new(model.profile_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
