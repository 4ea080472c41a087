use chat_core::entities::Channel;
use chat_core::error::DomainError;
use chat_core::value_objects::Snowflake;

use crate::models::ChannelModel;

impl TryFrom<ChannelModel> for Channel {
    type Error = DomainError;

    fn try_from(model: ChannelModel) -> Result<Self, Self::Error> {
        Ok(Channel {
            id: Snowflake::new(model.id),
            name: model.name,
            channel_type: model.channel_type.parse()?,
            profile_id: Snowflake::new(model.profile_id),
            server_id: Snowflake::new(model.server_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
