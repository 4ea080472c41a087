//! Channel service
//!
//! Channel CRUD and the channel list view. Admins and moderators manage
//! channels; `general` cannot be renamed or deleted, and no other channel can
//! take its name.

use chat_core::{Channel, ChannelPolicy, DomainEvent, Profile, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ChannelListItemView, ChannelResponse, CreateChannelRequest, UpdateChannelRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, profile, request), fields(profile_id = %profile.id))]
    pub async fn create_channel(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        let (_, member) = PermissionService::new(self.ctx)
            .require_member(server_id, profile.id)
            .await?;
        let name = request.name.trim();
        ChannelPolicy::for_member(&member).ensure_can_create(name)?;

        let channel = Channel::new(
            self.ctx.generate_id(),
            name,
            request.channel_type,
            profile.id,
            server_id,
        );
        self.ctx.channel_repo().create(&channel).await?;

        self.publish(&DomainEvent::ChannelCreated {
            server_id,
            channel_id: channel.id,
        });
        info!(channel_id = %channel.id, "Channel created");
        Ok(ChannelResponse::from(channel))
    }

    /// Channels of a server in creation order
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn list_channels(
        &self,
        profile: &Profile,
        server_id: Snowflake,
    ) -> ServiceResult<Vec<ChannelResponse>> {
        PermissionService::new(self.ctx)
            .require_member(server_id, profile.id)
            .await?;
        let channels = self.ctx.channel_repo().find_by_server(server_id).await?;
        Ok(channels.iter().map(ChannelResponse::from).collect())
    }

    #[instrument(skip(self, profile, request), fields(profile_id = %profile.id))]
    pub async fn update_channel(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        let access = PermissionService::new(self.ctx);
        let (_, member) = access.require_member(server_id, profile.id).await?;
        let mut channel = access.require_channel_in(channel_id, server_id).await?;

        let name = request.name.trim();
        ChannelPolicy::for_member(&member).ensure_can_update(&channel, name)?;
        channel.update(name, request.channel_type);
        self.ctx.channel_repo().update(&channel).await?;

        self.publish(&DomainEvent::ChannelUpdated {
            server_id,
            channel_id,
        });
        info!(%channel_id, "Channel updated");
        Ok(ChannelResponse::from(channel))
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn delete_channel(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<ChannelResponse> {
        let access = PermissionService::new(self.ctx);
        let (_, member) = access.require_member(server_id, profile.id).await?;
        let channel = access.require_channel_in(channel_id, server_id).await?;

        ChannelPolicy::for_member(&member).ensure_can_delete(&channel)?;
        self.ctx.channel_repo().delete(channel_id).await?;

        self.publish(&DomainEvent::ChannelDeleted {
            server_id,
            channel_id,
        });
        info!(%channel_id, "Channel deleted");
        Ok(ChannelResponse::from(channel))
    }

    /// Sidebar items for the server of `channel_id`, with that channel active
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn list_view(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<Vec<ChannelListItemView>> {
        let access = PermissionService::new(self.ctx);
        let (_, member) = access.require_member(server_id, profile.id).await?;
        access.require_channel_in(channel_id, server_id).await?;

        let channels = self.ctx.channel_repo().find_by_server(server_id).await?;
        Ok(channels
            .iter()
            .map(|c| ChannelListItemView::build(c, server_id, Some(member.role), Some(channel_id)))
            .collect())
    }

    fn publish(&self, event: &DomainEvent) {
        self.ctx.event_hub().publish(&event.topic(), event);
    }
}
