//! Message service
//!
//! Channel history with cursor pagination, and the socket-backed mutations
//! the chat item calls. Every mutation is broadcast on the channel's message
//! topics so open chats update live.

use chat_core::{
    DomainError, Member, Message, MessageEventKind, MessagePage, MessagePolicy, MessageQuery,
    MessageWithMember, Profile, Snowflake,
};
use tracing::{debug, info, instrument};

use crate::dto::{
    ChatItemView, CreateMessageRequest, EditState, MessagePageResponse, MessageResponse,
    SocketTarget, UpdateMessageRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Longest message content accepted, in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of history, newest first
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn list_messages(
        &self,
        profile: &Profile,
        channel_id: Snowflake,
        cursor: Option<Snowflake>,
    ) -> ServiceResult<MessagePageResponse> {
        PermissionService::new(self.ctx)
            .require_channel_member(channel_id, profile.id)
            .await?;
        let page = self.page(channel_id, cursor).await?;

        Ok(MessagePageResponse {
            items: page.items.iter().map(MessageResponse::from).collect(),
            next_cursor: page.next_cursor,
        })
    }

    /// Same page as [`Self::list_messages`], rendered as chat items for the caller
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn list_view(
        &self,
        profile: &Profile,
        channel_id: Snowflake,
        cursor: Option<Snowflake>,
    ) -> ServiceResult<MessagePageResponse<ChatItemView>> {
        let (channel, member) = PermissionService::new(self.ctx)
            .require_channel_member(channel_id, profile.id)
            .await?;
        let page = self.page(channel_id, cursor).await?;
        let socket = SocketTarget::new(self.ctx.socket_url(), channel.server_id, channel_id);

        Ok(MessagePageResponse {
            items: page
                .items
                .iter()
                .map(|item| ChatItemView::build(item, &member, &socket))
                .collect(),
            next_cursor: page.next_cursor,
        })
    }

    /// Post a message and broadcast it on `chat:{channel_id}:messages`
    #[instrument(skip(self, profile, request), fields(profile_id = %profile.id))]
    pub async fn create_message(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let member = self.require_member_in_channel(profile, server_id, channel_id).await?;
        ensure_length(&request.content)?;

        let message = Message::new(
            self.ctx.generate_id(),
            request.content,
            request.file_url,
            member.id,
            channel_id,
        );
        self.ctx.message_repo().create(&message).await?;

        let response = self.broadcast(MessageEventKind::Added, message.id).await?;
        info!(message_id = %message.id, %channel_id, "Message created");
        Ok(response)
    }

    /// Author-only edit of a text message
    #[instrument(skip(self, profile, request), fields(profile_id = %profile.id))]
    pub async fn edit_message(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        request: UpdateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let member = self.require_member_in_channel(profile, server_id, channel_id).await?;
        let mut message = self.require_message(message_id, channel_id).await?;

        MessagePolicy::new(&member, &message).ensure_can_edit(&message)?;
        let content = EditState::editing(request.content).submit()?;
        ensure_length(&content)?;

        message.edit(content);
        self.ctx.message_repo().update(&message).await?;

        let response = self.broadcast(MessageEventKind::Updated, message_id).await?;
        info!(%message_id, "Message edited");
        Ok(response)
    }

    /// Soft delete by the author, an admin or a moderator
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn delete_message(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let member = self.require_member_in_channel(profile, server_id, channel_id).await?;
        let mut message = self.require_message(message_id, channel_id).await?;

        MessagePolicy::new(&member, &message).ensure_can_delete(&message)?;
        message.soft_delete();
        self.ctx.message_repo().update(&message).await?;

        let response = self.broadcast(MessageEventKind::Updated, message_id).await?;
        info!(%message_id, "Message deleted");
        Ok(response)
    }

    async fn page(&self, channel_id: Snowflake, cursor: Option<Snowflake>) -> ServiceResult<MessagePage> {
        let query = MessageQuery::after(cursor);
        let items = self.ctx.message_repo().find_by_channel(channel_id, query).await?;
        Ok(MessagePage::new(items, query.limit))
    }

    async fn require_member_in_channel(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<Member> {
        let access = PermissionService::new(self.ctx);
        let (_, member) = access.require_member(server_id, profile.id).await?;
        access.require_channel_in(channel_id, server_id).await?;
        Ok(member)
    }

    async fn require_message(&self, message_id: Snowflake, channel_id: Snowflake) -> ServiceResult<Message> {
        Ok(self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .filter(|m| m.channel_id == channel_id)
            .ok_or(DomainError::MessageNotFound(message_id))?)
    }

    /// Reload with the author and publish on the channel topic for `kind`
    async fn broadcast(&self, kind: MessageEventKind, message_id: Snowflake) -> ServiceResult<MessageResponse> {
        let item: MessageWithMember = self
            .ctx
            .message_repo()
            .find_with_member(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let response = MessageResponse::from(item);
        let key = kind.key(response.channel_id);
        let delivered = self.ctx.event_hub().publish(&key, &response);
        debug!(%key, delivered, "Message broadcast");
        Ok(response)
    }
}

fn ensure_length(content: &str) -> Result<(), DomainError> {
    if content.chars().count() > MAX_MESSAGE_LENGTH {
        Err(DomainError::ContentTooLong {
            max: MAX_MESSAGE_LENGTH,
        })
    } else {
        Ok(())
    }
}
