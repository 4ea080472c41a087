//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation, plus the query strings handlers read
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs
//! - View models for the channel list and chat feed

pub mod mappers;
pub mod requests;
pub mod responses;
pub mod views;

pub use requests::{
    optional_id, require_id, CreateChannelRequest, CreateMessageRequest, CreateServerRequest,
    MessageHistoryQuery, MessageScopeQuery, ServerScopeQuery, UpdateChannelRequest,
    UpdateMemberRoleRequest, UpdateMessageRequest, UpdateServerRequest,
};

pub use responses::{
    ChannelResponse, HealthChecks, HealthResponse, InviteAcceptResponse, MemberResponse,
    MessagePageResponse, MessageResponse, ProfileResponse, ReadinessResponse,
    ServerDetailResponse, ServerResponse,
};

pub use views::{
    linkify, ChannelIcon, ChannelListItemView, ChatAuthorView, ChatItemView, ContentSegment,
    EditState, RoleIcon, SocketTarget,
};
