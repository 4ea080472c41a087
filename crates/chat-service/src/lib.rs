//! # chat-service
//!
//! Application layer: services, request/response DTOs, the view models the
//! chat client renders, and the in-process realtime hub.

pub mod dto;
pub mod realtime;
pub mod services;

pub use realtime::{EventHub, RealtimeEvent};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
