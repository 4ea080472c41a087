//! Integration test utilities for the chat server
//!
//! Spawns the real application on a local port against the database in
//! `DATABASE_URL` and drives it over HTTP and websockets.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
