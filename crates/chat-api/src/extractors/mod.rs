//! Axum extractors for authentication, bodies and query strings

mod auth;
mod validated;

pub use auth::{CurrentProfile, Identity, OptionalProfile};
pub use validated::{ApiQuery, ValidatedJson};
