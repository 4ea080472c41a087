//! Identity tokens issued by the sign-in provider

mod jwt;

pub use jwt::{IdentityClaims, JwtService};
