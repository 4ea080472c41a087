//! Value objects - immutable types that represent domain concepts

mod file_kind;
mod permissions;
mod snowflake;

pub use file_kind::FileKind;
pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
