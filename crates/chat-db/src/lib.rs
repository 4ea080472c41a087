//! # chat-db
//!
//! PostgreSQL implementations of the `chat-core` repository traits via SQLx:
//! connection pool, migrations, row models, row-to-entity mappers and the
//! `Pg*Repository` types.
//!
//! ```rust,ignore
//! use chat_db::{create_pool, run_migrations, DatabaseConfig, PgServerRepository};
//!
//! let pool = create_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let servers = PgServerRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, run_migrations_from, DatabaseConfig, PgPool};
pub use repositories::{
    PgChannelRepository, PgMemberRepository, PgMessageRepository, PgProfileRepository,
    PgServerRepository,
};
