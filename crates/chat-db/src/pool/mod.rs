//! Database connection pool management

mod migrate;
mod postgres;

pub use migrate::{run_migrations, run_migrations_from};
pub use postgres::{create_pool, DatabaseConfig};

pub use sqlx::postgres::PgPool;
