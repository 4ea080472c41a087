//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::Channel;
use chat_core::error::DomainError;
use chat_core::traits::{ChannelRepository, RepoResult};
use chat_core::value_objects::Snowflake;

use crate::models::ChannelModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT id, name, channel_type, profile_id, server_id, created_at, updated_at
            FROM channels
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Channel::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_server(&self, server_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r#"
            SELECT id, name, channel_type, profile_id, server_id, created_at, updated_at
            FROM channels
            WHERE server_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(server_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Channel::try_from).collect()
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO channels (id, name, channel_type, profile_id, server_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(channel.channel_type.as_str())
        .bind(channel.profile_id.into_inner())
        .bind(channel.server_id.into_inner())
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET name = $2, channel_type = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(channel.channel_type.as_str())
        .bind(channel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound(channel.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound(id));
        }
        Ok(())
    }
}
