//! PostgreSQL implementation of ServerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use chat_core::entities::{Channel, Member, Server};
use chat_core::error::DomainError;
use chat_core::traits::{LeaveOutcome, RepoResult, ServerRepository};
use chat_core::value_objects::Snowflake;

use crate::models::ServerModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgServerRepository {
    pool: PgPool,
}

impl PgServerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServerRepository for PgServerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r#"
            SELECT id, name, image_url, invite_code, profile_id, created_at, updated_at
            FROM servers
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self))]
    async fn find_by_invite_code(&self, invite_code: &str) -> RepoResult<Option<Server>> {
        let result = sqlx::query_as::<_, ServerModel>(
            r#"
            SELECT id, name, image_url, invite_code, profile_id, created_at, updated_at
            FROM servers
            WHERE invite_code = $1
            "#,
        )
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Server::from))
    }

    #[instrument(skip(self))]
    async fn find_by_member_profile(&self, profile_id: Snowflake) -> RepoResult<Vec<Server>> {
        let results = sqlx::query_as::<_, ServerModel>(
            r#"
            SELECT s.id, s.name, s.image_url, s.invite_code, s.profile_id, s.created_at, s.updated_at
            FROM servers s
            INNER JOIN members m ON m.server_id = s.id
            WHERE m.profile_id = $1
            ORDER BY s.created_at ASC, s.id ASC
            "#,
        )
        .bind(profile_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Server::from).collect())
    }

    #[instrument(skip(self, server, general, owner), fields(server_id = %server.id))]
    async fn create(&self, server: &Server, general: &Channel, owner: &Member) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO servers (id, name, image_url, invite_code, profile_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(server.id.into_inner())
        .bind(&server.name)
        .bind(&server.image_url)
        .bind(&server.invite_code)
        .bind(server.profile_id.into_inner())
        .bind(server.created_at)
        .bind(server.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InviteCodeExists))?;

        sqlx::query(
            r#"
            INSERT INTO channels (id, name, channel_type, profile_id, server_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(general.id.into_inner())
        .bind(&general.name)
        .bind(general.channel_type.as_str())
        .bind(general.profile_id.into_inner())
        .bind(general.server_id.into_inner())
        .bind(general.created_at)
        .bind(general.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO members (id, role, profile_id, server_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(owner.id.into_inner())
        .bind(owner.role.as_str())
        .bind(owner.profile_id.into_inner())
        .bind(owner.server_id.into_inner())
        .bind(owner.created_at)
        .bind(owner.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, server), fields(server_id = %server.id))]
    async fn update(&self, server: &Server) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE servers
            SET name = $2, image_url = $3, invite_code = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(server.id.into_inner())
        .bind(&server.name)
        .bind(&server.image_url)
        .bind(&server.invite_code)
        .bind(server.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InviteCodeExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ServerNotFound(server.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // members, channels and messages go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM servers WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ServerNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn leave(&self, server_id: Snowflake, profile_id: Snowflake) -> RepoResult<LeaveOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let server = sqlx::query_as::<_, ServerModel>(
            r#"
            SELECT id, name, image_url, invite_code, profile_id, created_at, updated_at
            FROM servers
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(server_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(server) = server.map(Server::from) else {
            return Ok(LeaveOutcome::ServerNotFound);
        };
        if server.is_owned_by(profile_id) {
            return Ok(LeaveOutcome::IsOwner);
        }

        let removed = sqlx::query("DELETE FROM members WHERE server_id = $1 AND profile_id = $2")
            .bind(server_id.into_inner())
            .bind(profile_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        if removed == 0 {
            return Ok(LeaveOutcome::NotMember);
        }

        let updated = sqlx::query_as::<_, ServerModel>(
            r#"
            UPDATE servers SET updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, image_url, invite_code, profile_id, created_at, updated_at
            "#,
        )
        .bind(server_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(removed, "Membership removed");
        Ok(LeaveOutcome::Left(Server::from(updated)))
    }
}
