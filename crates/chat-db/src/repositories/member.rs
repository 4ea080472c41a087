//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::{Member, MemberRole, MemberWithProfile};
use chat_core::error::DomainError;
use chat_core::traits::{MemberRepository, RepoResult};
use chat_core::value_objects::Snowflake;

use crate::models::{MemberModel, MemberWithProfileModel};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, role, profile_id, server_id, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_server_and_profile(
        &self,
        server_id: Snowflake,
        profile_id: Snowflake,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, role, profile_id, server_id, created_at, updated_at
            FROM members
            WHERE server_id = $1 AND profile_id = $2
            "#,
        )
        .bind(server_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_server(&self, server_id: Snowflake) -> RepoResult<Vec<MemberWithProfile>> {
        let results = sqlx::query_as::<_, MemberWithProfileModel>(
            r#"
            SELECT m.id, m.role, m.profile_id, m.server_id, m.created_at, m.updated_at,
                   p.user_id    AS profile_user_id,
                   p.name       AS profile_name,
                   p.image_url  AS profile_image_url,
                   p.email      AS profile_email,
                   p.created_at AS profile_created_at,
                   p.updated_at AS profile_updated_at
            FROM members m
            INNER JOIN profiles p ON p.id = m.profile_id
            WHERE m.server_id = $1
            ORDER BY CASE m.role WHEN 'ADMIN' THEN 0 WHEN 'MODERATOR' THEN 1 ELSE 2 END,
                     m.created_at ASC, m.id ASC
            "#,
        )
        .bind(server_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(MemberWithProfile::try_from).collect()
    }

    #[instrument(skip(self, member), fields(server_id = %member.server_id, profile_id = %member.profile_id))]
    async fn add_if_absent(&self, member: &Member) -> RepoResult<(Member, bool)> {
        let inserted = sqlx::query_as::<_, MemberModel>(
            r#"
            INSERT INTO members (id, role, profile_id, server_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (profile_id, server_id) DO NOTHING
            RETURNING id, role, profile_id, server_id, created_at, updated_at
            "#,
        )
        .bind(member.id.into_inner())
        .bind(member.role.as_str())
        .bind(member.profile_id.into_inner())
        .bind(member.server_id.into_inner())
        .bind(member.created_at)
        .bind(member.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok((Member::try_from(model)?, true));
        }

        let existing = self
            .find_by_server_and_profile(member.server_id, member.profile_id)
            .await?
            .ok_or(DomainError::MemberNotFound)?;
        Ok((existing, false))
    }

    #[instrument(skip(self))]
    async fn update_role(&self, id: Snowflake, role: MemberRole) -> RepoResult<()> {
        let result = sqlx::query("UPDATE members SET role = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }
        Ok(())
    }
}
