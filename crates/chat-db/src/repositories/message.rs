//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::{Message, MessageWithMember};
use chat_core::error::DomainError;
use chat_core::traits::{MessageQuery, MessageRepository, RepoResult};
use chat_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageWithMemberModel};

use super::error::map_db_error;

/// Message columns followed by the author's member and profile columns
const SELECT_WITH_MEMBER: &str = r#"
    SELECT msg.id, msg.content, msg.file_url, msg.member_id, msg.channel_id, msg.deleted,
           msg.created_at, msg.updated_at,
           mem.role       AS member_role,
           mem.profile_id AS member_profile_id,
           mem.server_id  AS member_server_id,
           mem.created_at AS member_created_at,
           mem.updated_at AS member_updated_at,
           p.user_id      AS profile_user_id,
           p.name         AS profile_name,
           p.image_url    AS profile_image_url,
           p.email        AS profile_email,
           p.created_at   AS profile_created_at,
           p.updated_at   AS profile_updated_at
    FROM messages msg
    INNER JOIN members mem ON mem.id = msg.member_id
    INNER JOIN profiles p ON p.id = mem.profile_id
"#;

#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, content, file_url, member_id, channel_id, deleted, created_at, updated_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_with_member(&self, id: Snowflake) -> RepoResult<Option<MessageWithMember>> {
        let sql = format!("{SELECT_WITH_MEMBER} WHERE msg.id = $1");
        let result = sqlx::query_as::<_, MessageWithMemberModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(MessageWithMember::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<MessageWithMember>> {
        let limit = i64::try_from(query.limit.clamp(1, 100)).unwrap_or(100);

        let results = match query.cursor {
            // Rows strictly after the cursor row in (created_at DESC, id DESC) order
            Some(cursor) => {
                let sql = format!(
                    r#"{SELECT_WITH_MEMBER}
                    WHERE msg.channel_id = $1
                      AND (msg.created_at, msg.id) <
                          (SELECT c.created_at, c.id FROM messages c WHERE c.id = $2)
                    ORDER BY msg.created_at DESC, msg.id DESC
                    LIMIT $3"#
                );
                sqlx::query_as::<_, MessageWithMemberModel>(&sql)
                    .bind(channel_id.into_inner())
                    .bind(cursor.into_inner())
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    r#"{SELECT_WITH_MEMBER}
                    WHERE msg.channel_id = $1
                    ORDER BY msg.created_at DESC, msg.id DESC
                    LIMIT $2"#
                );
                sqlx::query_as::<_, MessageWithMemberModel>(&sql)
                    .bind(channel_id.into_inner())
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        results.into_iter().map(MessageWithMember::try_from).collect()
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, content, file_url, member_id, channel_id, deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(&message.content)
        .bind(message.file_url.as_deref())
        .bind(message.member_id.into_inner())
        .bind(message.channel_id.into_inner())
        .bind(message.deleted)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn update(&self, message: &Message) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET content = $2, file_url = $3, deleted = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(message.id.into_inner())
        .bind(&message.content)
        .bind(message.file_url.as_deref())
        .bind(message.deleted)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MessageNotFound(message.id));
        }
        Ok(())
    }
}
