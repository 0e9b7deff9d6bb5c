//! Chat configuration repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::chat::{ChatConfig, SenderClass};
use crate::utils::errors::SweepBotError;

const ALL_COLUMNS: &str = "chat_id, title, human_delay_seconds, bot_delay_seconds, \
     channel_delay_seconds, excluded_sender_ids, administrator_ids, is_active, \
     created_at, updated_at";

#[derive(Clone)]
pub struct ChatConfigRepository {
    pool: PgPool,
}

impl ChatConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a chat's config row, if one exists.
    pub async fn find(&self, chat_id: i64) -> Result<Option<ChatConfig>, SweepBotError> {
        let config = sqlx::query_as::<_, ChatConfig>(&format!(
            "SELECT {ALL_COLUMNS} FROM chat_configs WHERE chat_id = $1"
        ))
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(config)
    }

    /// Get a chat's config, falling back to the zero-value config (all delays
    /// off) when no row exists. Never fails with not-found.
    pub async fn get_config(&self, chat_id: i64) -> Result<ChatConfig, SweepBotError> {
        Ok(self
            .find(chat_id)
            .await?
            .unwrap_or_else(|| ChatConfig::disabled(chat_id)))
    }

    /// Upsert the delay for one sender class, creating the row if absent and
    /// leaving every other field untouched.
    pub async fn set_delay(
        &self,
        chat_id: i64,
        class: SenderClass,
        seconds: i64,
    ) -> Result<ChatConfig, SweepBotError> {
        let query = match class {
            SenderClass::Human => {
                r#"
                INSERT INTO chat_configs (chat_id, human_delay_seconds, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (chat_id) DO UPDATE
                SET human_delay_seconds = EXCLUDED.human_delay_seconds, updated_at = EXCLUDED.updated_at
                RETURNING chat_id, title, human_delay_seconds, bot_delay_seconds, channel_delay_seconds, excluded_sender_ids, administrator_ids, is_active, created_at, updated_at
                "#
            }
            SenderClass::Bot => {
                r#"
                INSERT INTO chat_configs (chat_id, bot_delay_seconds, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (chat_id) DO UPDATE
                SET bot_delay_seconds = EXCLUDED.bot_delay_seconds, updated_at = EXCLUDED.updated_at
                RETURNING chat_id, title, human_delay_seconds, bot_delay_seconds, channel_delay_seconds, excluded_sender_ids, administrator_ids, is_active, created_at, updated_at
                "#
            }
            SenderClass::Channel => {
                r#"
                INSERT INTO chat_configs (chat_id, channel_delay_seconds, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (chat_id) DO UPDATE
                SET channel_delay_seconds = EXCLUDED.channel_delay_seconds, updated_at = EXCLUDED.updated_at
                RETURNING chat_id, title, human_delay_seconds, bot_delay_seconds, channel_delay_seconds, excluded_sender_ids, administrator_ids, is_active, created_at, updated_at
                "#
            }
        };

        let config = sqlx::query_as::<_, ChatConfig>(query)
            .bind(chat_id)
            .bind(seconds)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(config)
    }

    /// Zero all delay fields for a chat, leaving exclusions and metadata
    /// untouched. A chat with no row stays absent.
    pub async fn reset(&self, chat_id: i64) -> Result<(), SweepBotError> {
        sqlx::query(
            r#"
            UPDATE chat_configs
            SET human_delay_seconds = 0,
                bot_delay_seconds = 0,
                channel_delay_seconds = 0,
                updated_at = $2
            WHERE chat_id = $1
            "#,
        )
        .bind(chat_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add a sender to the chat's exclusion list, creating the row if absent.
    pub async fn add_excluded_sender(
        &self,
        chat_id: i64,
        sender_id: i64,
    ) -> Result<ChatConfig, SweepBotError> {
        let config = sqlx::query_as::<_, ChatConfig>(&format!(
            r#"
            INSERT INTO chat_configs (chat_id, excluded_sender_ids, updated_at)
            VALUES ($1, ARRAY[$2]::BIGINT[], $3)
            ON CONFLICT (chat_id) DO UPDATE
            SET excluded_sender_ids = CASE
                    WHEN $2 = ANY(chat_configs.excluded_sender_ids) THEN chat_configs.excluded_sender_ids
                    ELSE array_append(chat_configs.excluded_sender_ids, $2)
                END,
                updated_at = EXCLUDED.updated_at
            RETURNING {ALL_COLUMNS}
            "#
        ))
        .bind(chat_id)
        .bind(sender_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(config)
    }

    /// Remove a sender from the chat's exclusion list.
    pub async fn remove_excluded_sender(
        &self,
        chat_id: i64,
        sender_id: i64,
    ) -> Result<(), SweepBotError> {
        sqlx::query(
            r#"
            UPDATE chat_configs
            SET excluded_sender_ids = array_remove(excluded_sender_ids, $2),
                updated_at = $3
            WHERE chat_id = $1
            "#,
        )
        .bind(chat_id)
        .bind(sender_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert a chat's denormalized metadata. On first creation the human
    /// delay starts at `initial_human_delay`; an existing row keeps its
    /// configured delays.
    pub async fn ensure_chat(
        &self,
        chat_id: i64,
        title: Option<String>,
        administrator_ids: Vec<i64>,
        initial_human_delay: i64,
    ) -> Result<ChatConfig, SweepBotError> {
        let config = sqlx::query_as::<_, ChatConfig>(&format!(
            r#"
            INSERT INTO chat_configs (chat_id, title, administrator_ids, human_delay_seconds, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (chat_id) DO UPDATE
            SET title = EXCLUDED.title,
                administrator_ids = EXCLUDED.administrator_ids,
                is_active = TRUE,
                updated_at = EXCLUDED.updated_at
            RETURNING {ALL_COLUMNS}
            "#
        ))
        .bind(chat_id)
        .bind(title)
        .bind(administrator_ids)
        .bind(initial_human_delay)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(config)
    }

    /// Mark a chat active or inactive (bot added/removed bookkeeping).
    pub async fn set_active(&self, chat_id: i64, active: bool) -> Result<(), SweepBotError> {
        sqlx::query(
            "UPDATE chat_configs SET is_active = $2, updated_at = $3 WHERE chat_id = $1",
        )
        .bind(chat_id)
        .bind(active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All active chats whose stored administrator list contains the user.
    pub async fn list_admin_chats(&self, admin_id: i64) -> Result<Vec<ChatConfig>, SweepBotError> {
        let configs = sqlx::query_as::<_, ChatConfig>(&format!(
            r#"
            SELECT {ALL_COLUMNS} FROM chat_configs
            WHERE $1 = ANY(administrator_ids) AND is_active = TRUE
            ORDER BY chat_id
            "#
        ))
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(configs)
    }

    /// Count stored chat configs.
    pub async fn count(&self) -> Result<i64, SweepBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_configs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
