//! Session storage implementation
//!
//! This module persists configuration sessions in Redis with a TTL,
//! including serialization, deserialization and expiry handling.

use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::config::RedisConfig;
use crate::utils::errors::Result;

use super::context::ConfigSession;

/// Redis-based session storage.
#[derive(Clone)]
pub struct SessionStore {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl SessionStore {
    /// Create a new session store instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// TTL applied to new sessions, in seconds.
    pub fn session_ttl(&self) -> u64 {
        self.config.session_ttl_seconds
    }

    /// Save a configuration session, replacing any previous one for the user.
    pub async fn save_session(&self, session: &ConfigSession) -> Result<()> {
        let key = self.session_key(session.user_id);
        let serialized = serde_json::to_string(session)?;

        let mut conn = self.connection_manager.clone();
        conn.set_ex::<_, _, ()>(&key, serialized, self.config.session_ttl_seconds)
            .await?;

        debug!(user_id = session.user_id, chat_id = session.chat_id,
               sender_class = %session.sender_class, "Config session saved");
        Ok(())
    }

    /// Load the user's configuration session, dropping it if expired.
    pub async fn load_session(&self, user_id: i64) -> Result<Option<ConfigSession>> {
        let key = self.session_key(user_id);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        let Some(data) = serialized else {
            return Ok(None);
        };

        let session: ConfigSession = serde_json::from_str(&data)?;
        if session.is_expired() {
            warn!(user_id = user_id, "Config session expired, removing");
            self.delete_session(user_id).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Delete the user's configuration session.
    pub async fn delete_session(&self, user_id: i64) -> Result<()> {
        let key = self.session_key(user_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(user_id = user_id, deleted = deleted, "Config session delete");

        Ok(())
    }

    fn session_key(&self, user_id: i64) -> String {
        format!("{}session:{}", self.config.prefix, user_id)
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::SenderClass;

    use super::*;

    fn create_test_config() -> RedisConfig {
        RedisConfig {
            url: "redis://localhost:6379".to_string(),
            prefix: "test_sweepbot:".to_string(),
            session_ttl_seconds: 300,
        }
    }

    // These run only where a local Redis is reachable, mirroring how the
    // repository tests guard on a live database.
    #[tokio::test]
    async fn test_session_save_load_delete() {
        let Ok(store) = SessionStore::new(create_test_config()).await else {
            return;
        };

        let session = ConfigSession::new(123, -1001, SenderClass::Channel, 300);
        store.save_session(&session).await.unwrap();

        let loaded = store.load_session(123).await.unwrap().unwrap();
        assert_eq!(loaded.chat_id, -1001);
        assert_eq!(loaded.sender_class, SenderClass::Channel);

        store.delete_session(123).await.unwrap();
        assert!(store.load_session(123).await.unwrap().is_none());
    }
}
