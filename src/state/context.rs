//! Configuration session state
//!
//! A `ConfigSession` records where an administrator is in the multi-step
//! settings flow: which chat they are configuring and which sender class the
//! next custom delay applies to. Sessions are keyed by user id and expire,
//! which keeps multi-instance deployments safe (no process-global state).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SenderClass;

/// Pending configuration-UI state for one administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSession {
    /// Administrator this session belongs to.
    pub user_id: i64,
    /// Chat whose settings are being edited.
    pub chat_id: i64,
    /// Sender class the next delay value applies to.
    pub sender_class: SenderClass,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ConfigSession {
    pub fn new(user_id: i64, chat_id: i64, sender_class: SenderClass, ttl_seconds: u64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            chat_id,
            sender_class,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_not_expired() {
        let session = ConfigSession::new(42, -100, SenderClass::Human, 300);
        assert!(!session.is_expired());
        assert_eq!(session.user_id, 42);
        assert_eq!(session.chat_id, -100);
        assert_eq!(session.sender_class, SenderClass::Human);
    }

    #[test]
    fn test_session_expiry() {
        let mut session = ConfigSession::new(42, -100, SenderClass::Bot, 300);
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
    }
}
