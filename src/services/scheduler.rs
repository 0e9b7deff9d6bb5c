//! Deletion scheduler
//!
//! Each scheduled deletion is one independent suspended task: sleep for the
//! resolved delay, then issue a single best-effort delete call. The delay is
//! resolved by the caller at enqueue time; later settings changes do not
//! affect deletions that are already scheduled, and there is no cancellation.
//!
//! Deletion failures (message already gone, permission revoked, chat no
//! longer exists, network timeout) are swallowed: logged at debug level and
//! never retried or surfaced to users.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tracing::{debug, trace};

use crate::utils::errors::Result;

/// Seam between the scheduler and the messaging platform's delete call.
pub trait MessageDeleter: Clone + Send + Sync + 'static {
    fn delete_message(
        &self,
        chat_id: i64,
        message_id: i32,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Production deleter backed by the Telegram Bot API.
#[derive(Clone)]
pub struct BotDeleter {
    bot: Bot,
}

impl BotDeleter {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl MessageDeleter for BotDeleter {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }
}

/// Arranges one deletion attempt per scheduled message, at or after the
/// requested delay.
#[derive(Clone)]
pub struct DeletionScheduler<D: MessageDeleter> {
    deleter: D,
    delete_timeout: Duration,
    pending: Arc<AtomicUsize>,
}

impl<D: MessageDeleter> DeletionScheduler<D> {
    pub fn new(deleter: D, delete_timeout: Duration) -> Self {
        Self {
            deleter,
            delete_timeout,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Schedule exactly one deletion attempt for `(chat_id, message_id)` at
    /// or after `delay_seconds` from now. Returns immediately.
    pub fn schedule(&self, chat_id: i64, message_id: i32, delay_seconds: i64) {
        let delay = Duration::from_secs(delay_seconds.max(0) as u64);
        let deleter = self.deleter.clone();
        let delete_timeout = self.delete_timeout;
        let pending = Arc::clone(&self.pending);

        pending.fetch_add(1, Ordering::Relaxed);
        trace!(chat_id = chat_id, message_id = message_id,
               delay_seconds = delay_seconds, "Deletion scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            match tokio::time::timeout(delete_timeout, deleter.delete_message(chat_id, message_id))
                .await
            {
                Ok(Ok(())) => {
                    trace!(chat_id = chat_id, message_id = message_id, "Message deleted");
                }
                Ok(Err(e)) => {
                    debug!(chat_id = chat_id, message_id = message_id, error = %e,
                           "Deletion attempt failed, dropping");
                }
                Err(_) => {
                    debug!(chat_id = chat_id, message_id = message_id,
                           "Deletion attempt timed out, dropping");
                }
            }

            pending.fetch_sub(1, Ordering::Relaxed);
        });
    }

    /// Number of deletions scheduled but not yet attempted.
    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records every deletion attempt together with its (paused) time.
    #[derive(Clone, Default)]
    pub struct RecordingDeleter {
        pub attempts: Arc<Mutex<Vec<(i64, i32, tokio::time::Instant)>>>,
        pub fail: bool,
    }

    impl MessageDeleter for RecordingDeleter {
        async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
            self.attempts
                .lock()
                .unwrap()
                .push((chat_id, message_id, tokio::time::Instant::now()));
            if self.fail {
                return Err(crate::utils::errors::SweepBotError::InvalidInput(
                    "simulated delete failure".to_string(),
                ));
            }
            Ok(())
        }
    }

    async fn drain_tasks() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_deletion_fires_at_or_after_delay() {
        let deleter = RecordingDeleter::default();
        let scheduler = DeletionScheduler::new(deleter.clone(), Duration::from_secs(10));

        let start = tokio::time::Instant::now();
        scheduler.schedule(-100, 7, 10);

        tokio::time::sleep(Duration::from_secs(9)).await;
        drain_tasks().await;
        assert!(deleter.attempts.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        drain_tasks().await;

        let attempts = deleter.attempts.lock().unwrap();
        assert_eq!(attempts.len(), 1);
        let (chat_id, message_id, fired_at) = attempts[0];
        assert_eq!(chat_id, -100);
        assert_eq!(message_id, 7);
        assert!(fired_at.duration_since(start) >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_swallowed_and_not_retried() {
        let deleter = RecordingDeleter {
            fail: true,
            ..Default::default()
        };
        let scheduler = DeletionScheduler::new(deleter.clone(), Duration::from_secs(10));

        scheduler.schedule(-100, 1, 1);
        tokio::time::sleep(Duration::from_secs(60)).await;
        drain_tasks().await;

        assert_eq!(deleter.attempts.lock().unwrap().len(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_count_tracks_outstanding_deletions() {
        let deleter = RecordingDeleter::default();
        let scheduler = DeletionScheduler::new(deleter.clone(), Duration::from_secs(10));

        scheduler.schedule(-100, 1, 30);
        scheduler.schedule(-100, 2, 30);
        drain_tasks().await;
        assert_eq!(scheduler.pending_count(), 2);

        tokio::time::sleep(Duration::from_secs(31)).await;
        drain_tasks().await;
        assert_eq!(scheduler.pending_count(), 0);
    }
}
