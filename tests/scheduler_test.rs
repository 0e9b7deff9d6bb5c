//! Deletion scheduler integration tests
//!
//! Runs the scheduler against a recording deleter under paused tokio time,
//! verifying the at-or-after contract and independent concurrent fan-out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sweepbot::services::scheduler::{DeletionScheduler, MessageDeleter};
use sweepbot::utils::errors::{Result, SweepBotError};

/// Records every deletion attempt together with its (paused) time.
#[derive(Clone, Default)]
struct RecordingDeleter {
    attempts: Arc<Mutex<Vec<(i64, i32, tokio::time::Instant)>>>,
    fail: bool,
}

impl MessageDeleter for RecordingDeleter {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.attempts
            .lock()
            .unwrap()
            .push((chat_id, message_id, tokio::time::Instant::now()));
        if self.fail {
            return Err(SweepBotError::InvalidInput(
                "simulated delete failure".to_string(),
            ));
        }
        Ok(())
    }
}

async fn drain_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_schedules_each_fire_exactly_once() {
    let deleter = RecordingDeleter::default();
    let scheduler = DeletionScheduler::new(deleter.clone(), Duration::from_secs(10));

    // N messages in the same chat with interleaved delays, arrival order
    // deliberately not sorted by delay.
    let delays = [30i64, 5, 120, 5, 60, 1, 30, 90];
    for (i, delay) in delays.iter().enumerate() {
        scheduler.schedule(-1001, i as i32, *delay);
    }

    let start = tokio::time::Instant::now();
    tokio::time::sleep(Duration::from_secs(121)).await;
    drain_tasks().await;

    let attempts = deleter.attempts.lock().unwrap();
    assert_eq!(attempts.len(), delays.len(), "each message deleted exactly once");

    for (chat_id, message_id, fired_at) in attempts.iter() {
        assert_eq!(*chat_id, -1001);
        let scheduled_delay = Duration::from_secs(delays[*message_id as usize] as u64);
        assert!(
            fired_at.duration_since(start) >= scheduled_delay,
            "message {message_id} fired before its delay"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn schedules_across_chats_do_not_interfere() {
    let deleter = RecordingDeleter::default();
    let scheduler = DeletionScheduler::new(deleter.clone(), Duration::from_secs(10));

    scheduler.schedule(-1, 1, 10);
    scheduler.schedule(-2, 1, 20);

    tokio::time::sleep(Duration::from_secs(11)).await;
    drain_tasks().await;
    assert_eq!(deleter.attempts.lock().unwrap().len(), 1);

    tokio::time::sleep(Duration::from_secs(10)).await;
    drain_tasks().await;

    let attempts = deleter.attempts.lock().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].0, -1);
    assert_eq!(attempts[1].0, -2);
}

#[tokio::test(start_paused = true)]
async fn failed_deletions_are_swallowed_without_retry() {
    let deleter = RecordingDeleter {
        fail: true,
        ..Default::default()
    };
    let scheduler = DeletionScheduler::new(deleter.clone(), Duration::from_secs(10));

    for i in 0..5 {
        scheduler.schedule(-1001, i, 2);
    }

    tokio::time::sleep(Duration::from_secs(600)).await;
    drain_tasks().await;

    // One attempt per message, no retries, nothing pending.
    assert_eq!(deleter.attempts.lock().unwrap().len(), 5);
    assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_delete_calls_hit_the_timeout_and_are_dropped() {
    #[derive(Clone)]
    struct StallingDeleter {
        calls: Arc<Mutex<u32>>,
    }

    impl MessageDeleter for StallingDeleter {
        async fn delete_message(&self, _chat_id: i64, _message_id: i32) -> Result<()> {
            *self.calls.lock().unwrap() += 1;
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    let calls = Arc::new(Mutex::new(0));
    let deleter = StallingDeleter {
        calls: Arc::clone(&calls),
    };
    let scheduler = DeletionScheduler::new(deleter, Duration::from_secs(10));

    scheduler.schedule(-1001, 1, 1);
    tokio::time::sleep(Duration::from_secs(30)).await;
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }

    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(scheduler.pending_count(), 0, "timed-out deletion is dropped");
}
