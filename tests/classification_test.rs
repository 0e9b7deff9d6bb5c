//! Sender classification tests
//!
//! Builds Telegram messages from Bot API JSON payloads and checks how the
//! ingestion path classifies their authors.

use serde_json::json;
use teloxide::types::Message;

use sweepbot::handlers::messages::classify_sender;
use sweepbot::models::{ChatConfig, SenderClass};

fn message_from(value: serde_json::Value) -> Message {
    serde_json::from_value(value).expect("valid Bot API message payload")
}

fn group_chat() -> serde_json::Value {
    json!({"id": -1001234567890i64, "title": "Test Group", "type": "supergroup"})
}

#[test]
fn human_sender_is_classified_as_human() {
    let msg = message_from(json!({
        "message_id": 1,
        "date": 1640995200,
        "chat": group_chat(),
        "from": {"id": 987654321, "is_bot": false, "first_name": "Test"},
        "text": "hello"
    }));

    assert_eq!(classify_sender(&msg), (SenderClass::Human, Some(987654321)));
}

#[test]
fn bot_sender_is_classified_as_bot() {
    let msg = message_from(json!({
        "message_id": 2,
        "date": 1640995200,
        "chat": group_chat(),
        "from": {"id": 555, "is_bot": true, "first_name": "OtherBot", "username": "other_bot"},
        "text": "beep"
    }));

    assert_eq!(classify_sender(&msg), (SenderClass::Bot, Some(555)));
}

#[test]
fn sender_chat_is_classified_as_channel() {
    let msg = message_from(json!({
        "message_id": 3,
        "date": 1640995200,
        "chat": group_chat(),
        "sender_chat": {"id": -1009876543210i64, "title": "Linked Channel", "type": "channel"},
        "from": {"id": 777000, "is_bot": false, "first_name": "Telegram"},
        "text": "announcement"
    }));

    assert_eq!(
        classify_sender(&msg),
        (SenderClass::Channel, Some(-1009876543210))
    );
}

#[test]
fn anonymous_post_attributed_to_the_chat_itself_is_channel_class() {
    let msg = message_from(json!({
        "message_id": 4,
        "date": 1640995200,
        "chat": group_chat(),
        "sender_chat": group_chat(),
        "text": "anonymous admin"
    }));

    assert_eq!(
        classify_sender(&msg),
        (SenderClass::Channel, Some(-1001234567890))
    );
}

#[test]
fn message_without_resolvable_sender_defaults_to_human() {
    let msg = message_from(json!({
        "message_id": 5,
        "date": 1640995200,
        "chat": group_chat(),
        "text": "orphan"
    }));

    assert_eq!(classify_sender(&msg), (SenderClass::Human, None));
}

#[test]
fn resolved_delay_follows_the_sender_class() {
    let mut config = ChatConfig::disabled(-1001234567890);
    config.human_delay_seconds = 10;
    config.bot_delay_seconds = 120;

    let human = message_from(json!({
        "message_id": 6,
        "date": 1640995200,
        "chat": group_chat(),
        "from": {"id": 1, "is_bot": false, "first_name": "A"},
        "text": "hi"
    }));
    let (class, _) = classify_sender(&human);
    assert_eq!(config.delay_for(class), 10);

    let bot = message_from(json!({
        "message_id": 7,
        "date": 1640995200,
        "chat": group_chat(),
        "from": {"id": 2, "is_bot": true, "first_name": "B"},
        "text": "hi"
    }));
    let (class, _) = classify_sender(&bot);
    assert_eq!(config.delay_for(class), 120);

    // Channel delay unset: resolved delay is 0, nothing gets scheduled.
    let channel = message_from(json!({
        "message_id": 8,
        "date": 1640995200,
        "chat": group_chat(),
        "sender_chat": {"id": -42, "title": "C", "type": "channel"},
        "text": "hi"
    }));
    let (class, _) = classify_sender(&channel);
    assert_eq!(config.delay_for(class), 0);
}
