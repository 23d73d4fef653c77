#![allow(clippy::unwrap_used, clippy::expect_used)]

use mapchat_core::*;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// 1. Message serialization keeps role and content
// ---------------------------------------------------------------------------

#[test]
fn message_serialization_roundtrip() {
    let session_id = Uuid::new_v4();
    let msg = Message::system("WARDLEY MAP: title Demo", session_id);

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"system\""));

    let deserialized: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.id, msg.id);
    assert_eq!(deserialized.role, Role::System);
    assert_eq!(deserialized.content, "WARDLEY MAP: title Demo");
    assert_eq!(deserialized.session_id, session_id);
    assert_eq!(deserialized.timestamp, msg.timestamp);
}

#[test]
fn unknown_role_is_rejected() {
    let json = r#"{"id":"00000000-0000-0000-0000-000000000000","role":"tool","content":"x",
        "session_id":"00000000-0000-0000-0000-000000000000","timestamp":"2024-01-01T00:00:00Z"}"#;
    let result: Result<Message, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// 2. Usage accounting across turns
// ---------------------------------------------------------------------------

#[test]
fn usage_total_is_sum_of_turns() {
    let mut usage = UsageAccumulator::new();
    let turns = [120_u64, 0, 75, 4_096];
    for t in turns {
        usage.record(t);
    }
    assert_eq!(usage.total_tokens, turns.iter().sum::<u64>());
    assert_eq!(usage.last_turn_tokens, 4_096);

    usage.reset();
    assert_eq!(usage.total_tokens, 0);
    assert_eq!(usage.last_turn_tokens, 0);
}

// ---------------------------------------------------------------------------
// 3. Error conversions
// ---------------------------------------------------------------------------

#[test]
fn json_error_converts_into_mapchat_error() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let err: MapchatError = parse.unwrap_err().into();
    assert!(matches!(err, MapchatError::Json(_)));
    assert!(err.is_recoverable());
}

#[test]
fn io_error_converts_into_mapchat_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: MapchatError = io.into();
    assert!(matches!(err, MapchatError::Io(_)));
    assert!(err.to_string().contains("gone"));
}
