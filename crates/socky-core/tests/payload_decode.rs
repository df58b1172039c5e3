//! Integration tests for inbound payload handling.
//!
//! These tests go through the public API the same way the client's
//! connection shell does: decode the frame, read `gridString`, and, when the
//! server also sent its raw board, extract and render the snapshot.

use socky_core::{BoardSnapshot, GridString, InboundMessage, KeyFrame, KeyName, NamedKey};

#[test]
fn test_grid_string_payload_yields_text() {
    let msg = InboundMessage::decode(r#"{"gridString":"abc"}"#).expect("valid JSON");

    assert_eq!(msg.raw(), r#"{"gridString":"abc"}"#);
    assert_eq!(msg.grid_string(), GridString::Text("abc"));
}

#[test]
fn test_missing_grid_string_yields_undefined_marker() {
    let msg = InboundMessage::decode(r#"{"other":1}"#).expect("valid JSON");

    assert_eq!(msg.grid_string().to_string(), "undefined");
}

#[test]
fn test_not_json_is_a_decode_error() {
    let err = InboundMessage::decode("not json").unwrap_err();

    // The error message must say what went wrong so it can be logged as-is.
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn test_full_server_broadcast_renders_board_and_scores() {
    // Arrange: the shape the game server broadcasts every tick
    let raw = r#"{
        "type": "state",
        "grid": [["·","·","·"],["·","b","f"]],
        "clients": [
            {"id":"1.2.3.4:5","keypress":"l","name":"ann","color":"red","snake":{"Score":2}},
            {"id":"1.2.3.4:6","keypress":"k","name":"bo","color":"cyan","snake":{"Score":5}}
        ]
    }"#;

    // Act
    let msg = InboundMessage::decode(raw).expect("valid JSON");
    let snap = BoardSnapshot::from_message(&msg).expect("board fields present");
    let lines = snap.render();

    // Assert
    assert!(msg.grid_string().is_absent());
    assert_eq!(lines[0], "· · ·");
    assert_eq!(lines[1], "· ◉ ⊗");
    assert_eq!(lines[2], "");
    assert!(lines[3].starts_with("bo"));
    assert!(lines[4].starts_with("ann"));
}

#[test]
fn test_key_frame_for_parsed_name_is_identical_text() {
    for name in ["a", "A", " ", "Enter", "ArrowUp", "Escape", "F5"] {
        let key: KeyName = name.parse().expect("known key name");
        assert_eq!(KeyFrame::new(&key).as_str(), name);
    }
}

#[test]
fn test_unidentified_key_frame() {
    let frame = KeyFrame::new(&KeyName::Named(NamedKey::Unidentified));
    assert_eq!(frame.as_str(), "Unidentified");
}
