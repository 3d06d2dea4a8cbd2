use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Event)]
struct MockEvent {
    name: String,
    value: u64,
}

#[derive(Debug, Deserialize, Serialize)]
struct TestPair {
    key: String,
    val: String,
}

#[derive(Event)]
struct MockEvent2 {
    name: String,
    value: TestPair,
}

#[test]
fn test_emit_event() {
    let test_struct = MockEvent {
        name: String::from("example"),
        value: 10,
    };

    let event = Event::emit_event("mock".to_string(), test_struct);
    assert_eq!(event.type_, "mock_MockEvent");
    assert_eq!(
        event.attributes,
        vec![
            EventAttribute {
                key: "name".to_string(),
                value: "\"example\"".to_string(),
            },
            EventAttribute {
                key: "value".to_string(),
                value: "10".to_string(),
            }
        ]
    );
    assert_eq!(event.attribute("value"), Some("10"));
    assert_eq!(event.attribute("missing"), None);
}

#[test]
fn test_emit_serde_event() {
    let test_struct = MockEvent2 {
        name: String::from("example"),
        value: TestPair {
            key: String::from("key"),
            val: String::from("100"),
        },
    };

    let event = Event::emit_serde_event("mock".to_string(), test_struct);
    assert_eq!(event.type_, "mock_MockEvent2");
    assert_eq!(
        event.attributes,
        vec![
            EventAttribute {
                key: "name".to_string(),
                value: "\"example\"".to_string(),
            },
            EventAttribute {
                key: "value".to_string(),
                value: r#"{"key":"key","val":"100"}"#.to_string(),
            }
        ]
    );
}
