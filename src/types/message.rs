use serde::{Deserialize, Serialize};

/// One `(event, payload)` message unit exchanged over the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventFrame {
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl EventFrame {
    pub fn new(event: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_frame() {
        let frame = EventFrame::new("points:awarded", serde_json::json!({"amount": 50}));
        assert_eq!(frame.event, "points:awarded");
        assert_eq!(frame.payload["amount"], 50);
    }

    #[test]
    fn test_payload_defaults_to_null_when_absent() {
        let frame: EventFrame = serde_json::from_str(r#"{"event":"system:welcome"}"#).unwrap();
        assert_eq!(frame.event, "system:welcome");
        assert_eq!(frame.payload, serde_json::Value::Null);
    }

    #[test]
    fn test_event_frame_round_trip() {
        let frame = EventFrame::new(
            "challenge:completed",
            serde_json::json!({"challenge_id": 42, "user": "ada"}),
        );

        let serialized = serde_json::to_string(&frame).unwrap();
        let deserialized: EventFrame = serde_json::from_str(&serialized).unwrap();

        assert_eq!(frame, deserialized);
    }
}
