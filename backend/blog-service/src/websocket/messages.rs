/// Message types for the broadcast channel
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BroadcastMessage {
    /// A platform activity event, e.g. "alice added a new post: Hello"
    Event { message: String, timestamp: i64 },

    /// Connection established confirmation
    Connected { connection_id: Uuid, timestamp: i64 },

    /// Heartbeat from server
    Ping { timestamp: i64 },
}

impl BroadcastMessage {
    /// Create an activity event
    pub fn event(message: impl Into<String>) -> Self {
        BroadcastMessage::Event {
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Create a connection confirmation
    pub fn connected(connection_id: Uuid) -> Self {
        BroadcastMessage::Connected {
            connection_id,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Create a ping message
    pub fn ping() -> Self {
        BroadcastMessage::Ping {
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let msg = BroadcastMessage::event("alice liked the post: Hello");
        let json = msg.to_json().unwrap();
        assert_eq!(BroadcastMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn event_json_is_tagged() {
        let json = BroadcastMessage::event("x").to_json().unwrap();
        assert!(json.contains("\"type\":\"Event\""));
    }
}
