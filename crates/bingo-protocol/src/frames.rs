use bingo_core::types::SessionStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events;

/// Every WS text frame, both directions.
/// Wire: `{ "event": "number_drawn", "data": { "number": 42 } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: impl Serialize) -> Self {
        Self {
            event: event.into(),
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }

    /// `session_status` with the given status and human-readable message.
    pub fn session_status(status: SessionStatus, message: &str) -> Self {
        Self::new(
            events::SESSION_STATUS,
            SessionStatusPayload {
                status,
                message: message.to_string(),
            },
        )
    }

    /// `error` sent back to a single connection.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            events::ERROR,
            ErrorPayload {
                message: message.into(),
            },
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Interpret an inbound envelope as a client event.
    pub fn into_client_event(self) -> ClientEvent {
        match self.event.as_str() {
            events::MASTER_DRAW => ClientEvent::MasterDraw(self.data),
            events::PLAYER_WIN => ClientEvent::PlayerWin(self.data),
            _ => ClientEvent::Unknown(self.event),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatusPayload {
    pub status: SessionStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Client → server events. Payloads stay raw so they are relayed untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    MasterDraw(Value),
    PlayerWin(Value),
    Unknown(String),
}

impl ClientEvent {
    pub fn name(&self) -> &str {
        match self {
            ClientEvent::MasterDraw(_) => events::MASTER_DRAW,
            ClientEvent::PlayerWin(_) => events::PLAYER_WIN,
            ClientEvent::Unknown(name) => name,
        }
    }
}
