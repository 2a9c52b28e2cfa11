use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the current game session has been authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Pending,
}

impl SessionStatus {
    pub fn from_started(started: bool) -> Self {
        if started {
            SessionStatus::Started
        } else {
            SessionStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Started => "started",
            SessionStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number pulled by the master client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEvent {
    pub number: i64,
}

/// Pattern a player claims to have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinType {
    Row,
    Diagonal,
    Full,
}

impl fmt::Display for WinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinType::Row => write!(f, "row"),
            WinType::Diagonal => write!(f, "diagonal"),
            WinType::Full => write!(f, "full"),
        }
    }
}

/// A player's bingo claim. Not checked against any card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinClaimEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub win_type: WinType,
}
