use thiserror::Error;

#[derive(Debug, Error)]
pub enum BingoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid Secret ID. Authorization Required.")]
    Unauthorized,

    #[error("Game has not started yet. Session ID required.")]
    SessionNotStarted,

    #[error("{0}")]
    UpstreamService(String),

    #[error("WebSocket protocol error: {0}")]
    Protocol(String),

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

impl BingoError {
    /// Short error code string for logs and wire errors.
    pub fn code(&self) -> &'static str {
        match self {
            BingoError::Config(_) => "CONFIG_ERROR",
            BingoError::Unauthorized => "UNAUTHORIZED",
            BingoError::SessionNotStarted => "SESSION_NOT_STARTED",
            BingoError::UpstreamService(_) => "UPSTREAM_SERVICE_FAILURE",
            BingoError::Protocol(_) => "PROTOCOL_ERROR",
            BingoError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

pub type Result<T> = std::result::Result<T, BingoError>;
