use axum::{http::StatusCode, Json};
use bingo_core::error::BingoError;
use serde::{Deserialize, Serialize};

pub mod frontend;
pub mod health;
pub mod session;
pub mod tts;

/// Error body shared by the HTTP endpoints: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<ErrorDetail>);

/// 403 for a wrong secret, 500 for anything else (upstream TTS failures).
/// The message passes through as `detail`.
pub fn api_error(err: &BingoError) -> ApiError {
    let status = match err {
        BingoError::Unauthorized => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorDetail {
            detail: err.to_string(),
        }),
    )
}
