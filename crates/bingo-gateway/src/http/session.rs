//! Session authorization — POST /start_session
//!
//! Request:  `{"secret_id": "..."}`
//! Response: `{"message": "Session started successfully!"}`
//! Error:    403 `{"detail": "Invalid Secret ID. Authorization Required."}`

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{api_error, ApiError};
use crate::app::AppState;

#[derive(Deserialize)]
pub struct StartSessionRequest {
    pub secret_id: String,
}

#[derive(Serialize)]
pub struct StartSessionReply {
    pub message: String,
}

/// POST /start_session — the only way the session gate opens.
pub async fn start_session_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<StartSessionReply>, ApiError> {
    state
        .start_session(&req.secret_id)
        .map_err(|e| api_error(&e))?;

    Ok(Json(StartSessionReply {
        message: "Session started successfully!".to_string(),
    }))
}
