use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::{api_error, ApiError};
use crate::app::AppState;

#[derive(Deserialize)]
pub struct TtsQuery {
    pub text: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

/// GET /tts?text=..&lang=.. — speech audio for the caller's text.
pub async fn tts_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TtsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = state
        .tts
        .synthesize(&query.text, &query.lang)
        .await
        .map_err(|e| {
            warn!(error = %e, "tts failed");
            api_error(&e)
        })?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}
