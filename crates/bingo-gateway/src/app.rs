use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use bingo_core::{
    config::{BingoConfig, GatewayConfig},
    error::Result,
    session::SessionGate,
};
use bingo_protocol::{events, frames::Envelope};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::tts::TtsProvider;
use crate::ws::registry::ConnectionRegistry;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: BingoConfig,
    pub gate: SessionGate,
    pub clients: ConnectionRegistry,
    pub tts: Arc<dyn TtsProvider>,
}

impl AppState {
    pub fn new(config: BingoConfig, tts: Arc<dyn TtsProvider>) -> Self {
        Self {
            gate: SessionGate::new(config.session.secret_id.clone()),
            config,
            clients: ConnectionRegistry::new(),
            tts,
        }
    }

    /// Authorize the session and tell every connection it is live.
    /// One `session_status: started` broadcast per successful call.
    pub fn start_session(&self, secret_id: &str) -> Result<()> {
        self.gate.authorize(secret_id)?;
        let recipients = self.clients.broadcast(&Envelope::session_status(
            self.gate.status(),
            events::SESSION_ACTIVE_MESSAGE,
        ));
        info!(recipients, "session start broadcast");
        Ok(())
    }

    /// Register a new connection; its first frame is the current session status.
    pub fn join(&self) -> (String, mpsc::Receiver<String>) {
        let conn_id = uuid::Uuid::new_v4().to_string();
        let rx = self.clients.register(&conn_id, || {
            Envelope::session_status(self.gate.status(), events::STATUS_UPDATE_MESSAGE)
        });
        info!(conn_id = %conn_id, status = %self.gate.status(), "client connected");
        (conn_id, rx)
    }

    pub fn leave(&self, conn_id: &str) {
        self.clients.unregister(conn_id);
        info!(conn_id, "client disconnected");
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.gateway);
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/ws", get(crate::ws::connection::ws_handler))
        .route(
            "/start_session",
            post(crate::http::session::start_session_handler),
        )
        .route("/tts", get(crate::http::tts::tts_handler))
        .fallback(crate::http::frontend::frontend_handler)
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Any origin unless `gateway.cors_origins` lists some.
fn cors_layer(cfg: &GatewayConfig) -> CorsLayer {
    if cfg.cors_origins.is_empty() {
        return CorsLayer::very_permissive();
    }
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %o, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}


#[cfg(test)]
mod tests {
    use super::testing::{drain, state, SECRET};
    use bingo_core::error::BingoError;
    use serde_json::json;

    #[test]
    fn join_before_start_is_pending() {
        let app = state();
        let (_id, mut rx) = app.join();
        let frames = drain(&mut rx);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "session_status");
        assert_eq!(frames[0].data["status"], "pending");
        assert_eq!(frames[0].data["message"], "Session status update.");
    }

    #[test]
    fn wrong_secret_broadcasts_nothing() {
        let app = state();
        let (_id, mut rx) = app.join();
        drain(&mut rx);

        assert!(matches!(
            app.start_session("00000000"),
            Err(BingoError::Unauthorized)
        ));
        assert!(!app.gate.is_started());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn each_successful_start_broadcasts_once() {
        let app = state();
        let (_id, mut rx) = app.join();
        drain(&mut rx);

        app.start_session(SECRET).unwrap();
        let frames = drain(&mut rx);
        assert_eq!(frames.len(), 1);
        assert_eq!(
            frames[0].data,
            json!({"status": "started", "message": "Session is now active!"})
        );

        app.start_session(SECRET).unwrap();
        assert_eq!(drain(&mut rx).len(), 1);
        assert!(app.gate.is_started());
    }

    #[test]
    fn existing_and_late_joiners_see_started() {
        let app = state();
        let (_a, mut rx_a) = app.join();
        let (_b, mut rx_b) = app.join();
        assert_eq!(drain(&mut rx_a)[0].data["status"], "pending");
        assert_eq!(drain(&mut rx_b)[0].data["status"], "pending");

        app.start_session("13122025").unwrap();
        for rx in [&mut rx_a, &mut rx_b] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].event, "session_status");
            assert_eq!(frames[0].data["status"], "started");
        }

        let (_c, mut rx_c) = app.join();
        let frames = drain(&mut rx_c);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data["status"], "started");
    }

    #[test]
    fn leave_unregisters() {
        let app = state();
        let (id, _rx) = app.join();
        assert_eq!(app.clients.len(), 1);
        app.leave(&id);
        assert!(app.clients.is_empty());
    }
}
