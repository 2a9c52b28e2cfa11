use axum::{
    extract::{ws::Message, ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::warn;

use crate::app::AppState;
use crate::ws::{message, send};

/// Axum handler — upgrades HTTP to WebSocket at GET /ws.
/// No auth here: anyone may watch, the session gate only guards actions.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| run_connection(socket, state))
}

/// Per-connection event loop — lives for the entire WS session.
async fn run_connection(socket: WebSocket, state: Arc<AppState>) {
    // first queued frame is the current session status
    let (conn_id, mut outbound) = state.join();
    let (mut tx, mut rx) = socket.split();

    loop {
        tokio::select! {
            msg = rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = message::handle(&conn_id, text.as_str(), &state) {
                            warn!(conn_id = %conn_id, error = %e, "closing connection");
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = tx.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!(conn_id = %conn_id, error = %e, "ws read error");
                        break;
                    }
                    _ => {}
                }
            }

            frame = outbound.recv() => {
                let Some(payload) = frame else { break };
                if send::text(&mut tx, payload).await.is_err() {
                    break;
                }
            }
        }
    }

    state.leave(&conn_id);
}
