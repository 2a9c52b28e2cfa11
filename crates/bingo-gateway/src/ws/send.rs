use axum::extract::ws::{Message, WebSocket};
use futures_util::SinkExt;

pub type WsSink = futures_util::stream::SplitSink<WebSocket, Message>;

/// Push one already-serialized frame over the WS connection.
pub async fn text(tx: &mut WsSink, payload: String) -> Result<(), axum::Error> {
    tx.send(Message::Text(payload.into()))
        .await
        .map_err(axum::Error::new)
}
