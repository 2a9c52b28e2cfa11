use bingo_core::{
    config::MAX_PAYLOAD_BYTES,
    error::{BingoError, Result},
};
use bingo_protocol::frames::Envelope;
use tracing::{debug, warn};

use crate::app::AppState;
use crate::ws::relay;

/// Process one inbound WS text frame.
///
/// Only an oversized frame is an error; the caller closes the connection on it.
/// Malformed frames and rejected actions are logged and the connection stays up.
pub fn handle(conn_id: &str, text: &str, app: &AppState) -> Result<()> {
    if text.len() > MAX_PAYLOAD_BYTES {
        return Err(BingoError::PayloadTooLarge {
            size: text.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }

    let frame: Envelope = match serde_json::from_str(text) {
        Ok(f) => f,
        Err(e) => {
            warn!(conn_id, error = %e, "malformed frame");
            return Ok(());
        }
    };

    let event = frame.into_client_event();
    let name = event.name().to_string();
    match relay::dispatch(app, conn_id, event) {
        Ok(recipients) => debug!(conn_id, event = %name, recipients, "relayed"),
        Err(e) => debug!(conn_id, event = %name, code = e.code(), "not relayed"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{drain, state, SECRET};

    #[test]
    fn malformed_json_keeps_connection() {
        let app = state();
        let (conn, mut rx) = app.join();
        drain(&mut rx);

        assert!(handle(&conn, "not json", &app).is_ok());
        assert!(handle(&conn, r#"{"data":{"number":3}}"#, &app).is_ok());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn oversized_frame_is_rejected() {
        let app = state();
        let (conn, _rx) = app.join();
        let big = "x".repeat(MAX_PAYLOAD_BYTES + 1);
        assert!(matches!(
            handle(&conn, &big, &app),
            Err(BingoError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn text_frame_is_relayed() {
        let app = state();
        let (conn, mut rx) = app.join();
        app.start_session(SECRET).unwrap();
        drain(&mut rx);

        let text = r#"{"event":"master_draw","data":{"number":7}}"#;
        handle(&conn, text, &app).unwrap();
        let frames = drain(&mut rx);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "number_drawn");
        assert_eq!(frames[0].data["number"], 7);
    }
}
