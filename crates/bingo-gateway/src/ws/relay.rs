use bingo_core::{
    error::{BingoError, Result},
    types::{DrawEvent, WinClaimEvent},
};
use bingo_protocol::{
    events,
    frames::{ClientEvent, Envelope},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::app::AppState;

/// Route one client event. Gated events go to everyone once the session has
/// started; before that the sender alone gets an `error` frame.
///
/// Returns the number of connections the relayed frame was queued for.
pub fn dispatch(app: &AppState, conn_id: &str, event: ClientEvent) -> Result<usize> {
    match event {
        ClientEvent::MasterDraw(data) => {
            match serde_json::from_value::<DrawEvent>(data.clone()) {
                Ok(draw) => info!(conn_id, number = draw.number, "number drawn"),
                Err(e) => {
                    warn!(conn_id, error = %e, "master_draw payload has unexpected shape")
                }
            }
            relay_if_started(app, conn_id, events::NUMBER_DRAWN, data)
        }

        ClientEvent::PlayerWin(data) => {
            match serde_json::from_value::<WinClaimEvent>(data.clone()) {
                Ok(claim) => {
                    info!(conn_id, name = %claim.name, kind = %claim.win_type, "win claimed")
                }
                Err(e) => {
                    warn!(conn_id, error = %e, "player_win payload has unexpected shape")
                }
            }
            relay_if_started(app, conn_id, events::BINGO_WIN, data)
        }

        ClientEvent::Unknown(name) => {
            warn!(conn_id, event = %name, "ignoring unknown event");
            Err(BingoError::Protocol(format!("unknown event '{name}'")))
        }
    }
}

fn relay_if_started(
    app: &AppState,
    conn_id: &str,
    outbound: &str,
    data: Value,
) -> Result<usize> {
    // read per event: the session may start while this connection is open
    if !app.gate.is_started() {
        warn!(conn_id, event = outbound, "rejected: session not started");
        let err = BingoError::SessionNotStarted;
        app.clients.send_to(conn_id, &Envelope::error(err.to_string()));
        return Err(err);
    }
    Ok(app.clients.broadcast(&Envelope::new(outbound, data)))
}
