use std::sync::atomic::{AtomicBool, Ordering};

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::error::{BingoError, Result};
use crate::types::SessionStatus;

/// Process-wide "has the game started" flag.
///
/// Starts `false`, flips to `true` on the first correct secret and stays there.
/// `authorize` is the only writer; everything else reads.
pub struct SessionGate {
    secret_id: String,
    started: AtomicBool,
}

impl SessionGate {
    pub fn new(secret_id: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            started: AtomicBool::new(false),
        }
    }

    /// Compare `submitted` against the configured secret and start the session
    /// on a match. Repeating a correct secret is a no-op for the flag.
    pub fn authorize(&self, submitted: &str) -> Result<()> {
        let matches: bool = submitted.as_bytes().ct_eq(self.secret_id.as_bytes()).into();
        if !matches {
            warn!("session authorization rejected");
            return Err(BingoError::Unauthorized);
        }

        let was_started = self.started.swap(true, Ordering::SeqCst);
        if was_started {
            info!("session already started, re-authorized");
        } else {
            info!("bingo session authorized and started");
        }
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus::from_started(self.is_started())
    }
}
