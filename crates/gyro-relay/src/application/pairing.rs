//! The pairing flow: scanned payload in, connection target out.
//!
//! Scan callbacks arrive in bursts (a camera re-reads the same QR code many
//! times per second), so the flow runs each payload through a
//! [`ScanDebouncer`] before parsing.  A suppressed scan is not an error;
//! the caller simply gets `None` and moves on.
//!
//! A payload that fails to parse does **not** open the suppression window:
//! a glare-corrupted read a moment before a clean one must not lock the
//! clean read out.

use std::time::Instant;

use gyro_core::{ConnectionTarget, ScanDebouncer, TargetError};
use tracing::debug;

/// Turns raw scan payloads into at most one [`ConnectionTarget`] per
/// debounce window.
#[derive(Debug, Default)]
pub struct PairingFlow {
    debouncer: ScanDebouncer,
}

impl PairingFlow {
    pub fn new(debouncer: ScanDebouncer) -> Self {
        Self { debouncer }
    }

    /// Handles one scan callback.
    ///
    /// Returns `Ok(None)` when the scan falls inside the suppression
    /// window, `Ok(Some(target))` for an accepted scan (which opens the
    /// window), and `Err` when the payload is not a valid target.
    pub fn handle_scan(
        &mut self,
        payload: &str,
        now: Instant,
    ) -> Result<Option<ConnectionTarget>, TargetError> {
        if !self.debouncer.would_accept(now) {
            debug!("scan suppressed inside debounce window");
            return Ok(None);
        }

        let target = ConnectionTarget::parse(payload)?;
        self.debouncer.mark_accepted(now);
        Ok(Some(target))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
