//! QR-scan debouncing.
//!
//! A camera fires its scan callback many times per second while a QR code
//! is in view, so a single physical "scan" arrives as a burst of identical
//! payloads.  [`ScanDebouncer`] collapses each burst to one acceptance by
//! ignoring everything inside a fixed window after an accepted scan.
//!
//! The current time is passed in rather than read from a clock, so tests
//! can drive the window deterministically.

use std::time::{Duration, Instant};

/// Suppression window applied after each accepted scan.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

/// Collapses bursts of scan callbacks into single acceptances.
#[derive(Debug, Clone)]
pub struct ScanDebouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl ScanDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Whether a scan arriving at `now` would be accepted.
    ///
    /// Does not change any state; pair with [`mark_accepted`] once the
    /// scan has actually been consumed.
    ///
    /// [`mark_accepted`]: ScanDebouncer::mark_accepted
    pub fn would_accept(&self, now: Instant) -> bool {
        match self.last_accepted {
            None => true,
            Some(last) => now.duration_since(last) >= self.window,
        }
    }

    /// Opens the suppression window starting at `now`.
    pub fn mark_accepted(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }

    /// Combined check-and-mark: returns `true` (and opens the window) if a
    /// scan at `now` is accepted, `false` if it falls inside the window.
    pub fn accept_at(&mut self, now: Instant) -> bool {
        if self.would_accept(now) {
            self.mark_accepted(now);
            true
        } else {
            false
        }
    }
}

impl Default for ScanDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
