//! The cursor-movement use case.
//!
//! Received gyroscope samples move the real cursor relative to wherever it
//! currently is:
//!
//! ```text
//! new_y = y - sample.x * sensitivity
//! new_x = x - sample.z * sensitivity
//! ```
//!
//! The move is skipped unless at least one axis shifts by more than the
//! movement threshold, so hand tremor does not make the cursor shimmer.
//! Clicks pass straight through.
//!
//! Backend failures are logged and swallowed: one failed OS call must not
//! take the listener down, and the next event usually succeeds.

use std::sync::Arc;

use gyro_core::PointerEvent;
use thiserror::Error;
use tracing::{debug, warn};

/// Which mouse button a click event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    Left,
    Right,
}

/// Error type for cursor backend operations.
#[derive(Debug, Error)]
pub enum CursorError {
    /// The underlying OS call failed.
    #[error("cursor backend failure: {0}")]
    Backend(String),
}

/// Abstraction over whatever actually owns the cursor.
///
/// Production backends wrap platform APIs (SendInput, XTest, CGEvent) and
/// need a real desktop session; [`crate::infrastructure::cursor::MockCursorBackend`]
/// records calls in memory for tests and headless runs.
pub trait CursorBackend: Send + Sync {
    /// Current cursor position in screen pixels.
    fn position(&self) -> Result<(f64, f64), CursorError>;

    /// Moves the cursor to an absolute position.
    fn move_to(&self, x: f64, y: f64) -> Result<(), CursorError>;

    /// Presses and releases a button.
    fn click(&self, button: ClickButton) -> Result<(), CursorError>;
}

/// Applies decoded pointer events to a cursor backend.
pub struct ApplyInputUseCase {
    backend: Arc<dyn CursorBackend>,
    sensitivity: f64,
    movement_threshold: f64,
}

impl ApplyInputUseCase {
    pub fn new(backend: Arc<dyn CursorBackend>, sensitivity: f64, movement_threshold: f64) -> Self {
        Self {
            backend,
            sensitivity,
            movement_threshold,
        }
    }

    /// Handles one received event.  Never fails; backend errors are logged.
    pub fn handle_event(&self, event: &PointerEvent) {
        let result = match event {
            PointerEvent::GyroData(sample) => self.apply_motion(sample.x, sample.z),
            PointerEvent::LeftClick => self.backend.click(ClickButton::Left),
            PointerEvent::RightClick => self.backend.click(ClickButton::Right),
        };
        if let Err(e) = result {
            warn!("failed to apply {} event: {e}", event.kind());
        }
    }

    fn apply_motion(&self, pitch: f64, yaw: f64) -> Result<(), CursorError> {
        let (x, y) = self.backend.position()?;
        let new_y = y - pitch * self.sensitivity;
        let new_x = x - yaw * self.sensitivity;

        if (new_x - x).abs() > self.movement_threshold
            || (new_y - y).abs() > self.movement_threshold
        {
            self.backend.move_to(new_x, new_y)?;
        } else {
            debug!("motion below threshold; cursor held still");
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
