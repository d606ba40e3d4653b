//! Cursor backends.
//!
//! Real backends (SendInput on Windows, XTest on Linux, CGEvent on macOS)
//! make OS API calls that need a live desktop session, actually move the
//! cursor on the machine running the tests, and cannot be observed from
//! test code.  [`MockCursorBackend`] replaces them with in-memory
//! recording: a simulated position, a `Mutex<Vec<...>>` per call kind, and
//! a `should_fail` switch for exercising error paths.
//!
//! The binary currently wires the mock in as well; a platform backend is
//! a drop-in `CursorBackend` implementation away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::application::apply_input::{ClickButton, CursorBackend, CursorError};

/// A backend that records all calls without performing OS API calls.
#[derive(Debug)]
pub struct MockCursorBackend {
    /// The simulated cursor position, updated by `move_to`.
    position: Mutex<(f64, f64)>,
    /// Records each (x, y) passed to `move_to`, in order.
    pub moves: Mutex<Vec<(f64, f64)>>,
    /// Records each button passed to `click`, in order.
    pub clicks: Mutex<Vec<ClickButton>>,
    /// When `true`, every method returns [`CursorError::Backend`].
    pub should_fail: AtomicBool,
}

impl MockCursorBackend {
    /// Creates a backend with the cursor at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Mutex::new((x, y)),
            moves: Mutex::new(Vec::new()),
            clicks: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    fn check(&self) -> Result<(), CursorError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(CursorError::Backend("mock failure".into()));
        }
        Ok(())
    }
}

impl Default for MockCursorBackend {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

impl CursorBackend for MockCursorBackend {
    fn position(&self) -> Result<(f64, f64), CursorError> {
        self.check()?;
        Ok(*self.position.lock().unwrap())
    }

    fn move_to(&self, x: f64, y: f64) -> Result<(), CursorError> {
        self.check()?;
        *self.position.lock().unwrap() = (x, y);
        self.moves.lock().unwrap().push((x, y));
        Ok(())
    }

    fn click(&self, button: ClickButton) -> Result<(), CursorError> {
        self.check()?;
        self.clicks.lock().unwrap().push(button);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
