//! The local pointer model: a clamped position the relay keeps for on-screen
//! feedback while streaming.
//!
//! The relay does not know where the desktop cursor really is; it maintains
//! its own estimate inside a fixed square region so the user gets immediate
//! visual feedback on the phone.  Each gyroscope sample nudges the position:
//!
//! ```text
//! top'  = clamp(top  - x * sensitivity)
//! left' = clamp(left - z * sensitivity)
//! ```
//!
//! Pitch (`x`) moves the pointer vertically, yaw (`z`) horizontally; the
//! roll axis (`y`) is ignored.  The subtraction makes tilting the phone's
//! top edge away from the user move the pointer up, matching how people
//! intuitively "aim" with a phone.

use crate::protocol::messages::MotionSample;

/// Multiplier applied to each sample before it moves the pointer.
pub const DEFAULT_SENSITIVITY: f64 = 10.0;

/// Side length of the default feedback region, in display units.
pub const DEFAULT_REGION: f64 = 400.0;

// ── Position and bounds ───────────────────────────────────────────────────────

/// A pointer position inside the feedback region.
///
/// `top` grows downward and `left` grows rightward, matching screen
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub top: f64,
    pub left: f64,
}

impl PointerPosition {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// The square region positions are clamped to: `[0, max]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerBounds {
    pub max: f64,
}

impl PointerBounds {
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    /// The centre of the region, where the pointer starts.
    pub fn center(&self) -> PointerPosition {
        PointerPosition::new(self.max / 2.0, self.max / 2.0)
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max)
    }
}

impl Default for PointerBounds {
    fn default() -> Self {
        Self { max: DEFAULT_REGION }
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

/// Computes the next position from one sample, clamped to `bounds`.
///
/// This is the whole movement rule; [`PointerModel`] just threads state
/// through it.
pub fn step(
    position: PointerPosition,
    sample: &MotionSample,
    sensitivity: f64,
    bounds: PointerBounds,
) -> PointerPosition {
    PointerPosition {
        top: bounds.clamp(position.top - sample.x * sensitivity),
        left: bounds.clamp(position.left - sample.z * sensitivity),
    }
}

/// Mutable pointer state: position plus the tuning that moves it.
#[derive(Debug, Clone)]
pub struct PointerModel {
    position: PointerPosition,
    sensitivity: f64,
    bounds: PointerBounds,
}

impl PointerModel {
    /// Creates a model with the pointer at the centre of `bounds`.
    pub fn new(sensitivity: f64, bounds: PointerBounds) -> Self {
        Self {
            position: bounds.center(),
            sensitivity,
            bounds,
        }
    }

    /// Current position.
    pub fn position(&self) -> PointerPosition {
        self.position
    }

    /// Advances the pointer by one sample and returns the new position.
    pub fn apply(&mut self, sample: &MotionSample) -> PointerPosition {
        self.position = step(self.position, sample, self.sensitivity, self.bounds);
        self.position
    }
}

impl Default for PointerModel {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVITY, PointerBounds::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
