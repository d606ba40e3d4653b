//! JSON event types for the pointer wire protocol.
//!
//! Every event is a JSON object with an `"event"` field that identifies the
//! variant.  Motion events carry their payload in a nested `"data"` object;
//! click events carry nothing besides the discriminant.  For example:
//!
//! ```json
//! {"event":"gyroData","data":{"x":0.12,"y":-0.03,"z":0.44}}
//! {"event":"leftClick"}
//! {"event":"rightClick"}
//! ```
//!
//! Serde's `#[serde(tag = "event", content = "data")]` attribute produces
//! exactly this shape: adjacent tagging puts the payload under `"data"`, and
//! unit variants omit the `"data"` key entirely.
//!
//! The same JSON text is sent regardless of transport — one event per UDP
//! datagram, or one event per WebSocket text frame.

use serde::{Deserialize, Serialize};

// ── Motion sample ─────────────────────────────────────────────────────────────

/// One gyroscope reading: angular velocity around each axis in rad/s.
///
/// Axis convention (phone held in portrait, screen facing the user):
///
/// - `x` – pitch: tilting the top edge towards/away from the user.
///   Drives the pointer's vertical movement.
/// - `y` – roll: unused by the pointer model but kept on the wire so the
///   receiver sees the full sensor reading.
/// - `z` – yaw: twisting the phone left/right.  Drives the pointer's
///   horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// ── Pointer events ────────────────────────────────────────────────────────────

/// All events the relay can send to the server.
///
/// # Serde representation
///
/// ```json
/// {"event":"gyroData","data":{"x":0.1,"y":0.2,"z":0.3}}
/// {"event":"leftClick"}
/// {"event":"rightClick"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
// `tag = "event"` names the discriminant field; `content = "data"` nests the
// variant payload under `"data"`.  Unit variants serialize with no `"data"`.
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PointerEvent {
    /// A gyroscope sample.  Sent continuously while streaming is active, at
    /// the configured sample rate.
    GyroData(MotionSample),

    /// The user pressed the left (primary) click button.
    LeftClick,

    /// The user pressed the right (secondary) click button.
    RightClick,
}

impl PointerEvent {
    /// Returns a short name for the variant, for log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PointerEvent::GyroData(_) => "gyroData",
            PointerEvent::LeftClick => "leftClick",
            PointerEvent::RightClick => "rightClick",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
