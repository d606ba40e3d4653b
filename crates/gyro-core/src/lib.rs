//! # gyro-core
//!
//! Shared library for GyroPoint containing the JSON wire protocol and the
//! pure pointer domain logic.
//!
//! This crate is used by both the relay (sender) and server (receiver)
//! applications.  It has zero dependencies on OS APIs, sensors, or network
//! sockets.
//!
//! # Architecture overview
//!
//! GyroPoint turns a phone into a wireless pointer: the relay samples a
//! gyroscope, maintains a local clamped pointer position for on-screen
//! feedback, and streams motion and click events to a desktop server that
//! moves the real cursor.
//!
//! This crate (`gyro-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – What travels over the network.  Events are JSON text
//!   objects tagged by an `"event"` field; motion events carry a `"data"`
//!   object, clicks carry nothing else.  The same payloads are used whether
//!   the transport is UDP datagrams or a WebSocket.
//!
//! - **`domain`** – Pure logic with no OS dependencies: the `host:port`
//!   pairing-target parser, the clamped pointer model, sample-rate presets,
//!   and the QR-scan debouncer.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/protocol/mod.rs).
pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `gyro_core::PointerEvent` instead of `gyro_core::protocol::messages::PointerEvent`.
pub use domain::debounce::ScanDebouncer;
pub use domain::pointer::{PointerBounds, PointerModel, PointerPosition};
pub use domain::rate::SampleRate;
pub use domain::target::{ConnectionTarget, TargetError};
pub use protocol::codec::{decode_datagram, decode_event, encode_event, WireError};
pub use protocol::messages::{MotionSample, PointerEvent};
