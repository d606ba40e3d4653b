//! # gyro-server
//!
//! The desktop-side half of GyroPoint: advertises a pairing QR code,
//! listens for pointer events over UDP or WebSocket, and drives a cursor
//! backend with them.
//!
//! - **`domain`** – runtime configuration.
//! - **`application`** – the cursor-movement use case behind the
//!   [`application::apply_input::CursorBackend`] seam.
//! - **`infrastructure`** – listeners, the pairing QR, and cursor backends.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::apply_input::{ApplyInputUseCase, ClickButton, CursorBackend, CursorError};
pub use domain::config::{ListenerKind, ServerConfig};
