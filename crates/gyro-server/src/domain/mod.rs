//! Server domain types.

pub mod config;

pub use config::{ListenerKind, ServerConfig};
