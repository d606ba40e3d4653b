//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments (preferred for production) or
//! from sensible defaults (useful for local development and tests).
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the server easy to embed in
//! tests; the infrastructure layer is responsible for populating the struct
//! from CLI args or environment variables.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Which listener the server runs.  A server speaks exactly one of the two
/// protocols; relays pick the matching transport from the pairing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerKind {
    #[default]
    Udp,
    WebSocket,
}

impl FromStr for ListenerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(ListenerKind::Udp),
            "ws" | "websocket" => Ok(ListenerKind::WebSocket),
            other => Err(format!("unknown listener '{other}' (expected 'udp' or 'ws')")),
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerKind::Udp => write!(f, "udp"),
            ListenerKind::WebSocket => write!(f, "ws"),
        }
    }
}

/// All runtime configuration for the GyroPoint server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port the event listener binds to.
    ///
    /// `0.0.0.0` accepts events from any interface; the pairing payload
    /// advertises the LAN address instead, since relays cannot reach
    /// `0.0.0.0`.
    pub bind_addr: SocketAddr,

    /// Which protocol the listener speaks.
    pub listener: ListenerKind,

    /// Multiplier applied to gyroscope readings before they move the
    /// cursor.  Larger than the relay's local-feedback sensitivity because
    /// a desktop screen is much bigger than the phone's feedback region.
    pub sensitivity: f64,

    /// Minimum per-axis movement (in pixels) below which a sample is
    /// ignored.  Filters out hand tremor so the cursor rests still.
    pub movement_threshold: f64,
}

impl Default for ServerConfig {
    /// Returns a `ServerConfig` suitable for local development.
    ///
    /// | Field              | Default         |
    /// |--------------------|-----------------|
    /// | bind_addr          | `0.0.0.0:49152` |
    /// | listener           | `udp`           |
    /// | sensitivity        | `20.0`          |
    /// | movement_threshold | `0.7`           |
    fn default() -> Self {
        Self {
            // Safe: a compile-time-known valid socket address string.
            bind_addr: "0.0.0.0:49152".parse().unwrap(),
            listener: ListenerKind::Udp,
            sensitivity: 20.0,
            movement_threshold: 0.7,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_49152() {
        // Arrange / Act
        let cfg = ServerConfig::default();
        // Assert
        assert_eq!(cfg.bind_addr.port(), 49152);
    }

    #[test]
    fn test_default_listener_is_udp() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.listener, ListenerKind::Udp);
    }

    #[test]
    fn test_default_sensitivity_is_20() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.sensitivity, 20.0);
    }

    #[test]
    fn test_default_movement_threshold() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.movement_threshold, 0.7);
    }

    #[test]
    fn test_listener_kind_parses_both_protocols() {
        assert_eq!("udp".parse::<ListenerKind>().unwrap(), ListenerKind::Udp);
        assert_eq!("ws".parse::<ListenerKind>().unwrap(), ListenerKind::WebSocket);
        assert_eq!(
            "WebSocket".parse::<ListenerKind>().unwrap(),
            ListenerKind::WebSocket
        );
    }

    #[test]
    fn test_listener_kind_rejects_unknown_protocol() {
        assert!("tcp".parse::<ListenerKind>().is_err());
    }

    #[test]
    fn test_config_custom_values_are_stored() {
        let cfg = ServerConfig {
            bind_addr: "127.0.0.1:9000".parse().unwrap(),
            listener: ListenerKind::WebSocket,
            sensitivity: 5.0,
            movement_threshold: 1.5,
        };
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.listener, ListenerKind::WebSocket);
        assert_eq!(cfg.sensitivity, 5.0);
        assert_eq!(cfg.movement_threshold, 1.5);
    }
}
