//! Outbound event transports.
//!
//! The relay sends the same JSON events over one of two mutually exclusive
//! channels, chosen once at session start:
//!
//! - [`UdpTransport`] – one datagram per event, connectionless, nothing to
//!   tear down.  The default, because pointer motion tolerates loss far
//!   better than latency.
//! - [`WebSocketTransport`] – one text frame per event over a single
//!   long-lived connection.
//!
//! Neither transport retries, reconnects, or waits for acknowledgements;
//! the only fatal failure is the initial channel open.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use gyro_core::protocol::codec::WireError;
use gyro_core::{ConnectionTarget, PointerEvent};
use thiserror::Error;

pub mod recording;
pub mod udp;
pub mod ws;

pub use recording::RecordingTransport;
pub use udp::UdpTransport;
pub use ws::WebSocketTransport;

/// Errors from establishing or using a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The event could not be serialized for the wire.
    #[error("encode failed: {0}")]
    Encode(#[from] WireError),

    /// Socket-level I/O failure (bind, connect, or send).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket handshake or framing failure.
    #[error("WebSocket error: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),

    /// The transport was already closed.
    #[error("transport is closed")]
    Closed,
}

// ── Transport seam ────────────────────────────────────────────────────────────

/// An established outbound channel for pointer events.
///
/// Implementations encode with [`gyro_core::protocol::codec::encode_event`]
/// so both transports put byte-identical JSON on the wire.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Sends one event.  No retries; an error means this event is gone.
    async fn send(&self, event: &PointerEvent) -> Result<(), TransportError>;

    /// Tears the channel down.  Safe to call once; later sends fail with
    /// [`TransportError::Closed`] where the transport has state to lose.
    async fn close(&self) -> Result<(), TransportError>;
}

// ── Transport selection ───────────────────────────────────────────────────────

/// Which channel a session streams over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    #[default]
    Udp,
    WebSocket,
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(TransportKind::Udp),
            "ws" | "websocket" => Ok(TransportKind::WebSocket),
            other => Err(format!("unknown transport '{other}' (expected 'udp' or 'ws')")),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Udp => write!(f, "udp"),
            TransportKind::WebSocket => write!(f, "ws"),
        }
    }
}

/// Opens a transport of the requested kind to `target`.
///
/// # Errors
///
/// Returns [`TransportError`] if the socket cannot be set up or the
/// WebSocket handshake fails.  This is the one place a bad target that
/// slipped past parsing surfaces.
pub async fn connect(
    kind: TransportKind,
    target: &ConnectionTarget,
) -> Result<Box<dyn EventTransport>, TransportError> {
    match kind {
        TransportKind::Udp => Ok(Box::new(UdpTransport::connect(target).await?)),
        TransportKind::WebSocket => Ok(Box::new(WebSocketTransport::connect(target).await?)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_udp_and_ws() {
        assert_eq!("udp".parse::<TransportKind>().unwrap(), TransportKind::Udp);
        assert_eq!("ws".parse::<TransportKind>().unwrap(), TransportKind::WebSocket);
        assert_eq!(
            "websocket".parse::<TransportKind>().unwrap(),
            TransportKind::WebSocket
        );
    }

    #[test]
    fn test_kind_rejects_unknown_transport() {
        assert!("tcp".parse::<TransportKind>().is_err());
    }

    #[test]
    fn test_kind_default_is_udp() {
        assert_eq!(TransportKind::default(), TransportKind::Udp);
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [TransportKind::Udp, TransportKind::WebSocket] {
            assert_eq!(kind.to_string().parse::<TransportKind>().unwrap(), kind);
        }
    }
}
