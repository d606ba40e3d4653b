//! UDP transport: one JSON datagram per event.

use async_trait::async_trait;
use gyro_core::protocol::codec::encode_event;
use gyro_core::{ConnectionTarget, PointerEvent};
use tokio::net::UdpSocket;

use super::{EventTransport, TransportError};

/// A UDP socket bound to an ephemeral local port and connected to the
/// server, so `send` needs no per-packet address.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds an ephemeral socket and connects it to `target`.
    ///
    /// "Connecting" a UDP socket only fixes the peer address; no packets
    /// are exchanged, so this succeeds even when no server is listening.
    /// A dead target shows up later as send errors (or not at all).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the bind fails or the target
    /// hostname does not resolve.
    pub async fn connect(target: &ConnectionTarget) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect((target.host.as_str(), target.port)).await?;
        Ok(Self { socket })
    }
}

#[async_trait]
impl EventTransport for UdpTransport {
    async fn send(&self, event: &PointerEvent) -> Result<(), TransportError> {
        let json = encode_event(event)?;
        self.socket.send(json.as_bytes()).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        // Nothing to tear down; the socket closes when dropped.
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
