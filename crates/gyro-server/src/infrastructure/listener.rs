//! Event listeners: the network-facing side of the server.
//!
//! Both listeners decode incoming traffic into [`PointerEvent`]s and
//! forward them on an mpsc channel; the dispatch loop in `main.rs` is the
//! single consumer.  Malformed input is logged and skipped — a stray
//! packet from something that is not a relay must never take the listener
//! down.  Shutdown follows the shared-flag pattern: every blocking wait is
//! wrapped in a 200 ms timeout so the loop can notice `running` clearing.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};

use gyro_core::protocol::codec::{decode_datagram, decode_event, MAX_DATAGRAM_LEN};
use gyro_core::PointerEvent;

// ── UDP listener ──────────────────────────────────────────────────────────────

/// Runs the UDP receive loop until `running` is cleared.
///
/// The socket is bound by the caller so tests (and the pairing payload)
/// can learn the actual port when binding to port 0.
pub async fn run_udp_listener(
    socket: UdpSocket,
    events: mpsc::Sender<PointerEvent>,
    running: Arc<AtomicBool>,
) {
    let mut buf = [0u8; MAX_DATAGRAM_LEN];

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping UDP listener");
            break;
        }

        // Short timeout so the loop can check the flag even when idle.
        match timeout(Duration::from_millis(200), socket.recv_from(&mut buf)).await {
            Ok(Ok((len, peer))) => match decode_datagram(&buf[..len]) {
                Ok(event) => {
                    if events.send(event).await.is_err() {
                        debug!("event channel closed; stopping UDP listener");
                        break;
                    }
                }
                Err(e) => warn!("malformed datagram from {peer}: {e}"),
            },
            Ok(Err(e)) => {
                // Transient receive error; keep listening.
                error!("UDP receive error: {e}");
            }
            Err(_) => {
                // Timeout — no traffic in the last 200 ms.
            }
        }
    }
}

// ── WebSocket listener ────────────────────────────────────────────────────────

/// Runs the WebSocket accept loop until `running` is cleared.
///
/// Each accepted connection gets its own Tokio task, so one slow relay
/// never blocks another.  A relay disconnecting is logged and forgotten;
/// it simply pairs and connects again.
pub async fn run_ws_listener(
    listener: TcpListener,
    events: mpsc::Sender<PointerEvent>,
    running: Arc<AtomicBool>,
) {
    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping WebSocket listener");
            break;
        }

        match timeout(Duration::from_millis(200), listener.accept()).await {
            Ok(Ok((stream, peer))) => {
                info!("relay connected from {peer}");
                let events = events.clone();
                tokio::spawn(async move {
                    handle_relay_session(stream, peer, events).await;
                });
            }
            Ok(Err(e)) => {
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout — loop back to check the flag.
            }
        }
    }
}

/// Runs one relay WebSocket session: handshake, then decode text frames
/// until the relay hangs up.
async fn handle_relay_session(
    stream: TcpStream,
    peer: SocketAddr,
    events: mpsc::Sender<PointerEvent>,
) {
    let mut ws = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed with {peer}: {e}");
            return;
        }
    };

    loop {
        let msg = match ws.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("session {peer}: closed normally");
                break;
            }
            Some(Err(e)) => {
                warn!("session {peer}: WebSocket error: {e}");
                break;
            }
            None => {
                debug!("session {peer}: stream ended");
                break;
            }
        };

        match msg {
            WsMessage::Text(text) => match decode_event(&text) {
                Ok(event) => {
                    if events.send(event).await.is_err() {
                        debug!("session {peer}: event channel closed");
                        break;
                    }
                }
                Err(e) => {
                    // One bad frame is not worth the session.
                    warn!("session {peer}: malformed event: {e}");
                }
            },
            WsMessage::Binary(_) => {
                warn!("session {peer}: unexpected binary frame (ignored)");
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) => {
                // Protocol-level keepalive; tokio-tungstenite replies for us.
            }
            WsMessage::Close(_) => {
                debug!("session {peer}: Close frame received");
                break;
            }
            WsMessage::Frame(_) => {
                debug!("session {peer}: raw frame (ignored)");
            }
        }
    }

    info!("relay {peer} disconnected");
}
