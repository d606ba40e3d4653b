//! WebSocket transport: one JSON text frame per event over a single
//! long-lived connection.

use async_trait::async_trait;
use futures_util::SinkExt;
use gyro_core::protocol::codec::encode_event;
use gyro_core::{ConnectionTarget, PointerEvent};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message as WsMessage},
    MaybeTlsStream, WebSocketStream,
};

use super::{EventTransport, TransportError};

/// A connected WebSocket to the server.
///
/// The stream sits behind an async `Mutex` because `send` takes `&self`
/// (the session and the click path share the transport) while the sink
/// needs `&mut`.  Contention is negligible: one event in flight at a time.
pub struct WebSocketTransport {
    stream: Mutex<Option<WebSocketStream<MaybeTlsStream<TcpStream>>>>,
}

impl WebSocketTransport {
    /// Performs the HTTP upgrade handshake with `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Ws`] if the TCP connect or the handshake
    /// fails.  There is no retry; a dead server fails the session here.
    pub async fn connect(target: &ConnectionTarget) -> Result<Self, TransportError> {
        let (stream, _response) = connect_async(target.ws_url()).await?;
        Ok(Self {
            stream: Mutex::new(Some(stream)),
        })
    }
}

#[async_trait]
impl EventTransport for WebSocketTransport {
    async fn send(&self, event: &PointerEvent) -> Result<(), TransportError> {
        let json = encode_event(event)?;
        let mut guard = self.stream.lock().await;
        let ws = guard.as_mut().ok_or(TransportError::Closed)?;
        ws.send(WsMessage::Text(json)).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        let mut guard = self.stream.lock().await;
        if let Some(mut ws) = guard.take() {
            // The server may have hung up first; a close on an already
            // closed stream is not a failure worth reporting.
            match ws.close(None).await {
                Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    /// Spawns a single-session loopback WebSocket server that collects text
    /// frames until the client closes, then returns them.
    async fn spawn_collecting_server() -> (
        ConnectionTarget,
        tokio::task::JoinHandle<Vec<String>>,
    ) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            let mut frames = Vec::new();
            while let Some(Ok(msg)) = ws.next().await {
                match msg {
                    WsMessage::Text(text) => frames.push(text),
                    WsMessage::Close(_) => break,
                    _ => {}
                }
            }
            frames
        });
        let target = ConnectionTarget::parse(&addr.to_string()).unwrap();
        (target, handle)
    }

    #[tokio::test]
    async fn test_ws_sends_events_as_text_frames() {
        // Arrange
        let (target, server) = spawn_collecting_server().await;
        let transport = WebSocketTransport::connect(&target).await.unwrap();

        // Act
        transport.send(&PointerEvent::LeftClick).await.unwrap();
        transport.send(&PointerEvent::RightClick).await.unwrap();
        transport.close().await.unwrap();

        // Assert
        let frames = server.await.unwrap();
        assert_eq!(frames, vec![
            r#"{"event":"leftClick"}"#.to_string(),
            r#"{"event":"rightClick"}"#.to_string(),
        ]);
    }

    #[tokio::test]
    async fn test_ws_send_after_close_reports_closed() {
        // Arrange
        let (target, server) = spawn_collecting_server().await;
        let transport = WebSocketTransport::connect(&target).await.unwrap();
        transport.close().await.unwrap();

        // Act
        let result = transport.send(&PointerEvent::LeftClick).await;

        // Assert
        assert!(matches!(result, Err(TransportError::Closed)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_ws_connect_fails_without_a_listener() {
        // Unlike UDP, a WebSocket to a dead server fails at channel open.
        let target = ConnectionTarget::parse("127.0.0.1:1").unwrap();
        assert!(WebSocketTransport::connect(&target).await.is_err());
    }

    #[tokio::test]
    async fn test_ws_double_close_is_harmless() {
        let (target, server) = spawn_collecting_server().await;
        let transport = WebSocketTransport::connect(&target).await.unwrap();
        assert!(transport.close().await.is_ok());
        assert!(transport.close().await.is_ok());
        server.await.unwrap();
    }
}
