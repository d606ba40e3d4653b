//! In-memory transport double for session tests.
//!
//! The real transports need a peer on the other end and cannot be
//! inspected from test code.  [`RecordingTransport`] replaces the socket
//! with a `Mutex<Vec<...>>` so assertions can check exactly which events a
//! session emitted and in what order, and a `should_fail` switch exercises
//! the log-and-continue error path without a broken network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use gyro_core::PointerEvent;

use super::{EventTransport, TransportError};

/// Records every sent event without touching the network.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    /// Every event passed to `send`, in order.
    pub sent: Mutex<Vec<PointerEvent>>,
    /// When `true`, `send` returns [`TransportError::Closed`] instead of
    /// recording.  Use this to test callers' failure handling.
    pub should_fail: AtomicBool,
    /// Set once `close` has been called.
    pub closed: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn sent_events(&self) -> Vec<PointerEvent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn send(&self, event: &PointerEvent) -> Result<(), TransportError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(TransportError::Closed);
        }
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }
}
