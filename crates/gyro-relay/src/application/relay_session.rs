//! The streaming session: motion samples in, wire events out.
//!
//! A [`RelaySession`] owns one connected transport and the local pointer
//! model.  For every gyroscope sample it first advances the clamped local
//! position (so the UI feedback never waits on the network) and then sends
//! the event.  Transmission failures are logged and swallowed: a streaming
//! pointer is a fire-and-forget firehose, and stalling or tearing down the
//! session over one lost packet would feel far worse than a skipped frame.

use gyro_core::domain::pointer::{PointerModel, PointerPosition};
use gyro_core::{MotionSample, PointerEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::infrastructure::transport::EventTransport;

/// One active relay-to-server streaming session.
pub struct RelaySession {
    transport: Box<dyn EventTransport>,
    pointer: PointerModel,
}

impl RelaySession {
    pub fn new(transport: Box<dyn EventTransport>, pointer: PointerModel) -> Self {
        Self { transport, pointer }
    }

    /// The current local pointer position.
    pub fn position(&self) -> PointerPosition {
        self.pointer.position()
    }

    /// Processes one gyroscope sample: advances the local pointer, then
    /// sends the event.  Returns the new position for UI feedback.
    ///
    /// A send failure never surfaces to the caller; it is logged and the
    /// next sample proceeds as usual.
    pub async fn handle_sample(&mut self, sample: MotionSample) -> PointerPosition {
        let position = self.pointer.apply(&sample);
        if let Err(e) = self.transport.send(&PointerEvent::GyroData(sample)).await {
            warn!("failed to send motion event: {e}");
        }
        position
    }

    /// Sends a left (primary) click event, fire-and-forget.
    pub async fn send_left_click(&self) {
        self.send_click(PointerEvent::LeftClick).await;
    }

    /// Sends a right (secondary) click event, fire-and-forget.
    pub async fn send_right_click(&self) {
        self.send_click(PointerEvent::RightClick).await;
    }

    async fn send_click(&self, event: PointerEvent) {
        if let Err(e) = self.transport.send(&event).await {
            warn!("failed to send {} event: {e}", event.kind());
        }
    }

    /// Drains the sample channel until it closes, which happens when the
    /// motion subscription's handle is dropped.
    pub async fn run(&mut self, mut samples: mpsc::Receiver<MotionSample>) {
        while let Some(sample) = samples.recv().await {
            self.handle_sample(sample).await;
        }
        debug!("motion sample channel closed; session loop ending");
    }

    /// Closes the transport.  Consumes the session so no event can be sent
    /// after teardown.
    pub async fn shutdown(self) {
        if let Err(e) = self.transport.close().await {
            debug!("transport close reported: {e}");
        }
    }
}
