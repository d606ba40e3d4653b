//! Motion sources and their subscription lifecycle.
//!
//! A [`MotionSensor`] hands out samples through a bounded channel together
//! with a [`Subscription`] handle.  The handle is the whole teardown story:
//! dropping it stops the sampling task, which closes the channel, which
//! ends the session loop.  There is no unsubscribe call to forget, so a
//! session that goes away cannot leave a sampling task running behind it.
//!
//! Two sources are provided: [`SweepMotionSensor`] synthesises a circular
//! sweep for the CLI binary (this crate has no gyroscope of its own), and
//! [`ScriptedMotionSensor`] replays a fixed sample sequence for tests.

use std::time::Duration;

use gyro_core::MotionSample;
use tokio::sync::{mpsc, oneshot};

/// Buffered samples per subscription.  Small on purpose: stale motion is
/// worthless, so backpressure should drop into the channel quickly.
const CHANNEL_CAPACITY: usize = 32;

// ── Subscription handle ───────────────────────────────────────────────────────

/// RAII handle for an active motion subscription.
///
/// Dropping the handle signals the sampling task to stop.  The sample
/// channel then closes once the task exits, so holders of the receiver see
/// a clean end-of-stream rather than a hang.
#[derive(Debug)]
pub struct Subscription {
    stop: Option<oneshot::Sender<()>>,
}

impl Subscription {
    pub fn new(stop: oneshot::Sender<()>) -> Self {
        Self { stop: Some(stop) }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The task may already have exited; a dead receiver is fine.
            let _ = stop.send(());
        }
    }
}

// ── Sensor trait ──────────────────────────────────────────────────────────────

/// A source of gyroscope samples.
///
/// `subscribe` must be called from within a Tokio runtime; implementations
/// spawn a sampling task that ticks at `interval` until the returned
/// [`Subscription`] is dropped or the receiver goes away.
pub trait MotionSensor: Send + Sync {
    fn subscribe(&self, interval: Duration) -> (Subscription, mpsc::Receiver<MotionSample>);
}

// ── Synthetic sweep source ────────────────────────────────────────────────────

/// Generates a continuous circular sweep: the pointer orbits the centre of
/// the feedback region.  Stands in for a real gyroscope so the relay binary
/// can be exercised end-to-end on a desk.
#[derive(Debug, Clone)]
pub struct SweepMotionSensor {
    /// Peak angular velocity of the sweep, in rad/s.
    pub amplitude: f64,
}

impl Default for SweepMotionSensor {
    fn default() -> Self {
        Self { amplitude: 0.6 }
    }
}

impl MotionSensor for SweepMotionSensor {
    fn subscribe(&self, interval: Duration) -> (Subscription, mpsc::Receiver<MotionSample>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let amplitude = self.amplitude;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut phase: f64 = 0.0;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let sample = MotionSample::new(
                            amplitude * phase.sin(),
                            0.0,
                            amplitude * phase.cos(),
                        );
                        phase += 0.15;
                        if tx.send(sample).await.is_err() {
                            // Receiver dropped; nobody is listening.
                            break;
                        }
                    }
                }
            }
        });

        (Subscription::new(stop_tx), rx)
    }
}

// ── Scripted source for tests ─────────────────────────────────────────────────

/// Replays a fixed sequence of samples, one per tick, then closes the
/// channel.  The deterministic equivalent of a hardware gyroscope for
/// session tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMotionSensor {
    samples: Vec<MotionSample>,
}

impl ScriptedMotionSensor {
    pub fn new(samples: Vec<MotionSample>) -> Self {
        Self { samples }
    }
}

impl MotionSensor for ScriptedMotionSensor {
    fn subscribe(&self, interval: Duration) -> (Subscription, mpsc::Receiver<MotionSample>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let samples = self.samples.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            for sample in samples {
                tokio::select! {
                    _ = &mut stop_rx => return,
                    _ = ticker.tick() => {
                        if tx.send(sample).await.is_err() {
                            return;
                        }
                    }
                }
            }
            // Falling off the end drops `tx` and closes the channel.
        });

        (Subscription::new(stop_tx), rx)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
