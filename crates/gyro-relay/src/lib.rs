//! # gyro-relay
//!
//! The phone-side half of GyroPoint: pairs with a desktop server by parsing
//! a scanned QR payload, subscribes to a motion source, and streams pointer
//! events over UDP or WebSocket.
//!
//! The pure pairing/pointer logic lives in `gyro-core`; this crate adds the
//! two layers around it:
//!
//! - **`application`** – use cases: the debounced pairing flow and the
//!   relay session that turns motion samples into wire events.
//! - **`infrastructure`** – the outside world: motion sources, UDP and
//!   WebSocket transports, and the cached-pairing TOML file.

pub mod application;
pub mod infrastructure;

pub use application::pairing::PairingFlow;
pub use application::relay_session::RelaySession;
pub use infrastructure::motion::{MotionSensor, Subscription};
pub use infrastructure::transport::{EventTransport, TransportError, TransportKind};
