//! Relay use cases: pairing and the streaming session.

pub mod pairing;
pub mod relay_session;

pub use pairing::PairingFlow;
pub use relay_session::RelaySession;
