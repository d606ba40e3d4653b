//! Everything that touches the outside world: motion sources, network
//! transports, and the pairing cache on disk.

pub mod motion;
pub mod storage;
pub mod transport;
