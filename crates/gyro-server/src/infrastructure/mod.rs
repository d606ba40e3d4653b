//! Everything that touches the outside world: cursor backends, network
//! listeners, and the pairing QR.

pub mod cursor;
pub mod listener;
pub mod pairing_code;
