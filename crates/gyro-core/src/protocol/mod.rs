//! The GyroPoint wire protocol: JSON event types and their codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_datagram, decode_event, encode_event, WireError, MAX_DATAGRAM_LEN};
pub use messages::{MotionSample, PointerEvent};
