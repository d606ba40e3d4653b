//! Encoding and decoding of pointer events to/from wire text.
//!
//! The wire format is plain JSON text (see [`crate::protocol::messages`]).
//! These helpers exist so that both transports share one place that decides
//! how events become bytes, and so decode failures surface as one typed
//! error instead of raw `serde_json::Error` values scattered around the
//! network code.

use thiserror::Error;

use crate::protocol::messages::PointerEvent;

/// Upper bound on the size of a single event datagram, in bytes.
///
/// The receiving server reads UDP packets into a fixed 1024-byte buffer, so
/// anything larger would be silently truncated in flight.  A well-formed
/// event is under 100 bytes; hitting this limit means something other than
/// a GyroPoint relay is talking to us.
pub const MAX_DATAGRAM_LEN: usize = 1024;

/// Errors that can occur while encoding or decoding pointer events.
#[derive(Debug, Error)]
pub enum WireError {
    /// The event could not be serialized to JSON.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    /// The text was not a well-formed event object.
    #[error("malformed event: {0}")]
    Decode(#[source] serde_json::Error),

    /// The datagram bytes were not valid UTF-8.
    #[error("datagram is not valid UTF-8")]
    NotUtf8,

    /// The datagram exceeds [`MAX_DATAGRAM_LEN`].
    #[error("oversized datagram: {len} bytes exceeds the {MAX_DATAGRAM_LEN}-byte limit")]
    Oversized { len: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`PointerEvent`] as a JSON string, ready to send as one UDP
/// datagram or one WebSocket text frame.
///
/// # Errors
///
/// Returns [`WireError::Encode`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use gyro_core::protocol::{encode_event, PointerEvent};
///
/// let json = encode_event(&PointerEvent::LeftClick).unwrap();
/// assert_eq!(json, r#"{"event":"leftClick"}"#);
/// ```
pub fn encode_event(event: &PointerEvent) -> Result<String, WireError> {
    serde_json::to_string(event).map_err(WireError::Encode)
}

/// Decodes a [`PointerEvent`] from JSON text (e.g., a WebSocket text frame).
///
/// # Errors
///
/// Returns [`WireError::Decode`] if the text is not a well-formed event.
pub fn decode_event(text: &str) -> Result<PointerEvent, WireError> {
    serde_json::from_str(text).map_err(WireError::Decode)
}

/// Decodes a [`PointerEvent`] from raw datagram bytes.
///
/// Checks the length bound and UTF-8 validity before parsing, so the caller
/// gets a specific error for each failure mode.
///
/// # Errors
///
/// Returns [`WireError::Oversized`], [`WireError::NotUtf8`], or
/// [`WireError::Decode`] depending on which check fails.
pub fn decode_datagram(bytes: &[u8]) -> Result<PointerEvent, WireError> {
    if bytes.len() > MAX_DATAGRAM_LEN {
        return Err(WireError::Oversized { len: bytes.len() });
    }
    let text = std::str::from_utf8(bytes).map_err(|_| WireError::NotUtf8)?;
    decode_event(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
