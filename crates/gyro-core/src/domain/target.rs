//! Pairing-target parsing.
//!
//! A pairing QR code carries the server's address as free text.  Depending
//! on the server's transport it is either a bare `ip:port` (UDP) or a
//! `ws://ip:port` URL (WebSocket).  [`ConnectionTarget::parse`] accepts both
//! and normalizes them to a typed host/port pair; the transport decision is
//! made separately, so a WebSocket-shaped payload can still be streamed to
//! over UDP if the user insists.

use std::fmt;

use thiserror::Error;

/// Errors produced while parsing a scanned pairing payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    /// The payload contains no `:` separating host from port.
    #[error("missing ':' separator in target '{0}'")]
    MissingSeparator(String),

    /// The host part before the separator is empty.
    #[error("empty host in target '{0}'")]
    EmptyHost(String),

    /// The port part is empty or not a number in `0..=65535`.
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// A parsed pairing target: where the relay should send pointer events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Hostname or IPv4 address, never empty.
    pub host: String,
    /// UDP or WebSocket port.
    pub port: u16,
}

impl ConnectionTarget {
    /// Parses a scanned pairing payload into a target.
    ///
    /// Accepts `host:port`, `ws://host:port`, and `udp://host:port`
    /// (with or without a trailing `/`).  The split is on the **last** `:`
    /// so a stray scheme colon never ends up in the host.
    ///
    /// Bracketed IPv6 literals are not supported; pairing payloads are
    /// always IPv4 or a hostname.
    ///
    /// # Errors
    ///
    /// Returns a [`TargetError`] naming the first check that failed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gyro_core::domain::target::ConnectionTarget;
    ///
    /// let t = ConnectionTarget::parse("ws://192.168.1.10:49152").unwrap();
    /// assert_eq!(t.host, "192.168.1.10");
    /// assert_eq!(t.port, 49152);
    /// ```
    pub fn parse(payload: &str) -> Result<Self, TargetError> {
        let trimmed = payload.trim();

        // Strip a known scheme prefix and any trailing slash the QR
        // generator may have appended.
        let stripped = trimmed
            .strip_prefix("ws://")
            .or_else(|| trimmed.strip_prefix("udp://"))
            .unwrap_or(trimmed)
            .trim_end_matches('/');

        let (host, port_str) = stripped
            .rsplit_once(':')
            .ok_or_else(|| TargetError::MissingSeparator(trimmed.to_string()))?;

        if host.is_empty() {
            return Err(TargetError::EmptyHost(trimmed.to_string()));
        }

        let port: u16 = port_str
            .parse()
            .map_err(|_| TargetError::InvalidPort(port_str.to_string()))?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Renders the target as a WebSocket URL for `connect_async`.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
