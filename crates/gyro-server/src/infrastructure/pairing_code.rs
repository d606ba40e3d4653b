//! The pairing payload and its QR rendering.
//!
//! Pairing is one-way: the server shows a QR code with its reachable
//! address, the relay scans it.  The payload shape depends on the
//! listener so the relay can pick the matching transport:
//!
//! - UDP:        `192.168.1.20:49152`
//! - WebSocket:  `ws://192.168.1.20:49152`
//!
//! Both shapes are what `gyro_core::ConnectionTarget::parse` accepts.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;

use crate::domain::config::ListenerKind;

/// Renders the payload a relay should scan to reach `addr`.
pub fn pairing_payload(kind: ListenerKind, addr: SocketAddr) -> String {
    match kind {
        ListenerKind::Udp => addr.to_string(),
        ListenerKind::WebSocket => format!("ws://{addr}"),
    }
}

/// Replaces an unspecified bind address (`0.0.0.0`) with this machine's
/// LAN address, which is what relays actually need to dial.
///
/// # Errors
///
/// Returns an error if no usable local address can be discovered.
pub fn advertised_addr(bind_addr: SocketAddr) -> anyhow::Result<SocketAddr> {
    if bind_addr.ip().is_unspecified() {
        let ip = local_ip_address::local_ip().context("could not determine LAN address")?;
        Ok(SocketAddr::new(ip, bind_addr.port()))
    } else {
        Ok(bind_addr)
    }
}

/// Prints the pairing QR code and the payload to the terminal.
///
/// # Errors
///
/// Returns an error if the payload cannot be encoded as a QR code.
pub fn print_pairing_qr(payload: &str) -> anyhow::Result<()> {
    info!("pairing payload: {payload}");
    println!("Scan to pair:");
    qr2term::print_qr(payload).context("failed to render pairing QR code")?;
    println!("{payload}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gyro_core::ConnectionTarget;

    #[test]
    fn test_udp_payload_is_bare_host_port() {
        let addr: SocketAddr = "192.168.1.20:49152".parse().unwrap();
        assert_eq!(pairing_payload(ListenerKind::Udp, addr), "192.168.1.20:49152");
    }

    #[test]
    fn test_ws_payload_carries_the_scheme() {
        let addr: SocketAddr = "192.168.1.20:49152".parse().unwrap();
        assert_eq!(
            pairing_payload(ListenerKind::WebSocket, addr),
            "ws://192.168.1.20:49152"
        );
    }

    #[test]
    fn test_both_payload_shapes_parse_as_targets() {
        // The contract with the relay: whatever we advertise must parse.
        let addr: SocketAddr = "192.168.1.20:49152".parse().unwrap();
        for kind in [ListenerKind::Udp, ListenerKind::WebSocket] {
            let payload = pairing_payload(kind, addr);
            let target = ConnectionTarget::parse(&payload).unwrap();
            assert_eq!(target.host, "192.168.1.20");
            assert_eq!(target.port, 49152);
        }
    }

    #[test]
    fn test_advertised_addr_keeps_explicit_binds() {
        let addr: SocketAddr = "10.1.2.3:9000".parse().unwrap();
        assert_eq!(advertised_addr(addr).unwrap(), addr);
    }

    #[test]
    fn test_advertised_addr_replaces_unspecified_ip() {
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        // May fail on hosts with no network at all; otherwise the port is
        // preserved and the IP is concrete.
        if let Ok(advertised) = advertised_addr(addr) {
            assert_eq!(advertised.port(), 9000);
            assert!(!advertised.ip().is_unspecified());
        }
    }
}
