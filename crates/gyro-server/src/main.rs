//! GyroPoint server — entry point.
//!
//! This binary is the desktop half of GyroPoint: it prints a pairing QR
//! code, listens for pointer events on UDP or WebSocket, and applies them
//! to a cursor backend.
//!
//! # Usage
//!
//! ```text
//! gyro-server [OPTIONS]
//!
//! Options:
//!   --bind <IP>          Address to bind the listener to [default: 0.0.0.0]
//!   --port <PORT>        Listener port [default: 49152]
//!   --listener <udp|ws>  Protocol to listen on [default: udp]
//!   --sensitivity <F>    Cursor movement multiplier [default: 20]
//!   --threshold <F>      Minimum per-axis movement in pixels [default: 0.7]
//!   --no-qr              Skip printing the pairing QR code
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Default   | Description              |
//! |---------------------|-----------|--------------------------|
//! | `GYRO_BIND`         | `0.0.0.0` | Listener bind address    |
//! | `GYRO_PORT`         | `49152`   | Listener port            |
//! | `GYRO_LISTENER`     | `udp`     | Listener protocol        |
//! | `GYRO_SENSITIVITY`  | `20`      | Cursor multiplier        |
//! | `GYRO_THRESHOLD`    | `0.7`     | Tremor filter threshold  |

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gyro_server::application::apply_input::{ApplyInputUseCase, CursorBackend};
use gyro_server::domain::config::{ListenerKind, ServerConfig};
use gyro_server::infrastructure::cursor::MockCursorBackend;
use gyro_server::infrastructure::listener::{run_udp_listener, run_ws_listener};
use gyro_server::infrastructure::pairing_code::{advertised_addr, pairing_payload, print_pairing_qr};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// GyroPoint server.
///
/// Receives motion and click events from a paired relay and moves the
/// cursor accordingly.
#[derive(Debug, Parser)]
#[command(
    name = "gyro-server",
    about = "Receives GyroPoint pointer events and drives the cursor",
    version
)]
struct Cli {
    /// IP address to bind the event listener to.
    ///
    /// `0.0.0.0` accepts events from any interface; the pairing QR always
    /// advertises a concrete LAN address.
    #[arg(long, default_value = "0.0.0.0", env = "GYRO_BIND")]
    bind: String,

    /// Listener port.
    #[arg(long, default_value_t = 49152, env = "GYRO_PORT")]
    port: u16,

    /// Protocol to listen on.
    #[arg(long, default_value_t = ListenerKind::Udp, env = "GYRO_LISTENER")]
    listener: ListenerKind,

    /// Multiplier applied to gyroscope readings before moving the cursor.
    #[arg(long, default_value_t = 20.0, env = "GYRO_SENSITIVITY")]
    sensitivity: f64,

    /// Minimum per-axis movement in pixels; smaller motion is ignored.
    #[arg(long, default_value_t = 0.7, env = "GYRO_THRESHOLD")]
    threshold: f64,

    /// Skip printing the pairing QR code at startup.
    #[arg(long)]
    no_qr: bool,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not a valid IP address.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let bind_addr: SocketAddr = format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address: '{}:{}'", self.bind, self.port))?;

        Ok(ServerConfig {
            bind_addr,
            listener: self.listener,
            sensitivity: self.sensitivity,
            movement_threshold: self.threshold,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let no_qr = cli.no_qr;
    let config = cli.into_server_config()?;

    info!(
        "GyroPoint server starting — {} on {}",
        config.listener, config.bind_addr
    );

    // ── Pairing banner ─────────────────────────────────────────────────────────
    let advertised = advertised_addr(config.bind_addr)?;
    let payload = pairing_payload(config.listener, advertised);
    if no_qr {
        println!("pairing target: {payload}");
    } else {
        print_pairing_qr(&payload)?;
    }

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Listener task ──────────────────────────────────────────────────────────
    //
    // The listener owns the only Sender; when it stops, the channel closes
    // and the dispatch loop below drains out.
    let (events_tx, mut events_rx) = mpsc::channel(128);

    let listener_task = match config.listener {
        ListenerKind::Udp => {
            let socket = UdpSocket::bind(config.bind_addr)
                .await
                .with_context(|| format!("failed to bind UDP listener on {}", config.bind_addr))?;
            info!("listening for events on udp://{}", socket.local_addr()?);
            tokio::spawn(run_udp_listener(socket, events_tx, Arc::clone(&running)))
        }
        ListenerKind::WebSocket => {
            let listener = TcpListener::bind(config.bind_addr).await.with_context(|| {
                format!("failed to bind WebSocket listener on {}", config.bind_addr)
            })?;
            info!("listening for events on ws://{}", listener.local_addr()?);
            tokio::spawn(run_ws_listener(listener, events_tx, Arc::clone(&running)))
        }
    };

    // ── Dispatch loop ──────────────────────────────────────────────────────────
    //
    // The recording backend stands in for a platform cursor driver; swap in
    // a CursorBackend implementation wrapping SendInput/XTest/CGEvent to
    // move the real cursor.
    let backend = Arc::new(MockCursorBackend::default());
    let use_case = ApplyInputUseCase::new(
        Arc::clone(&backend) as Arc<dyn CursorBackend>,
        config.sensitivity,
        config.movement_threshold,
    );

    while let Some(event) = events_rx.recv().await {
        use_case.handle_event(&event);
    }

    listener_task.await.context("listener task panicked")?;
    info!("GyroPoint server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_produce_correct_port() {
        // Arrange: parse with no arguments (all defaults apply)
        let cli = Cli::parse_from(["gyro-server"]);
        // Assert
        assert_eq!(cli.port, 49152);
    }

    #[test]
    fn test_cli_defaults_produce_udp_listener() {
        let cli = Cli::parse_from(["gyro-server"]);
        assert_eq!(cli.listener, ListenerKind::Udp);
    }

    #[test]
    fn test_cli_defaults_produce_correct_tuning() {
        let cli = Cli::parse_from(["gyro-server"]);
        assert_eq!(cli.sensitivity, 20.0);
        assert_eq!(cli.threshold, 0.7);
        assert!(!cli.no_qr);
    }

    #[test]
    fn test_cli_listener_override() {
        let cli = Cli::parse_from(["gyro-server", "--listener", "ws"]);
        assert_eq!(cli.listener, ListenerKind::WebSocket);
    }

    #[test]
    fn test_cli_no_qr_flag() {
        let cli = Cli::parse_from(["gyro-server", "--no-qr"]);
        assert!(cli.no_qr);
    }

    #[test]
    fn test_into_server_config_defaults() {
        let cli = Cli::parse_from(["gyro-server"]);
        let config = cli.into_server_config().unwrap();
        assert_eq!(config.bind_addr.port(), 49152);
        assert_eq!(config.listener, ListenerKind::Udp);
    }

    #[test]
    fn test_into_server_config_custom_bind() {
        let cli = Cli::parse_from(["gyro-server", "--bind", "127.0.0.1", "--port", "9000"]);
        let config = cli.into_server_config().unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_into_server_config_invalid_bind_returns_error() {
        let cli = Cli::parse_from(["gyro-server", "--bind", "not.an.ip"]);
        assert!(cli.into_server_config().is_err());
    }
}
