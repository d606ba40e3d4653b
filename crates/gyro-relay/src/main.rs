//! GyroPoint relay — entry point.
//!
//! This binary is the phone-side half of GyroPoint running on a desk: it
//! pairs with a server from a scanned QR payload, then streams motion and
//! click events over UDP or WebSocket.  Lacking a gyroscope, `stream`
//! feeds the session from a synthetic circular sweep, which exercises the
//! full pipeline (pointer model, encoding, transport) end to end.
//!
//! # Usage
//!
//! ```text
//! gyro-relay pair <PAYLOAD>          Parse a scanned payload and remember it
//! gyro-relay stream [OPTIONS]        Stream motion to the paired server
//! gyro-relay click <left|right>      Send a single click event
//!
//! Stream options:
//!   --target <HOST:PORT>   Override the cached pairing
//!   --transport <udp|ws>   Channel to stream over [default: udp]
//!   --rate <fast|slow>     Sample rate, 10 ms or 50 ms [default: fast]
//!   --sensitivity <F>      Pointer movement multiplier [default: 10]
//!   --duration <SECS>      Stop after this many seconds; 0 = until Ctrl+C
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Option        |
//! |---------------------|---------------|
//! | `GYRO_TARGET`       | `--target`    |
//! | `GYRO_TRANSPORT`    | `--transport` |
//! | `GYRO_RATE`         | `--rate`      |
//! | `GYRO_SENSITIVITY`  | `--sensitivity` |

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gyro_core::domain::pointer::{PointerBounds, PointerModel};
use gyro_core::{ConnectionTarget, SampleRate};
use gyro_relay::application::{PairingFlow, RelaySession};
use gyro_relay::infrastructure::motion::{MotionSensor, SweepMotionSensor};
use gyro_relay::infrastructure::storage::{self, PairingCache};
use gyro_relay::infrastructure::transport::{self, TransportKind};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// GyroPoint relay.
///
/// Pairs with a GyroPoint server and streams pointer events to it.
#[derive(Debug, Parser)]
#[command(
    name = "gyro-relay",
    about = "Streams gyroscope motion and clicks to a GyroPoint server",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a scanned pairing payload and cache it for later sessions.
    Pair {
        /// The scanned QR text: `host:port` or `ws://host:port`.
        payload: String,
    },

    /// Stream synthetic motion to the paired server.
    Stream {
        /// Target override; defaults to the cached pairing.
        #[arg(long, env = "GYRO_TARGET")]
        target: Option<String>,

        /// Channel to stream over.
        #[arg(long, default_value_t = TransportKind::Udp, env = "GYRO_TRANSPORT")]
        transport: TransportKind,

        /// Gyroscope sample rate preset.
        #[arg(long, default_value_t = SampleRate::Fast, env = "GYRO_RATE")]
        rate: SampleRate,

        /// Pointer movement multiplier for the local feedback position.
        #[arg(long, default_value_t = 10.0, env = "GYRO_SENSITIVITY")]
        sensitivity: f64,

        /// Seconds to stream before stopping; 0 streams until Ctrl+C.
        #[arg(long, default_value_t = 0)]
        duration: u64,
    },

    /// Send a single click event and exit.
    Click {
        /// Which button: `left` or `right`.
        button: ClickButton,

        /// Target override; defaults to the cached pairing.
        #[arg(long, env = "GYRO_TARGET")]
        target: Option<String>,

        /// Channel to send over.
        #[arg(long, default_value_t = TransportKind::Udp, env = "GYRO_TRANSPORT")]
        transport: TransportKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ClickButton {
    Left,
    Right,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log level is controlled by RUST_LOG; default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Pair { payload } => run_pair(&payload),
        Command::Stream {
            target,
            transport,
            rate,
            sensitivity,
            duration,
        } => run_stream(target, transport, rate, sensitivity, duration).await,
        Command::Click {
            button,
            target,
            transport,
        } => run_click(button, target, transport).await,
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_pair(payload: &str) -> anyhow::Result<()> {
    let mut flow = PairingFlow::default();
    let target = flow
        .handle_scan(payload, Instant::now())
        .with_context(|| format!("invalid pairing payload '{payload}'"))?
        .context("scan was suppressed")?; // unreachable: a fresh flow accepts the first scan

    storage::save_cache(&PairingCache {
        last_target: Some(target.to_string()),
    })
    .context("failed to persist pairing")?;

    info!("paired with {target}");
    println!("paired with {target}");
    Ok(())
}

async fn run_stream(
    target: Option<String>,
    kind: TransportKind,
    rate: SampleRate,
    sensitivity: f64,
    duration: u64,
) -> anyhow::Result<()> {
    let target = resolve_target(target)?;

    let transport = transport::connect(kind, &target)
        .await
        .with_context(|| format!("failed to open {kind} channel to {target}"))?;

    info!("streaming to {target} over {kind} at rate {rate}");

    let pointer = PointerModel::new(sensitivity, PointerBounds::default());
    let mut session = RelaySession::new(transport, pointer);

    let sensor = SweepMotionSensor::default();
    let (subscription, samples) = sensor.subscribe(rate.interval());

    // Either the timer, Ctrl+C, or the sample channel ends the stream.
    let deadline = async {
        if duration > 0 {
            tokio::time::sleep(Duration::from_secs(duration)).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = session.run(samples) => info!("motion source ended"),
        _ = tokio::signal::ctrl_c() => info!("received Ctrl+C — stopping stream"),
        _ = deadline => info!("stream duration elapsed"),
    }

    // Dropping the handle stops the sampling task; then close the channel.
    drop(subscription);
    let position = session.position();
    session.shutdown().await;

    info!(
        "stream stopped; final local pointer at top={:.1} left={:.1}",
        position.top, position.left
    );
    Ok(())
}

async fn run_click(
    button: ClickButton,
    target: Option<String>,
    kind: TransportKind,
) -> anyhow::Result<()> {
    let target = resolve_target(target)?;

    let transport = transport::connect(kind, &target)
        .await
        .with_context(|| format!("failed to open {kind} channel to {target}"))?;

    let session = RelaySession::new(transport, PointerModel::default());
    match button {
        ClickButton::Left => session.send_left_click().await,
        ClickButton::Right => session.send_right_click().await,
    }
    session.shutdown().await;

    info!("sent {button:?} click to {target}");
    Ok(())
}

/// Picks the session target: the explicit argument when given, otherwise
/// the cached pairing.
fn resolve_target(arg: Option<String>) -> anyhow::Result<ConnectionTarget> {
    let raw = match arg {
        Some(raw) => raw,
        None => storage::load_cache()
            .context("failed to read pairing cache")?
            .last_target
            .context("no target given and nothing paired yet; run 'gyro-relay pair' first")?,
    };
    ConnectionTarget::parse(&raw).with_context(|| format!("invalid target '{raw}'"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
