//! airsniff daemon binary
//!
//! Wires a capture source to the frame decoder and the console sink:
//! banner once at startup, then one decoded line per captured frame until
//! the source is exhausted or a shutdown signal arrives.

use airsniff::{
    config::SniffConfig, decode, capture::{CaptureSource, MockCapture, RadioMetadata},
    sink::{ConsoleSink, RecordSink}, Result, SniffError,
};
use bytes::Bytes;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default configuration file path
const DEFAULT_CONFIG_PATH: &str = "/etc/airsniff/airsniff.toml";

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("airsniff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("IEEE 802.11 monitor-mode frame decoder")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            Arg::new("channel")
                .long("channel")
                .value_name("CHANNEL")
                .help("Channel to stamp into records"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
                .default_value(DEFAULT_LOG_LEVEL),
        )
        .get_matches();

    let log_level = matches.get_one::<String>("log-level").unwrap();
    init_logging(log_level)?;

    info!("Starting airsniff v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(matches.get_one::<String>("config").unwrap());
    let mut config = load_configuration(&config_path)?;

    if let Some(channel) = matches.get_one::<String>("channel") {
        config.radio.channel = channel
            .parse()
            .map_err(|_| SniffError::Config(format!("Invalid channel '{}'", channel)))?;
    }

    let source = replay_source(config.radio.channel);
    let mut sink = ConsoleSink::stdout();
    if config.output.banner {
        sink.banner()?;
    }

    run_loop(source, &mut sink).await
}

/// Initialize logging system
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| SniffError::Config(format!("Invalid log level '{}': {}", level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Load daemon configuration, falling back to defaults when no file exists.
fn load_configuration(config_path: &PathBuf) -> Result<SniffConfig> {
    if !config_path.exists() {
        warn!(
            "Configuration file not found: {}, using defaults",
            config_path.display()
        );
        return Ok(SniffConfig::default());
    }

    info!("Loading configuration from: {}", config_path.display());
    SniffConfig::from_file(config_path)
}

/// Decode frames from the source until it is exhausted or ctrl-c arrives.
async fn run_loop<S, K>(mut source: S, sink: &mut K) -> Result<()>
where
    S: CaptureSource,
    K: RecordSink,
{
    let mut decoded = 0u64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received ctrl-c, shutting down");
                break;
            }
            frame = source.next_frame() => {
                match frame? {
                    Some((buffer, meta)) => {
                        let record = decode(&buffer, &meta);
                        sink.emit(&record)?;
                        decoded += 1;
                    }
                    None => {
                        info!("Capture source exhausted");
                        break;
                    }
                }
            }
        }
    }

    source.shutdown().await?;
    info!(decoded, "airsniff shutdown complete");
    Ok(())
}

/// Canned replay source standing in for a radio backend.
fn replay_source(channel: u8) -> MockCapture {
    let meta = |rssi| RadioMetadata {
        rssi,
        channel,
        timestamp_us: 0,
    };

    let mut beacon = vec![0x80, 0x00, 0x00, 0x00];
    beacon.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    beacon.extend_from_slice(&[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc]);
    beacon.extend_from_slice(&[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc]);
    beacon.extend_from_slice(&[0x00, 0x00]); // seq ctrl
    beacon.extend_from_slice(&[0x64, 0x00]); // beacon interval
    beacon.extend_from_slice(&[0x31, 0x04]); // capability info
    beacon.extend_from_slice(&[0x00, 0x09]); // SSID tag
    beacon.extend_from_slice(b"MyNetwork");

    let mut probe_req = vec![0x40, 0x00, 0x00, 0x00];
    probe_req.extend_from_slice(&[0xff; 6]);
    probe_req.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
    probe_req.extend_from_slice(&[0xff; 6]);
    probe_req.extend_from_slice(&[0x00, 0x00]);

    // Bare receive-control record, no MAC header at all
    let misc = vec![0u8; airsniff::RX_CTRL_SIZE];

    MockCapture::with_frames(vec![
        (Bytes::from(beacon), meta(-42)),
        (Bytes::from(probe_req), meta(-61)),
        (Bytes::from(misc), meta(-88)),
    ])
}
