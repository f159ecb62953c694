//! # airsniff - IEEE 802.11 monitor-mode frame decoder
//!
//! Decodes raw 802.11 link-layer frames delivered by a promiscuous-mode
//! capture source and renders each frame's header fields (and, for beacon
//! frames, the advertised network name) into a human-readable record.
//!
//! ## Architecture
//!
//! The implementation is organized into several modules:
//! - `wire`: Bounded cursor over raw frame bytes
//! - `frame`: Frame-control taxonomy and MAC header parsing
//! - `decode`: Header and payload decoding into display records
//! - `capture`: Capture source abstraction and replay backend
//! - `sink`: Display sink for decoded records
//! - `config`: Daemon configuration

pub mod capture;
pub mod config;
pub mod decode;
pub mod frame;
pub mod sink;
pub mod wire;

// Re-export commonly used types
pub use crate::{
    capture::{CaptureSource, MockCapture, RadioMetadata},
    decode::{decode, DecodedRecord, Ssid},
    frame::{FrameControl, FrameType, MacAddr, MacHeader, MgmtSubtype, PacketKind},
    sink::{ConsoleSink, RecordSink},
    wire::FrameReader,
};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SniffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated read: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SniffError>;

// Constants

/// Size of the bare receive-control record the SDK delivers for frames it
/// does not otherwise support (no MAC header follows).
pub const RX_CTRL_SIZE: usize = 12;

/// Size of the SDK's fixed management-frame envelope.
pub const MGMT_ENVELOPE_SIZE: usize = 128;

/// Length of a MAC address in bytes.
pub const MAC_ADDR_LEN: usize = 6;

/// Length of the fixed 802.11 MAC header (frame control, duration, three
/// addresses, sequence control).
pub const MAC_HDR_LEN: usize = 24;

/// Fixed beacon body bytes between the MAC header and the first tagged
/// parameter: beacon interval (2) + capability info (2). The capture format
/// strips the 8-byte TSF timestamp before delivery.
pub const BEACON_FIXED_LEN: usize = 4;

/// Maximum number of network-name bytes kept from a beacon SSID tag.
pub const SSID_MAX_LEN: usize = 31;

/// Maximum frame size accepted from a capture source.
pub const MAX_FRAME_SIZE: usize = 4096;
