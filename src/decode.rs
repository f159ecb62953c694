//! Header and payload decoding
//!
//! Turns one captured frame plus its radio metadata into an owned
//! [`DecodedRecord`]. Decoding is pure and total: malformed or truncated
//! input degrades to sentinel fields, it never errors, never panics and
//! never reads past the buffer's declared length.

use std::fmt;
use tracing::debug;

use crate::capture::RadioMetadata;
use crate::frame::{FrameType, MacAddr, MacHeader, PacketKind};
use crate::wire::FrameReader;
use crate::{BEACON_FIXED_LEN, MAC_HDR_LEN, SSID_MAX_LEN};

/// SSID element id in the tagged-parameter sequence.
const SSID_ELEMENT_ID: u8 = 0;

/// Bounded network-name buffer: at most [`SSID_MAX_LEN`] bytes held inline.
///
/// The content is an opaque byte string taken from the air. It is not
/// guaranteed printable or valid UTF-8; display is lossy.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ssid {
    bytes: [u8; SSID_MAX_LEN],
    len: u8,
}

impl Ssid {
    /// Copy at most [`SSID_MAX_LEN`] bytes from `data`, truncating the rest.
    pub fn new(data: &[u8]) -> Self {
        let take = data.len().min(SSID_MAX_LEN);
        let mut bytes = [0u8; SSID_MAX_LEN];
        bytes[..take].copy_from_slice(&data[..take]);
        Self {
            bytes,
            len: take as u8,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ssid({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Decoded view of one captured frame. Owns all of its storage; nothing
/// borrows from the raw buffer.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    /// Receiver address, formatted, always 17 characters.
    pub addr1: String,
    /// Transmitter address, formatted.
    pub addr2: String,
    /// BSSID, formatted.
    pub addr3: String,
    pub channel: u8,
    pub rssi: i8,
    pub protocol_version: u8,
    pub frame_type: FrameType,
    pub subtype: u8,
    pub type_name: &'static str,
    pub to_ds: bool,
    pub from_ds: bool,
    pub more_frag: bool,
    pub retry: bool,
    pub pwr_mgmt: bool,
    pub more_data: bool,
    pub protected: bool,
    pub order: bool,
    /// Advisory size-based classification; diagnostic only, decoding
    /// branches on the frame-control fields above.
    pub advisory_kind: PacketKind,
    /// Network name, beacon frames only.
    pub ssid: Option<Ssid>,
}

/// Decode one captured frame. Total: every input yields a record.
pub fn decode(frame: &[u8], meta: &RadioMetadata) -> DecodedRecord {
    let advisory_kind = PacketKind::from_len(frame.len());
    let header = MacHeader::parse(frame);
    let fc = header.frame_control;

    debug!(
        len = frame.len(),
        ?advisory_kind,
        frame_type = ?fc.frame_type,
        subtype = fc.subtype,
        "classified frame"
    );

    let ssid = if fc.is_beacon() {
        parse_beacon_ssid(frame)
    } else {
        None
    };

    DecodedRecord {
        addr1: header.addr1.unwrap_or(MacAddr::ZERO).to_string(),
        addr2: header.addr2.unwrap_or(MacAddr::ZERO).to_string(),
        addr3: header.addr3.unwrap_or(MacAddr::ZERO).to_string(),
        channel: meta.channel,
        rssi: meta.rssi,
        protocol_version: fc.protocol_version,
        frame_type: fc.frame_type,
        subtype: fc.subtype,
        type_name: fc.type_name(),
        to_ds: fc.to_ds,
        from_ds: fc.from_ds,
        more_frag: fc.more_frag,
        retry: fc.retry,
        pwr_mgmt: fc.pwr_mgmt,
        more_data: fc.more_data,
        protected: fc.protected,
        order: fc.order,
        advisory_kind,
        ssid,
    }
}

/// Extract the network name from a beacon body.
///
/// The body after the MAC header carries beacon interval and capability
/// info, then the tagged-parameter sequence; the first tag is assumed to be
/// the SSID element. The copy is clamped to [`SSID_MAX_LEN`] bytes and to
/// the bytes the buffer actually holds, whatever the declared tag length.
fn parse_beacon_ssid(frame: &[u8]) -> Option<Ssid> {
    let mut reader = FrameReader::new(frame);
    reader.skip(MAC_HDR_LEN).ok()?;
    reader.skip(BEACON_FIXED_LEN).ok()?;

    let element_id = reader.read_u8().ok()?;
    if element_id != SSID_ELEMENT_ID {
        debug!(element_id, "first beacon tag is not an SSID element");
    }

    let declared = reader.read_u8().ok()? as usize;
    let take = declared.min(SSID_MAX_LEN).min(reader.remaining());
    let name = reader.read_bytes(take).ok()?;
    Some(Ssid::new(name))
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {:02} | {} | {}({:<2}) | {:<28} | {} | {} | {} | {} | {} | {} | {} | {} | ",
            self.addr1,
            self.addr2,
            self.addr3,
            self.channel,
            self.rssi,
            self.protocol_version,
            u8::from(self.frame_type),
            self.subtype,
            self.type_name,
            self.to_ds as u8,
            self.from_ds as u8,
            self.more_frag as u8,
            self.retry as u8,
            self.pwr_mgmt as u8,
            self.more_data as u8,
            self.protected as u8,
            self.order as u8,
        )?;
        if let Some(ssid) = &self.ssid {
            write!(f, "{ssid}")?;
        }
        Ok(())
    }
}
