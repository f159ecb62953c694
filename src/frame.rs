//! IEEE 802.11 frame-control taxonomy and MAC header parsing
//!
//! This module contains the structured view of the two frame-control octets,
//! the management subtype taxonomy, the size-based advisory packet
//! classifier, and bounded MAC header extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire::FrameReader;
use crate::{MAC_ADDR_LEN, MGMT_ENVELOPE_SIZE, RX_CTRL_SIZE};

/// IEEE 802.11 frame types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameType {
    /// Management frames (beacon, probe, auth, etc.)
    Management = 0,
    /// Control frames (RTS, CTS, ACK, etc.)
    Control = 1,
    /// Data frames
    Data = 2,
    /// Extension frames
    Extension = 3,
}

impl From<u8> for FrameType {
    fn from(value: u8) -> Self {
        match value & 0x3 {
            0 => Self::Management,
            1 => Self::Control,
            2 => Self::Data,
            _ => Self::Extension,
        }
    }
}

impl From<FrameType> for u8 {
    fn from(frame_type: FrameType) -> Self {
        frame_type as u8
    }
}

/// Management frame subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MgmtSubtype {
    AssociationRequest,
    AssociationResponse,
    ReassociationRequest,
    ReassociationResponse,
    ProbeRequest,
    ProbeResponse,
    TimingAdvertisement,
    Beacon,
    Atim,
    Disassociation,
    Authentication,
    Deauthentication,
    Action,
    ActionNoAck,
    Unknown(u8),
}

impl From<u8> for MgmtSubtype {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::AssociationRequest,
            1 => Self::AssociationResponse,
            2 => Self::ReassociationRequest,
            3 => Self::ReassociationResponse,
            4 => Self::ProbeRequest,
            5 => Self::ProbeResponse,
            6 => Self::TimingAdvertisement,
            8 => Self::Beacon,
            9 => Self::Atim,
            10 => Self::Disassociation,
            11 => Self::Authentication,
            12 => Self::Deauthentication,
            13 => Self::Action,
            14 => Self::ActionNoAck,
            other => Self::Unknown(other),
        }
    }
}

impl MgmtSubtype {
    /// Human-readable subtype label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AssociationRequest => "Association request",
            Self::AssociationResponse => "Association response",
            Self::ReassociationRequest => "Reassociation request",
            Self::ReassociationResponse => "Reassociation response",
            Self::ProbeRequest => "Probe request",
            Self::ProbeResponse => "Probe response",
            Self::TimingAdvertisement => "Timing advertisement",
            Self::Beacon => "Beacon",
            Self::Atim => "ATIM",
            Self::Disassociation => "Disassociation",
            Self::Authentication => "Authentication",
            Self::Deauthentication => "Deauthentication",
            Self::Action => "Action",
            Self::ActionNoAck => "Action no-ack",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Human-readable label for a (type, subtype) pair.
///
/// Management subtypes resolve through the [`MgmtSubtype`] table; control and
/// data frames get their type label. Everything else maps to the fixed
/// "UNKNOWN" label rather than failing.
pub fn type_name(frame_type: FrameType, subtype: u8) -> &'static str {
    match frame_type {
        FrameType::Management => MgmtSubtype::from(subtype).name(),
        FrameType::Control => "Control",
        FrameType::Data => "Data",
        FrameType::Extension => "UNKNOWN",
    }
}

/// Coarse packet category inferred from buffer length alone.
///
/// The SDK delivers unsupported frames as a bare receive-control record and
/// management frames in a fixed-size envelope, so the length identifies the
/// category. This path is advisory: decoding decisions branch on the
/// frame-control type/subtype, which is authoritative; the length-based
/// result is carried for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketKind {
    /// Unsupported packet: only the receive-control record was delivered.
    Misc,
    /// Management packet envelope.
    Management,
    /// Everything else.
    Data,
}

impl PacketKind {
    /// Classify a buffer by its length. Total: every length maps to a
    /// category.
    pub fn from_len(len: usize) -> Self {
        match len {
            RX_CTRL_SIZE => Self::Misc,
            MGMT_ENVELOPE_SIZE => Self::Management,
            _ => Self::Data,
        }
    }
}

/// 6-byte hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacAddr(pub [u8; MAC_ADDR_LEN]);

impl MacAddr {
    /// All-zero sentinel used when a frame is too short to carry the field.
    pub const ZERO: MacAddr = MacAddr([0u8; MAC_ADDR_LEN]);

    pub fn octets(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddr {
    fn from(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddr {
    // Always exactly 17 characters: zero-padded hex pairs, colon-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

/// Structured view of the first two MAC header octets.
///
/// Byte 0 carries protocol version (bits 0-1), type (bits 2-3) and subtype
/// (bits 4-7); byte 1 carries the eight status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameControl {
    pub protocol_version: u8,
    pub frame_type: FrameType,
    pub subtype: u8,
    pub to_ds: bool,
    pub from_ds: bool,
    pub more_frag: bool,
    pub retry: bool,
    pub pwr_mgmt: bool,
    pub more_data: bool,
    pub protected: bool,
    pub order: bool,
}

impl FrameControl {
    /// Sentinel value for frames too short to carry the field.
    pub const ZERO: FrameControl = FrameControl {
        protocol_version: 0,
        frame_type: FrameType::Management,
        subtype: 0,
        to_ds: false,
        from_ds: false,
        more_frag: false,
        retry: false,
        pwr_mgmt: false,
        more_data: false,
        protected: false,
        order: false,
    };

    /// Decode from the two little-endian header octets.
    pub fn from_bytes(b0: u8, b1: u8) -> Self {
        Self {
            protocol_version: b0 & 0x3,
            frame_type: FrameType::from((b0 >> 2) & 0x3),
            subtype: (b0 >> 4) & 0xf,
            to_ds: b1 & 0x01 != 0,
            from_ds: b1 & 0x02 != 0,
            more_frag: b1 & 0x04 != 0,
            retry: b1 & 0x08 != 0,
            pwr_mgmt: b1 & 0x10 != 0,
            more_data: b1 & 0x20 != 0,
            protected: b1 & 0x40 != 0,
            order: b1 & 0x80 != 0,
        }
    }

    /// Check if this is a beacon frame (management, subtype 8).
    pub fn is_beacon(&self) -> bool {
        self.frame_type == FrameType::Management
            && MgmtSubtype::from(self.subtype) == MgmtSubtype::Beacon
    }

    /// Human-readable label for this frame's type/subtype pair.
    pub fn type_name(&self) -> &'static str {
        type_name(self.frame_type, self.subtype)
    }
}

/// Parsed 802.11 MAC header.
///
/// Address fields are `None` when the buffer ends before them; each read is
/// bounded and fails closed rather than picking up whatever bytes follow the
/// buffer.
#[derive(Debug, Clone, Copy)]
pub struct MacHeader {
    pub frame_control: FrameControl,
    pub duration: u16,
    /// Receiver address.
    pub addr1: Option<MacAddr>,
    /// Transmitter address.
    pub addr2: Option<MacAddr>,
    /// BSSID.
    pub addr3: Option<MacAddr>,
    pub seq_ctrl: Option<u16>,
}

impl MacHeader {
    /// Parse as much of the header as the buffer covers. Never fails: every
    /// field the buffer cannot cover is absent.
    ///
    /// All three addresses are attempted regardless of the to-DS/from-DS
    /// combination; a frame too short for one simply leaves it absent.
    pub fn parse(frame: &[u8]) -> Self {
        let mut reader = FrameReader::new(frame);

        let frame_control = match (reader.read_u8(), reader.read_u8()) {
            (Ok(b0), Ok(b1)) => FrameControl::from_bytes(b0, b1),
            _ => FrameControl::ZERO,
        };
        let duration = reader.read_u16_le().unwrap_or(0);

        // A failed read leaves the cursor in place, so parsing stops at the
        // first field the buffer cannot cover; later reads would otherwise
        // consume the truncated field's leftover bytes.
        let addr1 = reader.read_mac().ok().map(MacAddr);
        let addr2 = addr1.and_then(|_| reader.read_mac().ok().map(MacAddr));
        let addr3 = addr2.and_then(|_| reader.read_mac().ok().map(MacAddr));
        let seq_ctrl = addr3.and_then(|_| reader.read_u16_le().ok());

        Self {
            frame_control,
            duration,
            addr1,
            addr2,
            addr3,
            seq_ctrl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_control_bit_layout() {
        // version=0, type=0 (mgmt), subtype=8 (beacon); retry + protected set
        let fc = FrameControl::from_bytes(0x80, 0x48);

        assert_eq!(fc.protocol_version, 0);
        assert_eq!(fc.frame_type, FrameType::Management);
        assert_eq!(fc.subtype, 8);
        assert!(fc.is_beacon());
        assert!(fc.retry);
        assert!(fc.protected);
        assert!(!fc.to_ds);
        assert!(!fc.order);
    }

    #[test]
    fn test_frame_control_all_flags() {
        let fc = FrameControl::from_bytes(0x00, 0xff);
        assert!(
            fc.to_ds
                && fc.from_ds
                && fc.more_frag
                && fc.retry
                && fc.pwr_mgmt
                && fc.more_data
                && fc.protected
                && fc.order
        );
    }

    #[test]
    fn test_type_name_lookup() {
        assert_eq!(type_name(FrameType::Management, 8), "Beacon");
        assert_eq!(type_name(FrameType::Management, 4), "Probe request");
        assert_eq!(type_name(FrameType::Management, 12), "Deauthentication");
        assert_eq!(type_name(FrameType::Control, 11), "Control");
        assert_eq!(type_name(FrameType::Data, 0), "Data");
        // Reserved management subtype and extension frames are never empty
        // and never an over-read: the fixed label comes back.
        assert_eq!(type_name(FrameType::Management, 7), "UNKNOWN");
        assert_eq!(type_name(FrameType::Management, 15), "UNKNOWN");
        assert_eq!(type_name(FrameType::Extension, 0), "UNKNOWN");
    }

    #[test]
    fn test_packet_kind_total_and_idempotent() {
        assert_eq!(PacketKind::from_len(RX_CTRL_SIZE), PacketKind::Misc);
        assert_eq!(
            PacketKind::from_len(MGMT_ENVELOPE_SIZE),
            PacketKind::Management
        );
        for len in [0usize, 1, 11, 13, 127, 129, 1500, 4096] {
            let kind = PacketKind::from_len(len);
            assert_eq!(kind, PacketKind::from_len(len));
            assert_eq!(kind, PacketKind::Data);
        }
    }

    #[test]
    fn test_mac_addr_display() {
        let addr = MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        let formatted = addr.to_string();

        assert_eq!(formatted, "AA:BB:CC:DD:EE:FF");
        assert_eq!(formatted.len(), 17);

        // Round-trips the source bytes when re-parsed as hex pairs.
        let parsed: Vec<u8> = formatted
            .split(':')
            .map(|pair| u8::from_str_radix(pair, 16).unwrap())
            .collect();
        assert_eq!(parsed, addr.octets());
    }

    #[test]
    fn test_mac_addr_display_zero_padded() {
        let addr = MacAddr([0x00, 0x01, 0x0a, 0x00, 0x00, 0x09]);
        assert_eq!(addr.to_string(), "00:01:0A:00:00:09");
        assert_eq!(addr.to_string().len(), 17);
    }

    #[test]
    fn test_mac_header_full_parse() {
        let mut frame = vec![0x80, 0x00, 0x3a, 0x01];
        frame.extend_from_slice(&[0xff; 6]); // addr1
        frame.extend_from_slice(&[0x11; 6]); // addr2
        frame.extend_from_slice(&[0x22; 6]); // addr3
        frame.extend_from_slice(&[0x40, 0x02]); // seq ctrl

        let hdr = MacHeader::parse(&frame);
        assert!(hdr.frame_control.is_beacon());
        assert_eq!(hdr.duration, 0x013a);
        assert_eq!(hdr.addr1, Some(MacAddr([0xff; 6])));
        assert_eq!(hdr.addr2, Some(MacAddr([0x11; 6])));
        assert_eq!(hdr.addr3, Some(MacAddr([0x22; 6])));
        assert_eq!(hdr.seq_ctrl, Some(0x0240));
    }

    #[test]
    fn test_mac_header_truncated_addresses() {
        // Frame ends in the middle of addr2: addr2 and addr3 must be absent,
        // not garbage.
        let mut frame = vec![0x80, 0x00, 0x00, 0x00];
        frame.extend_from_slice(&[0xaa; 6]);
        frame.extend_from_slice(&[0xbb; 3]);

        let hdr = MacHeader::parse(&frame);
        assert_eq!(hdr.addr1, Some(MacAddr([0xaa; 6])));
        assert_eq!(hdr.addr2, None);
        assert_eq!(hdr.addr3, None);
        assert_eq!(hdr.seq_ctrl, None);
    }

    #[test]
    fn test_truncated_address_bytes_not_misread_as_seq_ctrl() {
        // Frame ends four bytes into addr3. Those leftover bytes must not
        // be consumed by the sequence-control read once the address parse
        // has failed.
        let mut frame = vec![0x80, 0x00, 0x00, 0x00];
        frame.extend_from_slice(&[0xaa; 6]);
        frame.extend_from_slice(&[0xbb; 6]);
        frame.extend_from_slice(&[0xcc, 0xcc, 0xcc, 0xcc]);

        let hdr = MacHeader::parse(&frame);
        assert_eq!(hdr.addr1, Some(MacAddr([0xaa; 6])));
        assert_eq!(hdr.addr2, Some(MacAddr([0xbb; 6])));
        assert_eq!(hdr.addr3, None);
        assert_eq!(hdr.seq_ctrl, None);
    }

    #[test]
    fn test_mac_header_empty_buffer() {
        let hdr = MacHeader::parse(&[]);
        assert_eq!(hdr.frame_control, FrameControl::ZERO);
        assert_eq!(hdr.addr1, None);
    }

    #[test]
    fn test_mgmt_subtype_round_trip() {
        assert_eq!(MgmtSubtype::from(8), MgmtSubtype::Beacon);
        assert_eq!(MgmtSubtype::from(7), MgmtSubtype::Unknown(7));
        assert_eq!(MgmtSubtype::from(7).name(), "UNKNOWN");
    }
}
