//! Display sink for decoded records
//!
//! One banner line at startup describing the columns, then one fixed-column
//! line per decoded frame. Back-pressure from a slow sink is the caller's
//! concern; the sink itself just writes.

use std::io::{self, Write};

use crate::decode::DecodedRecord;
use crate::Result;

/// Static header describing the record columns.
pub const COLUMN_BANNER: &str = "     MAC Address 1|      MAC Address 2|      MAC Address 3| Ch| RSSI| Pr| T(S)  |           Frame type         |TDS|FDS| MF|RTR|PWR| MD|ENC|STR|   SSID";

/// Consumer of decoded records.
pub trait RecordSink {
    /// Emit the column description once, before any record.
    fn banner(&mut self) -> Result<()>;

    /// Emit one decoded frame.
    fn emit(&mut self, record: &DecodedRecord) -> Result<()>;
}

/// Sink that renders records as text lines on a writer.
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for ConsoleSink<W> {
    fn banner(&mut self) -> Result<()> {
        writeln!(self.writer, "{COLUMN_BANNER}")?;
        Ok(())
    }

    fn emit(&mut self, record: &DecodedRecord) -> Result<()> {
        writeln!(self.writer, "{record}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::RadioMetadata;
    use crate::decode::decode;

    #[test]
    fn test_banner_then_records() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.banner().unwrap();

        let meta = RadioMetadata {
            rssi: -42,
            channel: 6,
            timestamp_us: 0,
        };
        let record = decode(&[0u8; 24], &meta);
        sink.emit(&record).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(COLUMN_BANNER));
        assert!(lines.next().unwrap().starts_with("00:00:00:00:00:00 | "));
        assert!(lines.next().is_none());
    }
}
