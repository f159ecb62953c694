//! Capture source abstraction
//!
//! A capture source delivers `(frame, metadata)` pairs from a radio in
//! monitor/promiscuous mode. Radio and driver initialization, channel tuning
//! and the subscription mechanism live behind this trait; the decoder only
//! sees the delivered pairs.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::warn;

use crate::{Result, SniffError, MAX_FRAME_SIZE};

/// Receiver-side telemetry accompanying each captured frame. Independent of
/// frame content.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RadioMetadata {
    /// Received signal strength in dBm.
    pub rssi: i8,
    /// Channel the radio was tuned to, externally supplied or defaulted.
    pub channel: u8,
    /// Receive timestamp (microseconds since epoch).
    pub timestamp_us: u64,
}

/// Source of captured 802.11 frames.
#[async_trait]
pub trait CaptureSource: Send {
    /// Receive the next frame with metadata. `None` means the source is
    /// exhausted.
    async fn next_frame(&mut self) -> Result<Option<(Bytes, RadioMetadata)>>;

    /// Shut down the source.
    async fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Replay capture source backed by a canned frame list.
///
/// Stands in for a radio backend in tests and demo runs.
#[derive(Debug, Default)]
pub struct MockCapture {
    frames: VecDeque<(Bytes, RadioMetadata)>,
}

impl MockCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frames(frames: Vec<(Bytes, RadioMetadata)>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue a frame for replay. Oversized frames are rejected the way a
    /// real backend would drop them.
    pub fn push_frame(&mut self, frame: Bytes, meta: RadioMetadata) -> Result<()> {
        if frame.len() > MAX_FRAME_SIZE {
            return Err(SniffError::Capture(format!(
                "frame too large: {} bytes (max {})",
                frame.len(),
                MAX_FRAME_SIZE
            )));
        }
        self.frames.push_back((frame, meta));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[async_trait]
impl CaptureSource for MockCapture {
    async fn next_frame(&mut self) -> Result<Option<(Bytes, RadioMetadata)>> {
        Ok(self.frames.pop_front())
    }

    async fn shutdown(&mut self) -> Result<()> {
        if !self.frames.is_empty() {
            warn!(pending = self.frames.len(), "shutting down with frames queued");
        }
        self.frames.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replay_order_and_exhaustion() {
        let meta = RadioMetadata {
            rssi: -40,
            channel: 6,
            timestamp_us: 0,
        };
        let mut source = MockCapture::with_frames(vec![
            (Bytes::from_static(&[1, 2]), meta),
            (Bytes::from_static(&[3]), meta),
        ]);

        let (first, _) = source.next_frame().await.unwrap().unwrap();
        assert_eq!(&first[..], &[1, 2]);
        let (second, _) = source.next_frame().await.unwrap().unwrap();
        assert_eq!(&second[..], &[3]);
        assert!(source.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_frame_rejected() {
        let mut source = MockCapture::new();
        let huge = Bytes::from(vec![0u8; MAX_FRAME_SIZE + 1]);
        let result = source.push_frame(huge, RadioMetadata::default());
        assert!(matches!(result, Err(SniffError::Capture(_))));
        assert!(source.is_empty());
    }
}
