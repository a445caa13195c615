//! Audio recorder state machine.
//!
//! DESIGN
//! ======
//! Explicit two-phase machine so the UI toggle cannot double-start or
//! double-stop the browser recorder. The machine buffers raw chunks and
//! materializes them into a single pending attachment on finish; the
//! browser glue in `util::audio` owns the actual `MediaRecorder`.

#[cfg(test)]
#[path = "recorder_test.rs"]
mod recorder_test;

use super::chat::PendingAttachment;

/// Shown when `getUserMedia`/`MediaRecorder` are missing.
pub const RECORDING_UNSUPPORTED_ERROR: &str =
    "Audio recording is not supported in this browser";

/// Fallback when capture fails without a specific message.
pub const RECORDING_FAILED_ERROR: &str = "Audio recording failed";

/// Captured clips are always webm.
pub const RECORDING_MIME_TYPE: &str = "audio/webm";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderPhase {
    #[default]
    Idle,
    Recording,
}

#[derive(Clone, Debug, Default)]
pub struct Recorder {
    phase: RecorderPhase,
    chunks: Vec<Vec<u8>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.phase == RecorderPhase::Recording
    }

    /// Enter the recording phase. Rejected while already recording so a
    /// second capture cannot clobber the buffer.
    pub fn start(&mut self) -> Result<(), &'static str> {
        if self.phase == RecorderPhase::Recording {
            return Err("already recording");
        }
        self.chunks.clear();
        self.phase = RecorderPhase::Recording;
        Ok(())
    }

    /// Buffer one chunk from the device callback. Chunks arriving while
    /// idle (late callbacks after cancel) are dropped.
    pub fn push_chunk(&mut self, bytes: Vec<u8>) {
        if self.phase == RecorderPhase::Recording {
            self.chunks.push(bytes);
        }
    }

    /// Leave the recording phase and materialize the buffered chunks into
    /// one attachment named by `timestamp_ms`. No-op while idle.
    pub fn finish(&mut self, timestamp_ms: u64) -> Option<PendingAttachment> {
        if self.phase == RecorderPhase::Idle {
            return None;
        }
        self.phase = RecorderPhase::Idle;
        let bytes: Vec<u8> = self.chunks.drain(..).flatten().collect();
        let size = bytes.len() as u64;
        Some(PendingAttachment {
            name: format!("recording-{timestamp_ms}.webm"),
            mime_type: RECORDING_MIME_TYPE.to_owned(),
            size,
            bytes,
            preview_uri: None,
        })
    }

    /// Abort a capture (device error mid-recording), dropping the buffer.
    pub fn cancel(&mut self) {
        self.phase = RecorderPhase::Idle;
        self.chunks.clear();
    }
}
