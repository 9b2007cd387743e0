use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::models::config::ARTIFACT_MIME_TYPE;
use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingArtifact;
use crate::processing::chunk_buffer::ChunkBuffer;
use crate::session::event::SessionEvent;
use crate::traits::display_media::MediaStream;
use crate::traits::media_encoder::{EncoderEvent, EncoderState, MediaEncoder};

/// Buffer counters exposed for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    pub chunks_received: u64,
    pub chunks_buffered: usize,
    pub empty_chunks_dropped: u64,
    pub bytes_buffered: u64,
}

/// Wraps the platform encoder and buffers its output.
///
/// Data arrives on the encoder's callback thread and goes straight into the
/// shared [`ChunkBuffer`]; the stop notification is forwarded to the
/// coordinator as `SessionEvent::EncoderStopped`.
pub struct EncoderAdapter<E: MediaEncoder> {
    encoder: E,
    chunks: Arc<Mutex<ChunkBuffer>>,
}

impl<E: MediaEncoder> EncoderAdapter<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            chunks: Arc::new(Mutex::new(ChunkBuffer::new())),
        }
    }

    pub fn state(&self) -> EncoderState {
        self.encoder.state()
    }

    /// Start encoding `stream`. Any previously buffered output is dropped.
    pub fn start(
        &mut self,
        stream: &dyn MediaStream,
        mime_type: &str,
        session_id: Uuid,
        events: Sender<SessionEvent>,
    ) -> Result<(), CaptureError> {
        self.chunks.lock().reset();

        let chunks = Arc::clone(&self.chunks);
        let callback = Arc::new(move |event: EncoderEvent| match event {
            EncoderEvent::DataAvailable(data) => {
                chunks.lock().push(data);
            }
            EncoderEvent::Stopped => {
                let _ = events.send(SessionEvent::EncoderStopped { session_id });
            }
        });

        self.encoder.start(stream, mime_type, callback)?;
        log::info!("Encoder started ({})", mime_type);
        Ok(())
    }

    /// Pause if currently recording. Returns whether the encoder was paused.
    pub fn pause(&mut self) -> bool {
        if self.encoder.state() != EncoderState::Recording {
            return false;
        }
        self.encoder.pause();
        true
    }

    /// Resume if currently paused. Returns whether the encoder was resumed.
    pub fn resume(&mut self) -> bool {
        if self.encoder.state() != EncoderState::Paused {
            return false;
        }
        self.encoder.resume();
        true
    }

    /// Ask the encoder to stop.
    ///
    /// Returns `Ok(false)` if it was already inactive, in which case no
    /// `EncoderStopped` event will follow.
    pub fn stop(&mut self) -> Result<bool, CaptureError> {
        if self.encoder.state() == EncoderState::Inactive {
            return Ok(false);
        }
        self.encoder.stop()?;
        Ok(true)
    }

    /// Drain the buffered chunks into the final artifact.
    pub fn finalize(
        &mut self,
        session_id: &str,
        elapsed_secs: u64,
        partial: bool,
    ) -> RecordingArtifact {
        let chunks = self.chunks.lock().take();
        RecordingArtifact::assemble(
            session_id,
            &chunks,
            ARTIFACT_MIME_TYPE,
            elapsed_secs,
            partial,
        )
    }

    /// Stop the encoder if needed and throw away everything buffered.
    pub fn discard(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("Encoder failed to stop during discard: {}", e);
        }
        self.chunks.lock().reset();
    }

    pub fn stats(&self) -> EncoderStats {
        let chunks = self.chunks.lock();
        EncoderStats {
            chunks_received: chunks.received(),
            chunks_buffered: chunks.len(),
            empty_chunks_dropped: chunks.empty_dropped(),
            bytes_buffered: chunks.total_bytes(),
        }
    }
}
