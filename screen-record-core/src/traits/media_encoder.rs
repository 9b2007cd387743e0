use std::sync::Arc;

use crate::models::error::CaptureError;
use crate::traits::display_media::MediaStream;

/// Output of the platform encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderEvent {
    /// An encoded segment. May be empty (keepalive).
    DataAvailable(Vec<u8>),
    /// The encoder has flushed its last segment and stopped.
    Stopped,
}

/// Callback invoked when the encoder produces output.
pub type EncoderCallback = Arc<dyn Fn(EncoderEvent) + Send + Sync + 'static>;

/// Encoder state as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderState {
    #[default]
    Inactive,
    Recording,
    Paused,
}

/// Interface for the platform's streaming media encoder.
///
/// Implementations deliver `DataAvailable` segments in order and exactly one
/// `Stopped` after `stop`, possibly synchronously from inside `stop`.
pub trait MediaEncoder: Send {
    /// Begin encoding `stream` into `mime_type`, delivering output via `callback`.
    fn start(
        &mut self,
        stream: &dyn MediaStream,
        mime_type: &str,
        callback: EncoderCallback,
    ) -> Result<(), CaptureError>;

    fn pause(&mut self);

    fn resume(&mut self);

    /// Request a stop. Completion is signalled through `EncoderEvent::Stopped`.
    fn stop(&mut self) -> Result<(), CaptureError>;

    fn state(&self) -> EncoderState;
}
