use std::sync::Arc;

use crate::models::error::CaptureError;
use crate::models::media_models::{TrackInfo, TrackKind, TrackReadyState};

/// Notifications a captured stream delivers after acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    /// Video data is renderable.
    Ready,
    /// The video track ended (user stopped sharing at the OS level, device lost).
    VideoTrackEnded,
}

/// Callback invoked by the platform when a stream event occurs.
///
/// May fire on any thread; implementations only forward the event.
pub type StreamEventCallback = Arc<dyn Fn(StreamEvent) + Send + Sync + 'static>;

/// Video part of a display-media request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub height: u32,
    pub frame_rate: u32,
}

/// What is asked of the platform's display picker.
///
/// Microphone and camera are never part of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMediaConstraints {
    pub video: VideoConstraints,
    /// Request system audio if the platform offers it.
    pub audio: bool,
}

/// A live screen-capture stream owned by the recorder.
pub trait MediaStream: Send {
    /// Platform identifier of the stream.
    fn id(&self) -> &str;

    /// Current snapshot of every track in the stream.
    fn tracks(&self) -> Vec<TrackInfo>;

    /// Whether video data is already renderable.
    fn is_ready(&self) -> bool;

    /// Register the observer for readiness and track-ended notifications.
    /// Replaces any previously registered observer.
    fn set_event_callback(&mut self, callback: StreamEventCallback);

    /// Stop every track. Must be idempotent.
    fn stop_all_tracks(&mut self);

    fn video_tracks(&self) -> Vec<TrackInfo> {
        self.tracks()
            .into_iter()
            .filter(|t| t.kind == TrackKind::Video)
            .collect()
    }

    /// Number of tracks that have not ended.
    fn live_track_count(&self) -> usize {
        self.tracks()
            .iter()
            .filter(|t| t.ready_state == TrackReadyState::Live)
            .count()
    }
}

/// Platform display-capture entry point (a screen/window picker).
pub trait DisplayMediaProvider: Send {
    /// Prompt for and open a capture stream.
    ///
    /// Returns `CaptureError::PermissionDenied` when the user dismisses the
    /// picker or the host refuses capture.
    fn get_display_media(
        &mut self,
        constraints: &DisplayMediaConstraints,
    ) -> Result<Box<dyn MediaStream>, CaptureError>;
}
