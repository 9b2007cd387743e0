use serde::{Deserialize, Serialize};

/// Kind of a platform media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

/// Lifecycle of a platform media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackReadyState {
    Live,
    Ended,
}

/// Snapshot of a media track inside a captured stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub id: String,
    pub kind: TrackKind,
    pub label: String,
    pub enabled: bool,
    pub ready_state: TrackReadyState,
}

impl TrackInfo {
    /// Enabled and not ended.
    pub fn is_usable(&self) -> bool {
        self.enabled && self.ready_state == TrackReadyState::Live
    }
}

/// Glyph shown on the pause/resume button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseGlyph {
    /// Shown while recording: pressing it pauses.
    #[default]
    Pause,
    /// Shown while paused: pressing it resumes.
    Resume,
}

impl PauseGlyph {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "||",
            Self::Resume => "▶",
        }
    }
}

/// User-facing messages raised by the recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNotice {
    AcquisitionCancelled,
    DeviceUnavailable(String),
    AcquisitionFailed(String),
    EmptyResult,
    SurfaceBlocked,
}

impl UserNotice {
    pub fn message(&self) -> String {
        match self {
            Self::AcquisitionCancelled => {
                "Recording cancelled: Please ensure you select a screen/window.".to_string()
            }
            Self::DeviceUnavailable(reason) => {
                format!("Screen sharing is no longer available: {}", reason)
            }
            Self::AcquisitionFailed(details) => {
                format!("Error starting recording. Details: {}", details)
            }
            Self::EmptyResult => "⚠️ Warning: The resulting video file is empty. \
                Please try again or check browser permissions."
                .to_string(),
            Self::SurfaceBlocked => {
                "Popup blocked: allow popups to use the floating recording controls.".to_string()
            }
        }
    }

    /// Alert-style notices interrupt the user; the rest are shown inline.
    pub fn is_alert(&self) -> bool {
        !matches!(self, Self::SurfaceBlocked)
    }
}

/// Counters for debugging recording sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingDiagnostics {
    pub chunks_received: u64,
    pub empty_chunks_dropped: u64,
    pub bytes_buffered: u64,
    pub timer_ticks: u64,
    pub stale_events_ignored: u64,
}
