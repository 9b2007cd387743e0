use thiserror::Error;

/// Reasons a screen-capture stream could not be acquired.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("screen sharing cancelled")]
    UserCancelled,

    #[error("video track not available")]
    NoVideoTrack,

    #[error("screen sharing terminated by user/OS")]
    TrackEnded,
}

/// Errors that can occur during screen recording operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("control surface failed: {0}")]
    SurfaceFailed(String),

    #[error("a recording session is already active")]
    SessionActive,

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Non-fatal conditions reported alongside a recording.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordingWarning {
    #[error("control surface blocked by host")]
    SurfaceBlocked,

    #[error("resulting video is empty")]
    EmptyArtifact,

    #[error("stream readiness not signalled before timeout")]
    ReadinessTimeout,
}
