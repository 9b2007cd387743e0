use std::time::Duration;

use serde::Deserialize;

/// Capture frame rate requested from the platform. Not configurable.
pub const FRAME_RATE: u32 = 30;

/// Default bound on the wait for a freshly acquired stream to become renderable.
pub const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_millis(5000);

/// Timer granularity.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Mime type the platform encoder is started with.
pub const ENCODER_MIME_TYPE: &str = "video/webm; codecs=vp9";

/// Container type of the final artifact handed to review.
pub const ARTIFACT_MIME_TYPE: &str = "video/webm";

/// Settings as produced by the host's settings panel.
///
/// `mic` and `cam` are accepted for compatibility with older panels and
/// ignored: microphone and camera capture are always disabled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSettings {
    /// Capture height in pixels.
    pub quality: u32,

    #[serde(default)]
    pub mic: Option<serde_json::Value>,

    #[serde(default)]
    pub cam: Option<serde_json::Value>,
}

impl CaptureSettings {
    pub fn new(quality: u32) -> Self {
        Self {
            quality,
            mic: None,
            cam: None,
        }
    }

    /// Parse the settings panel's JSON payload.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid capture settings: {}", e))
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::new(1080)
    }
}

/// Effective configuration for a recording session.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfiguration {
    /// Requested capture height in pixels (default: 1080).
    pub video_height: u32,

    /// Requested frame rate (always [`FRAME_RATE`]).
    pub frame_rate: u32,

    /// Request system audio alongside the display (default: true).
    pub capture_system_audio: bool,

    /// Always false after [`CaptureConfiguration::from_settings`].
    pub capture_microphone: bool,

    /// Always false after [`CaptureConfiguration::from_settings`].
    pub capture_camera: bool,

    /// Bound on the stream readiness wait (default: 5000 ms).
    pub readiness_timeout: Duration,

    /// Mime type handed to the platform encoder.
    pub encoder_mime_type: String,
}

impl CaptureConfiguration {
    /// Build the effective configuration, applying the fixed policy that
    /// never captures microphone or camera regardless of the settings.
    pub fn from_settings(settings: &CaptureSettings) -> Self {
        if settings.mic.is_some() || settings.cam.is_some() {
            log::debug!(
                "Ignoring mic/cam settings ({:?}/{:?}); microphone and camera capture are disabled",
                settings.mic,
                settings.cam
            );
        }

        Self {
            video_height: settings.quality,
            ..Default::default()
        }
        .with_fixed_policy()
    }

    /// Force microphone and camera off.
    pub fn with_fixed_policy(mut self) -> Self {
        self.capture_microphone = false;
        self.capture_camera = false;
        self.frame_rate = FRAME_RATE;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.video_height == 0 {
            return Err("capture height must be positive".into());
        }
        if self.frame_rate == 0 {
            return Err("frame rate must be positive".into());
        }
        if self.capture_microphone || self.capture_camera {
            return Err("microphone and camera capture are not supported".into());
        }
        if self.encoder_mime_type.is_empty() {
            return Err("encoder mime type must not be empty".into());
        }
        Ok(())
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            video_height: 1080,
            frame_rate: FRAME_RATE,
            capture_system_audio: true,
            capture_microphone: false,
            capture_camera: false,
            readiness_timeout: DEFAULT_READINESS_TIMEOUT,
            encoder_mime_type: ENCODER_MIME_TYPE.to_string(),
        }
    }
}
