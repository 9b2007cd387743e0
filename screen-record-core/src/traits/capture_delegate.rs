use crate::models::media_models::{PauseGlyph, UserNotice};
use crate::models::recording_result::RecordingArtifact;
use crate::models::state::RecordingState;

/// Event delegate for the host view (main page).
///
/// All methods are called from the thread driving the coordinator.
/// Implementations should marshal to the UI thread if needed.
pub trait RecordingDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: &RecordingState);

    /// Called with the formatted `HH:MM:SS` elapsed time.
    fn on_elapsed_updated(&self, text: &str);

    /// Called when the pause/resume glyph changes.
    fn on_pause_glyph_changed(&self, glyph: PauseGlyph);

    /// Called with a user-facing message (alert or inline).
    fn on_notice(&self, notice: &UserNotice);

    /// Show or hide the inline "popup blocked" warning.
    fn on_surface_warning(&self, visible: bool);

    /// Show or hide the live preview of the captured stream.
    fn on_live_preview(&self, stream_id: Option<&str>);
}

/// Post-recording review collaborator (preview, upload, discard).
pub trait ReviewSink: Send + Sync {
    /// Receives the finished artifact. Called once per finished session.
    fn receive(&self, artifact: RecordingArtifact);
}
