use uuid::Uuid;

use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingArtifact;
use crate::models::state::RecordingState;

/// The single in-flight recording.
///
/// All state changes go through the transition methods, which reject moves
/// the state machine does not allow.
#[derive(Debug)]
pub struct RecordingSession {
    id: Uuid,
    state: RecordingState,
    configuration: Option<CaptureConfiguration>,
    result: Option<RecordingArtifact>,
    result_taken: bool,
    partial: bool,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::nil(),
            state: RecordingState::Idle,
            configuration: None,
            result: None,
            result_taken: false,
            partial: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn configuration(&self) -> Option<&CaptureConfiguration> {
        self.configuration.as_ref()
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Idle → Acquiring with a fresh id.
    pub fn begin(&mut self, configuration: CaptureConfiguration) -> Result<(), CaptureError> {
        self.transition(RecordingState::Acquiring)?;
        self.id = Uuid::new_v4();
        self.configuration = Some(configuration);
        self.result = None;
        self.result_taken = false;
        self.partial = false;
        Ok(())
    }

    pub fn transition(&mut self, next: RecordingState) -> Result<(), CaptureError> {
        if !self.state.can_transition_to(&next) {
            return Err(CaptureError::InvalidTransition {
                from: self.state.name(),
                to: next.name(),
            });
        }
        log::debug!("Session {}: {} → {}", self.id, self.state.name(), next.name());
        self.state = next;
        Ok(())
    }

    /// Update the elapsed seconds carried by Recording/Paused.
    pub fn set_elapsed(&mut self, secs: u64) {
        match &mut self.state {
            RecordingState::Recording { elapsed_secs }
            | RecordingState::Paused { elapsed_secs } => {
                *elapsed_secs = secs;
            }
            _ => {}
        }
    }

    /// The capture source went away; the result will be partial.
    pub fn mark_partial(&mut self) {
        self.partial = true;
    }

    /// Recording/Paused → Finishing, storing the artifact. At most once per session.
    pub fn finish_with(&mut self, artifact: RecordingArtifact) -> Result<(), CaptureError> {
        if self.result.is_some() || self.result_taken {
            return Err(CaptureError::InvalidTransition {
                from: self.state.name(),
                to: RecordingState::Finishing.name(),
            });
        }
        self.transition(RecordingState::Finishing)?;
        self.result = Some(artifact);
        Ok(())
    }

    /// Move the artifact out for hand-off.
    pub fn take_result(&mut self) -> Option<RecordingArtifact> {
        let result = self.result.take();
        if result.is_some() {
            self.result_taken = true;
        }
        result
    }

    /// Return to Idle from any state. No-op when already idle.
    pub fn end(&mut self) {
        if self.state.is_idle() {
            return;
        }
        if let Err(e) = self.transition(RecordingState::Idle) {
            log::error!("Forcing session {} to idle: {}", self.id, e);
            self.state = RecordingState::Idle;
        }
        self.configuration = None;
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}
