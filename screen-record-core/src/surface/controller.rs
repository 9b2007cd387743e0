use crossbeam_channel::Sender;
use uuid::Uuid;

use crate::session::event::{ControlSignal, SessionEvent};

/// The only capability a control surface holds: sending intents back to the
/// coordinator.
///
/// Controllers handed to a control surface are bound to one session; their
/// signals are ignored once that session is over.
#[derive(Debug, Clone)]
pub struct RecordingController {
    tx: Sender<SessionEvent>,
    session_id: Option<Uuid>,
}

impl RecordingController {
    pub(crate) fn new(tx: Sender<SessionEvent>) -> Self {
        Self {
            tx,
            session_id: None,
        }
    }

    pub(crate) fn for_session(tx: Sender<SessionEvent>, session_id: Uuid) -> Self {
        Self {
            tx,
            session_id: Some(session_id),
        }
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn pause_or_resume(&self) -> bool {
        self.send(ControlSignal::PauseOrResume)
    }

    pub fn stop(&self) -> bool {
        self.send(ControlSignal::Stop)
    }

    pub fn closed_by_user(&self) -> bool {
        self.send(ControlSignal::ClosedByUser)
    }

    /// Returns `false` if the coordinator is gone.
    pub fn send(&self, signal: ControlSignal) -> bool {
        let event = SessionEvent::Control {
            signal,
            session_id: self.session_id,
        };
        match self.tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                log::debug!("Dropping {:?}: coordinator no longer running", signal);
                false
            }
        }
    }
}

/// Cooperative cancellation of the current session, usable from any thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    pub(crate) fn new(tx: Sender<()>) -> Self {
        Self { tx }
    }

    /// Request cancellation. Mid-acquisition this releases any stream that
    /// completes afterwards; otherwise the session is torn down without an
    /// artifact.
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }
}
