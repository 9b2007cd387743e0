use uuid::Uuid;

/// User intents sent from the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    PauseOrResume,
    Stop,
    /// The surface was closed by the user; implies `Stop`.
    ClosedByUser,
}

/// Everything that reaches the coordinator from outside its own calls.
///
/// Platform callbacks, timer ticks and control-surface signals only enqueue
/// these; the coordinator applies them on its own thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// `session_id` is set for signals from a session's control surface and
    /// `None` for the primary view.
    Control {
        signal: ControlSignal,
        session_id: Option<Uuid>,
    },
    TrackEnded { session_id: Uuid },
    EncoderStopped { session_id: Uuid },
    TimerTick { generation: u64 },
}
