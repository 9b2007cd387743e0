use serde::Serialize;

/// Recording session state machine.
///
/// State transitions:
/// ```text
/// idle → acquiring → recording ↔ paused
///          ↓            ↓         ↓
///          ↓         finishing ←──┘
///          ↓            ↓
///          └───────→  idle   (error / cancel from any active state)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RecordingState {
    Idle,
    Acquiring,
    Recording { elapsed_secs: u64 },
    Paused { elapsed_secs: u64 },
    Finishing,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

impl RecordingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }

    /// Recording or paused: a capture stream and encoder are live.
    pub fn is_active(&self) -> bool {
        self.is_recording() || self.is_paused()
    }

    /// Stable lowercase name for frontends and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
            Self::Recording { .. } => "recording",
            Self::Paused { .. } => "paused",
            Self::Finishing => "finishing",
        }
    }

    /// Elapsed seconds if in a state that tracks it.
    pub fn elapsed(&self) -> Option<u64> {
        match self {
            Self::Recording { elapsed_secs } | Self::Paused { elapsed_secs } => Some(*elapsed_secs),
            _ => None,
        }
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: &RecordingState) -> bool {
        use RecordingState::*;
        matches!(
            (self, next),
            (Idle, Acquiring)
                | (Acquiring, Recording { .. })
                | (Acquiring, Idle)
                | (Recording { .. }, Paused { .. })
                | (Paused { .. }, Recording { .. })
                | (Recording { .. }, Finishing)
                | (Paused { .. }, Finishing)
                | (Recording { .. }, Idle)
                | (Paused { .. }, Idle)
                | (Finishing, Idle)
        )
    }
}
