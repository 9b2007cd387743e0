//! # screen-record-core
//!
//! Platform-agnostic screen recording core library.
//!
//! Provides stream acquisition, encoder buffering, the elapsed-time ticker,
//! floating control surface management, and session orchestration. Host
//! platforms implement `DisplayMediaProvider`, `MediaEncoder` and
//! `SurfaceFactory` and plug into the generic `RecordingCoordinator`.
//!
//! ## Architecture
//!
//! ```text
//! screen-record-core (this crate)
//! ├── traits/       ← DisplayMediaProvider, MediaStream, MediaEncoder, SurfaceFactory, RecordingDelegate
//! ├── models/       ← CaptureError, RecordingState, CaptureConfiguration, RecordingArtifact, etc.
//! ├── processing/   ← ChunkBuffer, elapsed-time formatting
//! ├── capture/      ← StreamAcquirer, CaptureResources
//! ├── encoder/      ← EncoderAdapter
//! ├── timer/        ← TimerService, RepeatingTask
//! ├── surface/      ← ControlSurface, RecordingController
//! └── session/      ← RecordingCoordinator (generic orchestrator), RecordingSession
//! ```

pub mod capture;
pub mod encoder;
pub mod models;
pub mod processing;
pub mod session;
pub mod surface;
pub mod timer;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use models::config::{CaptureConfiguration, CaptureSettings};
pub use models::error::{AcquisitionError, CaptureError, RecordingWarning};
pub use models::media_models::{
    PauseGlyph, RecordingDiagnostics, TrackInfo, TrackKind, TrackReadyState, UserNotice,
};
pub use models::recording_result::{RecordingArtifact, RecordingMetadata};
pub use models::state::RecordingState;
pub use processing::chunk_buffer::ChunkBuffer;
pub use processing::time_format::format_elapsed;
pub use session::coordinator::RecordingCoordinator;
pub use surface::controller::{CancelHandle, RecordingController};
pub use timer::service::{ElapsedObserver, TimerService};
pub use traits::capture_delegate::{RecordingDelegate, ReviewSink};
pub use traits::control_surface::{SurfaceFactory, SurfaceSpec, SurfaceWindow};
pub use traits::display_media::{
    DisplayMediaConstraints, DisplayMediaProvider, MediaStream, StreamEvent, StreamEventCallback,
};
pub use traits::media_encoder::{EncoderCallback, EncoderEvent, EncoderState, MediaEncoder};
