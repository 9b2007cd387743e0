//! In-memory doubles of the platform traits, shared by unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::error::CaptureError;
use crate::models::media_models::{PauseGlyph, TrackInfo, TrackKind, TrackReadyState, UserNotice};
use crate::models::recording_result::RecordingArtifact;
use crate::models::state::RecordingState;
use crate::surface::controller::RecordingController;
use crate::traits::capture_delegate::{RecordingDelegate, ReviewSink};
use crate::traits::control_surface::{SurfaceFactory, SurfaceSpec, SurfaceWindow};
use crate::traits::display_media::{
    DisplayMediaConstraints, DisplayMediaProvider, MediaStream, StreamEvent, StreamEventCallback,
};
use crate::traits::media_encoder::{EncoderCallback, EncoderEvent, EncoderState, MediaEncoder};

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --- Display capture ---

/// How a fake stream reports readiness once an observer is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Immediate,
    Signalled,
    Never,
    EndsDuringWait,
}

struct StreamState {
    tracks: Vec<TrackInfo>,
    ready: bool,
    callback: Option<StreamEventCallback>,
    stop_calls: usize,
}

#[derive(Clone)]
pub struct StreamProbe(Arc<Mutex<StreamState>>);

impl StreamProbe {
    pub fn live_track_count(&self) -> usize {
        self.0
            .lock()
            .tracks
            .iter()
            .filter(|t| t.ready_state == TrackReadyState::Live)
            .count()
    }

    pub fn stop_calls(&self) -> usize {
        self.0.lock().stop_calls
    }

    pub fn emit(&self, event: StreamEvent) {
        let callback = self.0.lock().callback.clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    /// The user stops sharing from the OS.
    pub fn end_video(&self) {
        for track in self.0.lock().tracks.iter_mut() {
            if track.kind == TrackKind::Video {
                track.ready_state = TrackReadyState::Ended;
            }
        }
        self.emit(StreamEvent::VideoTrackEnded);
    }
}

pub struct FakeStream {
    id: String,
    readiness: Readiness,
    probe: StreamProbe,
}

fn track(id: &str, kind: TrackKind) -> TrackInfo {
    TrackInfo {
        id: id.to_string(),
        kind,
        label: format!("{:?} track", kind),
        enabled: true,
        ready_state: TrackReadyState::Live,
    }
}

impl FakeStream {
    /// One live, ready video track.
    pub fn new(id: &str) -> (Self, StreamProbe) {
        Self::build(id, vec![track("v0", TrackKind::Video)], Readiness::Immediate)
    }

    /// Video plus system audio.
    pub fn with_audio(id: &str) -> (Self, StreamProbe) {
        Self::build(
            id,
            vec![track("v0", TrackKind::Video), track("a0", TrackKind::Audio)],
            Readiness::Immediate,
        )
    }

    fn build(id: &str, tracks: Vec<TrackInfo>, readiness: Readiness) -> (Self, StreamProbe) {
        let probe = StreamProbe(Arc::new(Mutex::new(StreamState {
            tracks,
            ready: readiness == Readiness::Immediate,
            callback: None,
            stop_calls: 0,
        })));
        let stream = Self {
            id: id.to_string(),
            readiness,
            probe: probe.clone(),
        };
        (stream, probe)
    }
}

impl MediaStream for FakeStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<TrackInfo> {
        self.probe.0.lock().tracks.clone()
    }

    fn is_ready(&self) -> bool {
        self.probe.0.lock().ready
    }

    fn set_event_callback(&mut self, callback: StreamEventCallback) {
        self.probe.0.lock().callback = Some(callback);
        match self.readiness {
            Readiness::Signalled => {
                self.probe.0.lock().ready = true;
                self.probe.emit(StreamEvent::Ready);
            }
            Readiness::EndsDuringWait => self.probe.end_video(),
            Readiness::Immediate | Readiness::Never => {}
        }
    }

    fn stop_all_tracks(&mut self) {
        let mut state = self.probe.0.lock();
        state.stop_calls += 1;
        for track in state.tracks.iter_mut() {
            track.ready_state = TrackReadyState::Ended;
        }
    }
}

struct DisplayState {
    readiness: Readiness,
    deny: bool,
    video: bool,
    requests: usize,
    issued: Vec<StreamProbe>,
    last_constraints: Option<DisplayMediaConstraints>,
}

#[derive(Clone)]
pub struct FakeDisplay(Arc<Mutex<DisplayState>>);

impl FakeDisplay {
    pub fn new(readiness: Readiness) -> Self {
        Self(Arc::new(Mutex::new(DisplayState {
            readiness,
            deny: false,
            video: true,
            requests: 0,
            issued: Vec::new(),
            last_constraints: None,
        })))
    }

    /// The user dismisses the picker.
    pub fn denied() -> Self {
        let display = Self::new(Readiness::Immediate);
        display.0.lock().deny = true;
        display
    }

    /// Streams come back without a video track.
    pub fn without_video(self) -> Self {
        self.0.lock().video = false;
        self
    }

    pub fn requests(&self) -> usize {
        self.0.lock().requests
    }

    pub fn last_constraints(&self) -> Option<DisplayMediaConstraints> {
        self.0.lock().last_constraints
    }

    pub fn last_stream(&self) -> Option<StreamProbe> {
        self.0.lock().issued.last().cloned()
    }

    /// Live tracks across every stream ever handed out.
    pub fn live_track_count(&self) -> usize {
        let issued = self.0.lock().issued.clone();
        issued.iter().map(|p| p.live_track_count()).sum()
    }
}

impl DisplayMediaProvider for FakeDisplay {
    fn get_display_media(
        &mut self,
        constraints: &DisplayMediaConstraints,
    ) -> Result<Box<dyn MediaStream>, CaptureError> {
        let mut state = self.0.lock();
        state.requests += 1;
        state.last_constraints = Some(*constraints);
        if state.deny {
            return Err(CaptureError::PermissionDenied);
        }

        let mut tracks = Vec::new();
        if state.video {
            tracks.push(track("v0", TrackKind::Video));
        }
        if constraints.audio {
            tracks.push(track("a0", TrackKind::Audio));
        }

        let id = format!("stream-{}", state.requests);
        let (stream, probe) = FakeStream::build(&id, tracks, state.readiness);
        state.issued.push(probe);
        Ok(Box::new(stream))
    }
}

// --- Encoder ---

#[derive(Default)]
struct EncoderInner {
    state: EncoderState,
    callback: Option<EncoderCallback>,
    mime_type: Option<String>,
    pause_calls: usize,
    resume_calls: usize,
    stop_calls: usize,
    fail_start: bool,
    fail_stop: bool,
    deferred_stop: bool,
}

#[derive(Clone, Default)]
pub struct FakeEncoder(Arc<Mutex<EncoderInner>>);

impl FakeEncoder {
    /// Emits `Stopped` synchronously from `stop`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start() -> Self {
        let encoder = Self::new();
        encoder.0.lock().fail_start = true;
        encoder
    }

    pub fn failing_stop() -> Self {
        let encoder = Self::new();
        encoder.0.lock().fail_stop = true;
        encoder
    }

    /// `stop` only flips state; the test calls [`FakeEncoder::emit_stopped`].
    pub fn deferred_stop() -> Self {
        let encoder = Self::new();
        encoder.0.lock().deferred_stop = true;
        encoder
    }

    fn emit(&self, event: EncoderEvent) {
        let callback = self.0.lock().callback.clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    pub fn emit_chunk(&self, data: Vec<u8>) {
        self.emit(EncoderEvent::DataAvailable(data));
    }

    pub fn emit_stopped(&self) {
        self.emit(EncoderEvent::Stopped);
    }

    /// The platform stops the encoder on its own (e.g. its source ended).
    pub fn platform_stop(&self) {
        self.0.lock().state = EncoderState::Inactive;
        self.emit_stopped();
    }

    pub fn mime_type(&self) -> Option<String> {
        self.0.lock().mime_type.clone()
    }

    pub fn pause_calls(&self) -> usize {
        self.0.lock().pause_calls
    }

    pub fn resume_calls(&self) -> usize {
        self.0.lock().resume_calls
    }

    pub fn stop_calls(&self) -> usize {
        self.0.lock().stop_calls
    }

    pub fn current_state(&self) -> EncoderState {
        self.0.lock().state
    }
}

impl MediaEncoder for FakeEncoder {
    fn start(
        &mut self,
        _stream: &dyn MediaStream,
        mime_type: &str,
        callback: EncoderCallback,
    ) -> Result<(), CaptureError> {
        let mut inner = self.0.lock();
        if inner.fail_start {
            return Err(CaptureError::EncodingFailed("unsupported mime type".into()));
        }
        inner.state = EncoderState::Recording;
        inner.mime_type = Some(mime_type.to_string());
        inner.callback = Some(callback);
        Ok(())
    }

    fn pause(&mut self) {
        let mut inner = self.0.lock();
        inner.pause_calls += 1;
        inner.state = EncoderState::Paused;
    }

    fn resume(&mut self) {
        let mut inner = self.0.lock();
        inner.resume_calls += 1;
        inner.state = EncoderState::Recording;
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        let deferred = {
            let mut inner = self.0.lock();
            inner.stop_calls += 1;
            if inner.fail_stop {
                return Err(CaptureError::EncodingFailed("encoder wedged".into()));
            }
            inner.state = EncoderState::Inactive;
            inner.deferred_stop
        };
        if !deferred {
            self.emit_stopped();
        }
        Ok(())
    }

    fn state(&self) -> EncoderState {
        self.0.lock().state
    }
}

// --- Control surface ---

struct WindowState {
    closed: bool,
    focus_count: usize,
    close_calls: usize,
    timer_text: String,
    glyph: String,
    controller: RecordingController,
}

#[derive(Clone)]
pub struct WindowProbe(Arc<Mutex<WindowState>>);

impl WindowProbe {
    pub fn is_closed(&self) -> bool {
        self.0.lock().closed
    }

    pub fn focus_count(&self) -> usize {
        self.0.lock().focus_count
    }

    pub fn close_calls(&self) -> usize {
        self.0.lock().close_calls
    }

    pub fn timer_text(&self) -> String {
        self.0.lock().timer_text.clone()
    }

    pub fn glyph(&self) -> String {
        self.0.lock().glyph.clone()
    }

    pub fn click_pause(&self) {
        let controller = self.0.lock().controller.clone();
        controller.pause_or_resume();
    }

    pub fn click_stop(&self) {
        let controller = self.0.lock().controller.clone();
        controller.stop();
    }

    /// The user closes the window; its unload handler reports it.
    pub fn user_close(&self) {
        let controller = {
            let mut state = self.0.lock();
            state.closed = true;
            state.controller.clone()
        };
        controller.closed_by_user();
    }
}

struct FakeWindow(WindowProbe);

impl SurfaceWindow for FakeWindow {
    fn is_closed(&self) -> bool {
        self.0.is_closed()
    }

    fn focus(&mut self) {
        self.0 .0.lock().focus_count += 1;
    }

    fn set_timer_text(&mut self, text: &str) {
        self.0 .0.lock().timer_text = text.to_string();
    }

    fn set_pause_glyph(&mut self, glyph: &str) {
        self.0 .0.lock().glyph = glyph.to_string();
    }

    fn close(&mut self) {
        let controller = {
            let mut state = self.0 .0.lock();
            state.close_calls += 1;
            state.closed = true;
            state.controller.clone()
        };
        // Unload fires on programmatic close too.
        controller.closed_by_user();
    }
}

struct FactoryState {
    screen_width: u32,
    blocked: bool,
    windows: Vec<WindowProbe>,
    last_spec: Option<SurfaceSpec>,
}

#[derive(Clone)]
pub struct FakeSurfaceFactory(Arc<Mutex<FactoryState>>);

impl FakeSurfaceFactory {
    pub fn new(screen_width: u32) -> Self {
        Self(Arc::new(Mutex::new(FactoryState {
            screen_width,
            blocked: false,
            windows: Vec::new(),
            last_spec: None,
        })))
    }

    /// A popup blocker refuses every window.
    pub fn blocked() -> Self {
        let factory = Self::new(1920);
        factory.0.lock().blocked = true;
        factory
    }

    pub fn opened(&self) -> usize {
        self.0.lock().windows.len()
    }

    pub fn live_windows(&self) -> usize {
        let windows = self.0.lock().windows.clone();
        windows.iter().filter(|w| !w.is_closed()).count()
    }

    pub fn window(&self, index: usize) -> WindowProbe {
        self.0.lock().windows[index].clone()
    }

    pub fn last_spec(&self) -> Option<SurfaceSpec> {
        self.0.lock().last_spec.clone()
    }
}

impl SurfaceFactory for FakeSurfaceFactory {
    fn screen_width(&self) -> u32 {
        self.0.lock().screen_width
    }

    fn open(
        &mut self,
        spec: &SurfaceSpec,
        controller: RecordingController,
    ) -> Option<Box<dyn SurfaceWindow>> {
        let mut state = self.0.lock();
        state.last_spec = Some(spec.clone());
        if state.blocked {
            return None;
        }
        let probe = WindowProbe(Arc::new(Mutex::new(WindowState {
            closed: false,
            focus_count: 0,
            close_calls: 0,
            timer_text: spec.timer_text.clone(),
            glyph: spec.pause_glyph.clone(),
            controller,
        })));
        state.windows.push(probe.clone());
        Some(Box::new(FakeWindow(probe)))
    }
}

// --- Host collaborators ---

#[derive(Default)]
pub struct DelegateSpy {
    states: Mutex<Vec<RecordingState>>,
    elapsed: Mutex<Vec<String>>,
    glyphs: Mutex<Vec<PauseGlyph>>,
    notices: Mutex<Vec<UserNotice>>,
    surface_warnings: Mutex<Vec<bool>>,
    previews: Mutex<Vec<Option<String>>>,
}

impl DelegateSpy {
    pub fn state_names(&self) -> Vec<&'static str> {
        self.states.lock().iter().map(|s| s.name()).collect()
    }

    pub fn last_elapsed(&self) -> Option<String> {
        self.elapsed.lock().last().cloned()
    }

    pub fn last_glyph(&self) -> Option<PauseGlyph> {
        self.glyphs.lock().last().copied()
    }

    pub fn notices(&self) -> Vec<UserNotice> {
        self.notices.lock().clone()
    }

    pub fn surface_warnings(&self) -> Vec<bool> {
        self.surface_warnings.lock().clone()
    }

    pub fn previews(&self) -> Vec<Option<String>> {
        self.previews.lock().clone()
    }
}

impl RecordingDelegate for DelegateSpy {
    fn on_state_changed(&self, state: &RecordingState) {
        self.states.lock().push(*state);
    }

    fn on_elapsed_updated(&self, text: &str) {
        self.elapsed.lock().push(text.to_string());
    }

    fn on_pause_glyph_changed(&self, glyph: PauseGlyph) {
        self.glyphs.lock().push(glyph);
    }

    fn on_notice(&self, notice: &UserNotice) {
        self.notices.lock().push(notice.clone());
    }

    fn on_surface_warning(&self, visible: bool) {
        self.surface_warnings.lock().push(visible);
    }

    fn on_live_preview(&self, stream_id: Option<&str>) {
        self.previews.lock().push(stream_id.map(str::to_string));
    }
}

#[derive(Default)]
pub struct ReviewSpy {
    artifacts: Mutex<Vec<RecordingArtifact>>,
}

impl ReviewSpy {
    pub fn artifacts(&self) -> Vec<RecordingArtifact> {
        self.artifacts.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.artifacts.lock().len()
    }
}

impl ReviewSink for ReviewSpy {
    fn receive(&self, artifact: RecordingArtifact) {
        self.artifacts.lock().push(artifact);
    }
}
