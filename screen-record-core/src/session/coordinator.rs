use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use uuid::Uuid;

use crate::capture::acquirer::StreamAcquirer;
use crate::capture::resources::CaptureResources;
use crate::encoder::adapter::EncoderAdapter;
use crate::models::config::{CaptureConfiguration, CaptureSettings, TICK_INTERVAL};
use crate::models::error::{AcquisitionError, CaptureError};
use crate::models::media_models::{PauseGlyph, RecordingDiagnostics, UserNotice};
use crate::models::state::RecordingState;
use crate::session::event::{ControlSignal, SessionEvent};
use crate::session::recording_session::RecordingSession;
use crate::surface::control_surface::ControlSurface;
use crate::surface::controller::{CancelHandle, RecordingController};
use crate::timer::service::{ElapsedObserver, TimerService};
use crate::traits::capture_delegate::{RecordingDelegate, ReviewSink};
use crate::traits::control_surface::SurfaceFactory;
use crate::traits::display_media::DisplayMediaProvider;
use crate::traits::media_encoder::MediaEncoder;

/// Forwards timer text to the host view.
struct DelegateElapsed(Arc<dyn RecordingDelegate>);

impl ElapsedObserver for DelegateElapsed {
    fn on_elapsed(&self, text: &str) {
        self.0.on_elapsed_updated(text);
    }
}

/// Orchestrates acquisition, encoding, timer and control surface for one
/// recording at a time.
///
/// ```text
/// [DisplayMediaProvider] → [CaptureResources] → [EncoderAdapter] → [ChunkBuffer]
///                                                      ↓ stop
/// [TimerService] ──→ delegate + ControlSurface    [RecordingArtifact] → [ReviewSink]
/// ```
///
/// Everything that happens outside a direct method call (encoder output,
/// device loss, timer ticks, control-surface clicks) is queued as a
/// [`SessionEvent`] and applied by [`process_events`](Self::process_events)
/// or [`run_until_idle`](Self::run_until_idle) on the owning thread.
pub struct RecordingCoordinator<P: DisplayMediaProvider, E: MediaEncoder> {
    session: RecordingSession,
    acquirer: StreamAcquirer<P>,
    encoder: EncoderAdapter<E>,
    timer: TimerService,
    surface: ControlSurface,
    resources: CaptureResources,
    delegate: Option<Arc<dyn RecordingDelegate>>,
    review: Option<Arc<dyn ReviewSink>>,
    glyph: PauseGlyph,
    stopping: bool,
    stale_events: u64,
    timer_ticks: u64,
    events_tx: Sender<SessionEvent>,
    events_rx: Receiver<SessionEvent>,
    cancel_tx: Sender<()>,
    cancel_rx: Receiver<()>,
}

impl<P: DisplayMediaProvider, E: MediaEncoder> RecordingCoordinator<P, E> {
    pub fn new(provider: P, encoder: E, surfaces: Box<dyn SurfaceFactory>) -> Self {
        Self::with_tick_interval(provider, encoder, surfaces, TICK_INTERVAL)
    }

    pub fn with_tick_interval(
        provider: P,
        encoder: E,
        surfaces: Box<dyn SurfaceFactory>,
        tick_interval: Duration,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        let (cancel_tx, cancel_rx) = unbounded();
        let surface = ControlSurface::new(surfaces);

        let mut timer = TimerService::new(tick_interval, events_tx.clone());
        timer.subscribe(Arc::new(surface.clone()));

        Self {
            session: RecordingSession::new(),
            acquirer: StreamAcquirer::new(provider),
            encoder: EncoderAdapter::new(encoder),
            timer,
            surface,
            resources: CaptureResources::new(),
            delegate: None,
            review: None,
            glyph: PauseGlyph::Pause,
            stopping: false,
            stale_events: 0,
            timer_ticks: 0,
            events_tx,
            events_rx,
            cancel_tx,
            cancel_rx,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn RecordingDelegate>) {
        self.timer.clear_observers();
        self.timer.subscribe(Arc::new(self.surface.clone()));
        self.timer.subscribe(Arc::new(DelegateElapsed(Arc::clone(&delegate))));
        self.delegate = Some(delegate);
    }

    pub fn set_review_sink(&mut self, review: Arc<dyn ReviewSink>) {
        self.review = Some(review);
    }

    pub fn state(&self) -> RecordingState {
        self.session.state()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        (!self.session.state().is_idle()).then(|| self.session.id())
    }

    /// Formatted elapsed time as last published.
    pub fn elapsed_text(&self) -> String {
        self.timer.text()
    }

    pub fn pause_glyph(&self) -> PauseGlyph {
        self.glyph
    }

    pub fn is_surface_open(&self) -> bool {
        self.surface.is_open()
    }

    /// Whether a capture stream is currently held.
    pub fn has_capture_stream(&self) -> bool {
        self.resources.has_stream()
    }

    /// Handle for primary-view controls; same protocol as the control surface.
    pub fn controller(&self) -> RecordingController {
        RecordingController::new(self.events_tx.clone())
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(self.cancel_tx.clone())
    }

    pub fn diagnostics(&self) -> RecordingDiagnostics {
        let stats = self.encoder.stats();
        RecordingDiagnostics {
            chunks_received: stats.chunks_received,
            empty_chunks_dropped: stats.empty_chunks_dropped,
            bytes_buffered: stats.bytes_buffered,
            timer_ticks: self.timer_ticks,
            stale_events_ignored: self.stale_events,
        }
    }

    /// Start a recording: acquire a stream, start encoder and timer, open the
    /// control surface.
    ///
    /// Rejected with `SessionActive` unless idle. Any other failure has
    /// already been handled when this returns: resources released, the user
    /// notified, state back to idle. The error is returned for information.
    pub fn request(&mut self, settings: &CaptureSettings) -> Result<(), CaptureError> {
        if !self.session.state().is_idle() {
            log::warn!(
                "Ignoring recording request while {}",
                self.session.state().name()
            );
            return Err(CaptureError::SessionActive);
        }

        // Pre-flight: flush leftovers from the previous session
        self.process_events();
        while self.cancel_rx.try_recv().is_ok() {}
        self.resources.release();
        self.timer.reset();
        self.stopping = false;
        self.stale_events = 0;
        self.timer_ticks = 0;

        let config = CaptureConfiguration::from_settings(settings);
        self.session.begin(config.clone())?;
        self.notify_state();
        log::info!(
            "Requesting screen capture at {}p (session {})",
            config.video_height,
            self.session.id()
        );

        if let Err(e) = self.start_session(&config) {
            self.fail_acquisition(&e);
            return Err(e);
        }
        Ok(())
    }

    fn start_session(&mut self, config: &CaptureConfiguration) -> Result<(), CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;

        let session_id = self.session.id();
        let warning = self.acquirer.acquire(
            config,
            session_id,
            &mut self.resources,
            &self.events_tx,
            &self.cancel_rx,
        )?;
        if let Some(warning) = warning {
            log::debug!("Acquired with warning: {:?}", warning);
        }

        let stream = self
            .resources
            .stream()
            .ok_or(CaptureError::Acquisition(AcquisitionError::NoVideoTrack))?;
        let stream_id = stream.id().to_string();
        self.encoder.start(
            stream,
            &config.encoder_mime_type,
            session_id,
            self.events_tx.clone(),
        )?;
        if let Some(ref d) = self.delegate {
            d.on_live_preview(Some(&stream_id));
        }

        self.timer.start()?;
        self.session
            .transition(RecordingState::Recording { elapsed_secs: 0 })?;
        self.set_glyph(PauseGlyph::Pause);
        self.notify_state();
        log::info!("Recording started (stream {})", stream_id);

        self.open_surface();
        Ok(())
    }

    fn open_surface(&mut self) {
        let controller =
            RecordingController::for_session(self.events_tx.clone(), self.session.id());
        let opened = self.surface.open(controller, &self.timer.text(), self.glyph);
        if let Some(ref d) = self.delegate {
            d.on_surface_warning(!opened);
        }
        if !opened {
            self.notify(UserNotice::SurfaceBlocked);
        }
    }

    fn fail_acquisition(&mut self, error: &CaptureError) {
        log::error!("Recording setup failed: {}", error);

        let notice = match error {
            CaptureError::Acquisition(AcquisitionError::UserCancelled)
            | CaptureError::Acquisition(AcquisitionError::NoVideoTrack)
            | CaptureError::PermissionDenied => UserNotice::AcquisitionCancelled,
            CaptureError::Acquisition(AcquisitionError::TrackEnded)
            | CaptureError::DeviceNotAvailable => UserNotice::DeviceUnavailable(error.to_string()),
            other => UserNotice::AcquisitionFailed(other.to_string()),
        };

        self.teardown();
        self.notify(notice);
    }

    /// Pause if recording; otherwise a no-op.
    pub fn pause(&mut self) {
        let RecordingState::Recording { elapsed_secs } = self.session.state() else {
            log::debug!("Pause ignored while {}", self.session.state().name());
            return;
        };

        self.encoder.pause();
        self.timer.stop();
        if let Err(e) = self
            .session
            .transition(RecordingState::Paused { elapsed_secs })
        {
            log::error!("Pause failed: {}", e);
            return;
        }
        self.set_glyph(PauseGlyph::Resume);
        self.notify_state();
        log::info!("Recording paused at {}", self.timer.text());
    }

    /// Resume if paused; otherwise a no-op.
    pub fn resume(&mut self) {
        let RecordingState::Paused { elapsed_secs } = self.session.state() else {
            log::debug!("Resume ignored while {}", self.session.state().name());
            return;
        };

        if let Err(e) = self.timer.start() {
            log::error!("Failed to restart timer, staying paused: {}", e);
            return;
        }
        self.encoder.resume();
        if let Err(e) = self
            .session
            .transition(RecordingState::Recording { elapsed_secs })
        {
            log::error!("Resume failed: {}", e);
            return;
        }
        self.set_glyph(PauseGlyph::Pause);
        self.notify_state();
        log::info!("Recording resumed at {}", self.timer.text());
    }

    pub fn toggle_pause(&mut self) {
        match self.session.state() {
            RecordingState::Recording { .. } => self.pause(),
            RecordingState::Paused { .. } => self.resume(),
            other => log::debug!("Toggle ignored while {}", other.name()),
        }
    }

    /// Ask the encoder to stop. The session finishes when the encoder reports
    /// it has stopped. No-op unless recording or paused.
    pub fn stop(&mut self) {
        if !self.session.state().is_active() {
            log::debug!("Stop ignored while {}", self.session.state().name());
            return;
        }
        if self.stopping {
            return;
        }
        self.stopping = true;
        log::info!("Stopping recording at {}", self.timer.text());

        match self.encoder.stop() {
            Ok(true) => {}
            Ok(false) => self.finish(),
            Err(e) => {
                log::error!("Encoder failed to stop, finishing with buffered data: {}", e);
                self.finish();
            }
        }
    }

    /// Abandon the current session without producing an artifact.
    pub fn cancel(&mut self) {
        if self.session.state().is_idle() {
            return;
        }
        log::info!("Cancelling recording session {}", self.session.id());
        self.teardown();
    }

    /// Apply every queued event without blocking. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while self.cancel_rx.try_recv().is_ok() {
            self.cancel();
            handled += 1;
        }
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Block applying events until the session is idle or `timeout` passes.
    ///
    /// Returns whether the session reached idle.
    pub fn run_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let events = self.events_rx.clone();
        let cancel = self.cancel_rx.clone();

        while !self.session.state().is_idle() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            select! {
                recv(events) -> event => match event {
                    Ok(event) => self.handle_event(event),
                    Err(_) => return false,
                },
                recv(cancel) -> _ => self.cancel(),
                default(remaining) => return false,
            }
        }
        self.session.state().is_idle()
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Control { session_id: Some(id), .. } if !self.is_current(id) => {
                self.ignore(&event);
            }
            SessionEvent::Control { signal, .. } => match signal {
                ControlSignal::PauseOrResume => self.toggle_pause(),
                ControlSignal::Stop => self.stop(),
                ControlSignal::ClosedByUser => {
                    if self.session.state().is_active() {
                        log::info!("Control surface closed by user");
                    }
                    self.stop();
                }
            },
            SessionEvent::TrackEnded { session_id } => {
                if self.is_current(session_id) {
                    self.handle_track_ended();
                } else {
                    self.ignore(&event);
                }
            }
            SessionEvent::EncoderStopped { session_id } => {
                if self.is_current(session_id) {
                    if !self.stopping {
                        log::warn!("Encoder stopped on its own; finishing with buffered data");
                        self.session.mark_partial();
                    }
                    self.finish();
                } else {
                    self.ignore(&event);
                }
            }
            SessionEvent::TimerTick { generation } => match self.timer.handle_tick(generation) {
                Some(secs) => {
                    self.timer_ticks += 1;
                    self.session.set_elapsed(secs);
                }
                None => self.ignore(&event),
            },
        }
    }

    fn is_current(&self, session_id: Uuid) -> bool {
        self.session.state().is_active() && session_id == self.session.id()
    }

    fn ignore(&mut self, event: &SessionEvent) {
        self.stale_events += 1;
        log::debug!("Ignoring stale event {:?}", event);
    }

    /// Device loss is an implicit stop that keeps what was already recorded.
    fn handle_track_ended(&mut self) {
        if self.stopping {
            log::debug!("Screen sharing ended while a stop was already pending");
            return;
        }
        log::warn!(
            "Screen sharing ended at {}; finishing with buffered data",
            self.timer.text()
        );
        self.session.mark_partial();
        self.stopping = true;

        match self.encoder.stop() {
            Ok(true) => {}
            Ok(false) => self.finish(),
            Err(e) => {
                log::error!("Could not recover recording after device loss: {}", e);
                self.teardown();
                self.notify(UserNotice::DeviceUnavailable(e.to_string()));
            }
        }
    }

    /// Release everything, build the artifact and hand it to review.
    fn finish(&mut self) {
        self.timer.stop();
        self.surface.close();
        self.resources.release();
        if let Some(ref d) = self.delegate {
            d.on_live_preview(None);
        }

        let session_id = self.session.id().to_string();
        let elapsed_secs = self.timer.elapsed_secs();
        let partial = self.session.is_partial();
        let artifact = self.encoder.finalize(&session_id, elapsed_secs, partial);
        if let Err(e) = self.session.finish_with(artifact) {
            log::error!("Cannot finish session {}: {}", session_id, e);
            self.teardown();
            return;
        }
        self.notify_state();

        if let Some(artifact) = self.session.take_result() {
            if artifact.is_empty() {
                log::warn!("Recording {} produced an empty artifact", session_id);
                self.notify(UserNotice::EmptyResult);
            }
            log::info!(
                "Recording finished: {} bytes, {}s{}",
                artifact.size_bytes,
                artifact.elapsed_secs,
                if artifact.partial { " (partial)" } else { "" }
            );
            match self.review {
                Some(ref review) => review.receive(artifact),
                None => log::warn!(
                    "No review sink registered; dropping recording {}",
                    session_id
                ),
            }
        }

        self.stopping = false;
        self.session.end();
        self.notify_state();
    }

    /// Common cleanup for cancel and error paths: every resource released and
    /// UI-facing state back to its initial values.
    fn teardown(&mut self) {
        self.timer.reset();
        self.encoder.discard();
        self.surface.close();
        self.resources.release();
        self.stopping = false;
        self.set_glyph(PauseGlyph::Pause);
        if let Some(ref d) = self.delegate {
            d.on_live_preview(None);
        }
        if !self.session.state().is_idle() {
            self.session.end();
            self.notify_state();
        }
    }

    fn set_glyph(&mut self, glyph: PauseGlyph) {
        self.glyph = glyph;
        self.surface.update_pause_glyph(glyph);
        if let Some(ref d) = self.delegate {
            d.on_pause_glyph_changed(glyph);
        }
    }

    fn notify_state(&self) {
        if let Some(ref d) = self.delegate {
            d.on_state_changed(&self.session.state());
        }
    }

    fn notify(&self, notice: UserNotice) {
        if notice.is_alert() {
            log::info!("Alert: {}", notice.message());
        } else {
            log::debug!("Notice: {}", notice.message());
        }
        if let Some(ref d) = self.delegate {
            d.on_notice(&notice);
        }
    }
}

impl<P: DisplayMediaProvider, E: MediaEncoder> Drop for RecordingCoordinator<P, E> {
    fn drop(&mut self) {
        self.timer.stop();
        self.encoder.discard();
        self.surface.close();
        self.resources.release();
    }
}
