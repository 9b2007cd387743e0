use std::sync::Arc;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use uuid::Uuid;

use crate::capture::resources::CaptureResources;
use crate::models::config::CaptureConfiguration;
use crate::models::error::{AcquisitionError, CaptureError, RecordingWarning};
use crate::session::event::SessionEvent;
use crate::traits::display_media::{
    DisplayMediaConstraints, DisplayMediaProvider, StreamEvent, VideoConstraints,
};

/// Requests a screen-capture stream and waits until it is usable.
pub struct StreamAcquirer<P: DisplayMediaProvider> {
    provider: P,
}

impl<P: DisplayMediaProvider> StreamAcquirer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Constraints sent to the platform picker for `config`.
    pub fn constraints(config: &CaptureConfiguration) -> DisplayMediaConstraints {
        DisplayMediaConstraints {
            video: VideoConstraints {
                height: config.video_height,
                frame_rate: config.frame_rate,
            },
            audio: config.capture_system_audio,
        }
    }

    /// Acquire a stream into `resources`.
    ///
    /// The stream is handed to `resources` as soon as the platform returns
    /// it, so the caller's cleanup covers every failure below. The
    /// track-ended observer stays registered afterwards and reports device
    /// loss to `events` tagged with `session_id`.
    ///
    /// A readiness timeout is not an error: it is returned as
    /// `Some(RecordingWarning::ReadinessTimeout)`.
    pub fn acquire(
        &mut self,
        config: &CaptureConfiguration,
        session_id: Uuid,
        resources: &mut CaptureResources,
        events: &Sender<SessionEvent>,
        cancel: &Receiver<()>,
    ) -> Result<Option<RecordingWarning>, CaptureError> {
        let constraints = Self::constraints(config);
        log::debug!("Requesting display media: {:?}", constraints);

        let stream = self
            .provider
            .get_display_media(&constraints)
            .map_err(|e| match e {
                CaptureError::PermissionDenied => AcquisitionError::UserCancelled.into(),
                other => other,
            })?;
        resources.attach(stream);

        if cancel.try_recv().is_ok() {
            log::info!("Acquisition cancelled while the picker was open");
            return Err(AcquisitionError::UserCancelled.into());
        }

        let stream = resources
            .stream_mut()
            .ok_or(CaptureError::Acquisition(AcquisitionError::NoVideoTrack))?;

        let usable = stream
            .video_tracks()
            .first()
            .map(|track| track.is_usable())
            .unwrap_or(false);
        if !usable {
            return Err(AcquisitionError::NoVideoTrack.into());
        }

        let (ready_tx, ready_rx) = bounded::<StreamEvent>(4);
        let events = events.clone();
        stream.set_event_callback(Arc::new(move |event| {
            let _ = ready_tx.try_send(event);
            if event == StreamEvent::VideoTrackEnded {
                let _ = events.send(SessionEvent::TrackEnded { session_id });
            }
        }));

        if stream.is_ready() {
            return Ok(None);
        }

        select! {
            recv(ready_rx) -> event => match event {
                Ok(StreamEvent::Ready) => Ok(None),
                Ok(StreamEvent::VideoTrackEnded) => Err(AcquisitionError::TrackEnded.into()),
                Err(_) => {
                    log::warn!("Stream dropped its readiness observer; continuing");
                    Ok(Some(RecordingWarning::ReadinessTimeout))
                }
            },
            recv(cancel) -> _ => {
                log::info!("Acquisition cancelled while waiting for video data");
                Err(AcquisitionError::UserCancelled.into())
            },
            default(config.readiness_timeout) => {
                log::warn!(
                    "Video data not signalled within {:?}; continuing",
                    config.readiness_timeout
                );
                Ok(Some(RecordingWarning::ReadinessTimeout))
            },
        }
    }
}
