use crate::traits::display_media::MediaStream;

/// Platform capture resources owned by the coordinator.
///
/// Every exit path (finish, cancel, acquisition failure, device loss) goes
/// through [`CaptureResources::release`], which stops every track.
#[derive(Default)]
pub struct CaptureResources {
    stream: Option<Box<dyn MediaStream>>,
}

impl CaptureResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a freshly acquired stream, releasing any previous one.
    pub fn attach(&mut self, stream: Box<dyn MediaStream>) {
        self.release();
        log::debug!("Attached capture stream {}", stream.id());
        self.stream = Some(stream);
    }

    pub fn stream(&self) -> Option<&dyn MediaStream> {
        self.stream.as_deref()
    }

    pub fn stream_mut(&mut self) -> Option<&mut (dyn MediaStream + 'static)> {
        self.stream.as_deref_mut()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Stop every track and drop the stream. Idempotent.
    ///
    /// Returns `true` if a stream was released.
    pub fn release(&mut self) -> bool {
        let Some(mut stream) = self.stream.take() else {
            return false;
        };
        stream.stop_all_tracks();
        log::info!("Released capture stream {}", stream.id());
        true
    }
}

impl Drop for CaptureResources {
    fn drop(&mut self) {
        self.release();
    }
}
