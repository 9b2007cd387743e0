use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};

use crate::models::error::CaptureError;

/// A cancellable task that runs on a dedicated thread every `interval`.
///
/// The task keeps running while the closure returns `true`. Cancelling (or
/// dropping) the handle wakes the thread immediately and joins it.
pub struct RepeatingTask {
    cancel_tx: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RepeatingTask {
    pub fn spawn<F>(name: &str, interval: Duration, mut task: F) -> Result<Self, CaptureError>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || loop {
                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !task() {
                            break;
                        }
                    }
                    // Cancelled or handle dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| CaptureError::Unknown(format!("failed to spawn {} thread: {}", name, e)))?;

        Ok(Self {
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the task and wait for its thread to exit. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Repeating task thread panicked");
            }
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
