use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::models::error::CaptureError;
use crate::processing::time_format::format_elapsed;
use crate::session::event::SessionEvent;
use crate::timer::repeating_task::RepeatingTask;

/// Receives the formatted elapsed time on every tick.
pub trait ElapsedObserver: Send + Sync {
    fn on_elapsed(&self, text: &str);
}

/// Elapsed-time counter driven by a single repeating ticker.
///
/// The ticker thread only enqueues `SessionEvent::TimerTick`; the counter is
/// advanced by [`TimerService::handle_tick`] on the coordinator's thread.
/// Each `start` bumps a generation number so ticks queued by a cancelled
/// ticker are ignored.
pub struct TimerService {
    elapsed_secs: u64,
    generation: u64,
    interval: Duration,
    task: Option<RepeatingTask>,
    observers: Vec<Arc<dyn ElapsedObserver>>,
    events: Sender<SessionEvent>,
}

impl TimerService {
    pub fn new(interval: Duration, events: Sender<SessionEvent>) -> Self {
        Self {
            elapsed_secs: 0,
            generation: 0,
            interval,
            task: None,
            observers: Vec::new(),
            events,
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ElapsedObserver>) {
        self.observers.push(observer);
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Start ticking. A running ticker is stopped first.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        self.stop();
        self.generation += 1;

        let generation = self.generation;
        let events = self.events.clone();
        let task = RepeatingTask::spawn("recording-timer", self.interval, move || {
            events.send(SessionEvent::TimerTick { generation }).is_ok()
        })?;
        self.task = Some(task);

        log::debug!("Timer started (generation {}, at {}s)", generation, self.elapsed_secs);
        Ok(())
    }

    /// Halt ticking without resetting the counter.
    pub fn stop(&mut self) {
        if let Some(mut task) = self.task.take() {
            task.cancel();
            log::debug!("Timer stopped at {}s", self.elapsed_secs);
        }
    }

    /// Stop and zero the counter, publishing `00:00:00`.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_secs = 0;
        self.publish();
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn text(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    /// Apply a tick from the ticker of `generation`.
    ///
    /// Returns the new elapsed seconds, or `None` for a stale tick.
    pub fn handle_tick(&mut self, generation: u64) -> Option<u64> {
        if self.task.is_none() || generation != self.generation {
            return None;
        }
        self.elapsed_secs += 1;
        self.publish();
        Some(self.elapsed_secs)
    }

    fn publish(&self) {
        let text = self.text();
        for observer in &self.observers {
            observer.on_elapsed(&text);
        }
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.stop();
    }
}
