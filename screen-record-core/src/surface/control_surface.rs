use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::media_models::PauseGlyph;
use crate::surface::controller::RecordingController;
use crate::timer::service::ElapsedObserver;
use crate::traits::control_surface::{SurfaceFactory, SurfaceSpec, SurfaceWindow};

pub const SURFACE_NAME: &str = "RecordingControls";
pub const SURFACE_WIDTH: u32 = 250;
pub const SURFACE_HEIGHT: u32 = 150;
pub const SURFACE_TOP: u32 = 50;
pub const SURFACE_CAPTION: &str = "● LIVE REC";

struct SurfaceSlot {
    factory: Box<dyn SurfaceFactory>,
    window: Option<Box<dyn SurfaceWindow>>,
}

impl SurfaceSlot {
    /// The window, if it exists and the user has not closed it.
    fn live_window(&mut self) -> Option<&mut Box<dyn SurfaceWindow>> {
        self.window.as_mut().filter(|w| !w.is_closed())
    }
}

/// Floating pause/resume/stop controls.
///
/// Cheap to clone; clones share the same surface so the timer service can
/// publish to it as an [`ElapsedObserver`].
#[derive(Clone)]
pub struct ControlSurface {
    slot: Arc<Mutex<SurfaceSlot>>,
}

impl ControlSurface {
    pub fn new(factory: Box<dyn SurfaceFactory>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(SurfaceSlot {
                factory,
                window: None,
            })),
        }
    }

    /// Fixed-size surface centred horizontally near the top of the screen.
    pub fn spec(screen_width: u32, timer_text: &str, glyph: PauseGlyph) -> SurfaceSpec {
        SurfaceSpec {
            name: SURFACE_NAME.to_string(),
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            left: screen_width.saturating_sub(SURFACE_WIDTH) / 2,
            top: SURFACE_TOP,
            resizable: false,
            caption: SURFACE_CAPTION.to_string(),
            timer_text: timer_text.to_string(),
            pause_glyph: glyph.as_str().to_string(),
        }
    }

    /// Open the surface, or focus it if one is already live.
    ///
    /// Returns `false` if the host blocked creation.
    pub fn open(
        &self,
        controller: RecordingController,
        timer_text: &str,
        glyph: PauseGlyph,
    ) -> bool {
        let mut slot = self.slot.lock();

        if let Some(window) = slot.live_window() {
            window.focus();
            return true;
        }

        let spec = Self::spec(slot.factory.screen_width(), timer_text, glyph);
        match slot.factory.open(&spec, controller) {
            Some(mut window) => {
                window.focus();
                slot.window = Some(window);
                log::debug!("Control surface opened at ({}, {})", spec.left, spec.top);
                true
            }
            None => {
                slot.window = None;
                log::warn!("Control surface blocked by host");
                false
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().live_window().is_some()
    }

    /// No-op if the surface is closed.
    pub fn update_timer(&self, text: &str) {
        if let Some(window) = self.slot.lock().live_window() {
            window.set_timer_text(text);
        }
    }

    /// No-op if the surface is closed.
    pub fn update_pause_glyph(&self, glyph: PauseGlyph) {
        if let Some(window) = self.slot.lock().live_window() {
            window.set_pause_glyph(glyph.as_str());
        }
    }

    /// Close the surface. Safe on closed or never-opened surfaces.
    pub fn close(&self) {
        let window = self.slot.lock().window.take();
        if let Some(mut window) = window {
            if !window.is_closed() {
                window.close();
            }
        }
    }
}

impl ElapsedObserver for ControlSurface {
    fn on_elapsed(&self, text: &str) {
        self.update_timer(text);
    }
}
