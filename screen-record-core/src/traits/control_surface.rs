use crate::surface::controller::RecordingController;

/// Placement and initial contents of the floating control surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub left: u32,
    pub top: u32,
    pub resizable: bool,
    pub caption: String,
    pub timer_text: String,
    pub pause_glyph: String,
}

/// A secondary UI surface (popup window, overlay, OS widget).
///
/// The surface may be closed by the user at any time; `is_closed` reflects that.
pub trait SurfaceWindow: Send {
    fn is_closed(&self) -> bool;

    fn focus(&mut self);

    fn set_timer_text(&mut self, text: &str);

    fn set_pause_glyph(&mut self, glyph: &str);

    fn close(&mut self);
}

/// Platform hook that creates control surfaces.
pub trait SurfaceFactory: Send {
    /// Width of the screen the surface is centred on.
    fn screen_width(&self) -> u32;

    /// Create a surface wired to `controller`.
    ///
    /// Returns `None` when the host blocks creation (e.g. a popup blocker).
    /// The surface must send `ControlSignal::ClosedByUser` through the
    /// controller when the user closes it.
    fn open(
        &mut self,
        spec: &SurfaceSpec,
        controller: RecordingController,
    ) -> Option<Box<dyn SurfaceWindow>>;
}
