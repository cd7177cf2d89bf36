//! Rendering: draw the current display state into a fresh frame.

use super::AppRuntime;
use crate::panes;
use crate::ui::{RatatuiBackend, RenderBuf};

impl AppRuntime {
    /// Redraw the whole screen from `DisplayState` and the engine snapshot.
    pub(crate) fn render(&self, backend: &mut RatatuiBackend) -> std::io::Result<()> {
        let mut frame = backend.begin_frame()?;
        let area = frame.area();
        let snapshot = self.app.snapshot();
        {
            let mut buf = RenderBuf::new(frame.buffer_mut());
            panes::render_frame(area, &mut buf, &self.app.display, &snapshot);
        }
        backend.end_frame(frame)
    }
}
