//! Pure render functions.
//!
//! Everything here reads `DisplayState` and an `EngineSnapshot` and writes a
//! full frame into a `RenderBuf`. Nothing here handles events or mutates
//! state, so the same inputs always produce the same buffer.

mod help_pane;
mod main_pane;
mod presets_pane;
mod starfield;

use metrognome_core::EngineSnapshot;

use crate::state::{DisplayState, Overlay};
use crate::ui::{Color, Rect, RenderBuf, Style};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 24;

/// Returns true if the terminal area is large enough for normal rendering.
pub fn is_size_ok(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Render one full frame. Help replaces everything, then presets, then the
/// main view with the starfield behind it.
pub fn render_frame(area: Rect, buf: &mut RenderBuf, display: &DisplayState, engine: &EngineSnapshot) {
    if !is_size_ok(area) {
        let msg = format!(
            "{}x{} required, got {}x{}",
            MIN_WIDTH, MIN_HEIGHT, area.width, area.height
        );
        buf.draw_centered(area, area.y + area.height / 2, &msg, Style::new().fg(Color::MUTE_COLOR));
        return;
    }

    match display.overlay {
        Overlay::Help => help_pane::render(area, buf, display),
        Overlay::Presets => presets_pane::render(area, buf, display),
        Overlay::None => {
            starfield::render(area, main_pane::panel_rect(area), buf, display);
            main_pane::render(area, buf, display, engine);
        }
    }
}
