use crate::state::DisplayState;
use crate::ui::style::STAR_PALETTE;
use crate::ui::{Rect, RenderBuf, Style};

/// Glyph cycle; each star starts at a different offset so the sky twinkles.
const TWINKLE: [char; 4] = ['✦', '✧', '✦', '·'];

/// Palette index shared by every star for this frame.
fn star_color_index(display: &DisplayState) -> usize {
    match display.flash {
        f if f >= 4 => {
            if display.current_beat == 1 {
                STAR_PALETTE.len() - 1
            } else {
                STAR_PALETTE.len() - 2
            }
        }
        f if f >= 2 => STAR_PALETTE.len() - 3,
        f if f > 0 => STAR_PALETTE.len() - 4,
        _ if display.running => 2,
        _ => 0,
    }
}

fn covers(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Draw the stars over `area`, skipping cells inside `panel`.
pub fn render(area: Rect, panel: Rect, buf: &mut RenderBuf, display: &DisplayState) {
    let style = Style::new().fg(STAR_PALETTE[star_color_index(display)]);
    for (i, &(x, y)) in display.stars.iter().enumerate() {
        let (x, y) = (area.x + x, area.y + y);
        if !covers(area, x, y) || covers(panel, x, y) {
            continue;
        }
        let glyph = TWINKLE[(i + usize::from(display.frame)) % TWINKLE.len()];
        buf.set_cell(x, y, glyph, style);
    }
}
