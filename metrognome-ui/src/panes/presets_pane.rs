use metrognome_core::PRESETS;

use crate::state::DisplayState;
use crate::ui::layout_helpers::render_panel;
use crate::ui::style::selected_style_bold;
use crate::ui::{Color, Rect, RenderBuf, Style};

pub fn render(area: Rect, buf: &mut RenderBuf, display: &DisplayState) {
    let inner = render_panel(area, buf, " Choose Your Garden Rhythm ", 56, 22, Color::TEAL);

    for (i, preset) in PRESETS.iter().enumerate() {
        let y = inner.y + 1 + i as u16 * 3;
        if y + 1 >= inner.y + inner.height {
            break;
        }
        let selected = i == display.selected_preset;
        let line = format!(
            "{} - {} BPM ({})",
            preset.name,
            preset.tempo,
            preset.signature.name()
        );
        let style = selected_style_bold(selected, if selected { Color::PINK } else { Color::WHITE });
        let line_area = Rect::new(inner.x, y, inner.width, 1);
        buf.fill(line_area, if selected { Style::new().bg(Color::SELECTION_BG) } else { Style::new() });
        buf.draw_str(inner.x + 1, y, &line, style);
        buf.draw_str(
            inner.x + 3,
            y + 1,
            preset.description,
            Style::new().fg(Color::GRAY),
        );
    }

    buf.draw_centered(
        inner,
        inner.y + inner.height - 1,
        "←/→ select   Enter confirm   p back",
        Style::new().fg(Color::HINT),
    );
}
