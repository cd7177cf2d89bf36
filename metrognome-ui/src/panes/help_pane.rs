use crate::state::DisplayState;
use crate::ui::layout_helpers::render_panel;
use crate::ui::{Color, Rect, RenderBuf, Style};

const KEY_COLUMN: usize = 14;

pub fn render(area: Rect, buf: &mut RenderBuf, display: &DisplayState) {
    let inner = render_panel(area, buf, " Garden Gnome's Command Guide ", 56, 22, Color::TEAL);

    let key_style = Style::new().fg(Color::TEAL).bold();
    let desc_style = Style::new().fg(Color::WHITE);
    let visible = usize::from(inner.height.saturating_sub(5));

    for (i, (keys, desc)) in display.help_rows.iter().take(visible).enumerate() {
        let y = inner.y + 1 + i as u16;
        let max_desc_len = usize::from(inner.width).saturating_sub(KEY_COLUMN + 2);
        let desc_truncated: String = desc.chars().take(max_desc_len).collect();
        let key_formatted = format!("{:<width$}", keys, width = KEY_COLUMN);
        buf.draw_line(
            Rect::new(inner.x + 1, y, inner.width.saturating_sub(1), 1),
            &[(&key_formatted, key_style), (&desc_truncated, desc_style)],
        );
    }

    let bottom = inner.y + inner.height;
    buf.draw_centered(
        inner,
        bottom - 3,
        "\"A gnome without rhythm is a garden without flowers!\"",
        Style::new().fg(Color::GRAY).italic(),
    );
    buf.draw_centered(
        inner,
        bottom - 1,
        "Press ? or Esc to return to the garden",
        Style::new().fg(Color::HINT),
    );
}
