use ratatui::buffer::Buffer;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

pub use ratatui::layout::Rect;

use super::style::Style;

/// Rendering abstraction layer.
///
/// Wraps a ratatui `Buffer` and accepts our `Style`/`Color` types natively.
/// Every method clips to the buffer, so panes can draw without bounds checks.
pub struct RenderBuf<'a> {
    buf: &'a mut Buffer,
}

impl<'a> RenderBuf<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf }
    }

    /// Set a single character at (x, y) with the given style.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(ch)
                .set_style(ratatui::style::Style::from(style));
        }
    }

    /// Draw a string at (x, y) without wrapping. Characters beyond the buffer
    /// boundary are silently clipped.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let rat_style = ratatui::style::Style::from(style);
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.buf.cell_mut((x.saturating_add(i as u16), y)) {
                cell.set_char(ch).set_style(rat_style);
            }
        }
    }

    /// Draw `text` horizontally centered within `area` on row `y`.
    pub fn draw_centered(&mut self, area: Rect, y: u16, text: &str, style: Style) {
        let len = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        self.draw_str(x, y, text, style);
    }

    /// Fill every cell of `area` with a blank of the given style.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let area = area.intersection(self.buf.area);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                self.set_cell(x, y, ' ', style);
            }
        }
    }

    /// Draw a rounded bordered block with a title. Returns the inner `Rect`.
    pub fn draw_block(
        &mut self,
        area: Rect,
        title: &str,
        border_style: Style,
        title_style: Style,
    ) -> Rect {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(ratatui::style::Style::from(border_style))
            .title_style(ratatui::style::Style::from(title_style));
        let inner = block.inner(area);
        block.render(area, self.buf);
        inner
    }

    /// Draw styled spans on a single line within the given area.
    pub fn draw_line(&mut self, area: Rect, spans: &[(&str, Style)]) {
        let rat_spans: Vec<Span> = spans
            .iter()
            .map(|(text, style)| Span::styled(*text, ratatui::style::Style::from(*style)))
            .collect();
        Paragraph::new(Line::from(rat_spans)).render(area, self.buf);
    }
}
