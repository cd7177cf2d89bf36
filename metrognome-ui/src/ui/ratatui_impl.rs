use std::io::{self, Stdout};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use crossterm::{
    event::{self, Event, KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect as RatatuiRect,
    style::{Color as RatatuiColor, Style as RatatuiStyle},
    widgets::Widget,
    Terminal,
};

use super::{AppEvent, InputEvent, KeyCode, Modifiers};

/// Run `setup`; if it fails, run `undo` before passing the error on.
fn undo_on_error(setup: impl FnOnce() -> io::Result<()>, undo: impl FnOnce()) -> io::Result<()> {
    let result = setup();
    if result.is_err() {
        undo();
    }
    result
}

/// Ratatui-based terminal backend
pub struct RatatuiBackend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl RatatuiBackend {
    /// Create a new ratatui backend (does not start terminal mode)
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Enter raw mode and alternate screen
    ///
    /// On failure after raw mode is enabled, raw mode and the alternate
    /// screen are left again before the error is returned.
    pub fn start(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        undo_on_error(
            || {
                execute!(io::stdout(), EnterAlternateScreen)?;
                self.terminal.hide_cursor()?;
                self.terminal.clear()
            },
            || {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
            },
        )
    }

    /// Leave raw mode and alternate screen
    pub fn stop(&mut self) -> io::Result<()> {
        let _ = self.terminal.show_cursor();
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Current terminal size as (width, height)
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    /// Begin a new frame for drawing (black background)
    pub fn begin_frame(&self) -> io::Result<RatatuiFrame> {
        let (width, height) = self.size()?;
        Ok(RatatuiFrame::blank(width, height))
    }

    /// End the current frame and render to screen
    pub fn end_frame(&mut self, frame: RatatuiFrame) -> io::Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(BufferWidget(frame.buffer), area);
        })?;
        Ok(())
    }
}

/// A frame for drawing operations
pub struct RatatuiFrame {
    buffer: Buffer,
}

impl RatatuiFrame {
    /// A `width x height` buffer filled with the black background.
    pub fn blank(width: u16, height: u16) -> Self {
        let area = RatatuiRect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, RatatuiStyle::default().bg(RatatuiColor::Rgb(0, 0, 0)));
        Self { buffer }
    }

    /// Get mutable access to the underlying buffer
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Get the full terminal area as a ratatui Rect
    pub fn area(&self) -> RatatuiRect {
        self.buffer.area
    }
}

/// Spawn the `input-reader` thread: blocks on crossterm events and forwards
/// key presses and resizes. Exits once the receiving side is gone or the
/// terminal stops producing events.
pub fn spawn_input_reader(tx: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input-reader".into())
        .spawn(move || loop {
            let app_event = match event::read() {
                Ok(Event::Key(key_event)) => {
                    // Release events only arrive with keyboard enhancement; skip them
                    if key_event.kind == KeyEventKind::Release {
                        continue;
                    }
                    AppEvent::Key(convert_key_event(key_event))
                }
                Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    log::error!(target: "runtime", "terminal input failed: {}", e);
                    break;
                }
            };
            if tx.send(app_event).is_err() {
                break;
            }
        })
}

fn convert_key_event(event: KeyEvent) -> InputEvent {
    let mut modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    };

    let key = match event.code {
        CrosstermKeyCode::Char(c) => KeyCode::Char(c),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Esc => KeyCode::Escape,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => {
            modifiers.shift = true;
            KeyCode::Tab
        }
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::PageUp => KeyCode::PageUp,
        CrosstermKeyCode::PageDown => KeyCode::PageDown,
        CrosstermKeyCode::Insert => KeyCode::Insert,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::F(n) => KeyCode::F(n),
        _ => KeyCode::Char('\0'),
    };

    InputEvent { key, modifiers }
}

/// Widget that renders a pre-built buffer
struct BufferWidget(Buffer);

impl Widget for BufferWidget {
    fn render(self, area: RatatuiRect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if x < self.0.area.width && y < self.0.area.height {
                    if let (Some(src), Some(dst)) = (self.0.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        }
    }
}
