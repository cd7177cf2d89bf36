use metrognome_core::preset::tempo_description;
use metrognome_core::EngineSnapshot;

use crate::state::DisplayState;
use crate::ui::layout_helpers::{center_rect, render_panel};
use crate::ui::{Color, Rect, RenderBuf, Style};

const PANEL_WIDTH: u16 = 56;
const PANEL_HEIGHT: u16 = 22;

const BOX_WIDTH: u16 = 5;
const BOX_GAP: u16 = 1;

const ARM_LENGTH: i32 = 15;

const GNOME_WIDTH: u16 = 5;
const GNOME_GAP: u16 = 2;
const GNOME_ARMS_DOWN: [&str; 4] = ["  △  ", " o_o ", " /|\\ ", " / \\ "];
const GNOME_ARMS_UP: [&str; 4] = ["  △  ", " o_o ", " \\|/ ", " / \\ "];

/// Where the main panel sits; the starfield leaves this area alone.
pub fn panel_rect(area: Rect) -> Rect {
    center_rect(area, PANEL_WIDTH, PANEL_HEIGHT)
}

pub fn render(area: Rect, buf: &mut RenderBuf, display: &DisplayState, engine: &EngineSnapshot) {
    let inner = render_panel(area, buf, " Metrognome ", PANEL_WIDTH, PANEL_HEIGHT, Color::YELLOW);
    let top = inner.y;

    buf.draw_centered(
        inner,
        top,
        &format!("{} BPM", engine.tempo),
        Style::new().fg(Color::PINK).bold(),
    );
    buf.draw_centered(inner, top + 1, tempo_description(engine.tempo), Style::new().fg(Color::GRAY));

    buf.draw_centered(inner, top + 3, &engine.signature.name(), Style::new().fg(Color::TEAL).bold());
    buf.draw_centered(
        inner,
        top + 4,
        engine.signature.saying(),
        Style::new().fg(Color::GRAY).italic(),
    );

    render_beat_boxes(inner, top + 6, buf, display, engine);
    render_pendulum(inner, top + 10, buf, display.pendulum_phase);
    render_gnomes(inner, top + 12, buf, display, engine);

    let (status, status_color) = if engine.running {
        ("Playing... press Space to stop", Color::TEAL)
    } else {
        ("Press Space to start", Color::GRAY)
    };
    buf.draw_centered(inner, top + 17, status, Style::new().fg(status_color));
    let sound = if display.sound_enabled { "Sound: ON" } else { "Sound: OFF" };
    buf.draw_centered(inner, top + 18, sound, Style::new().fg(Color::GRAY));
    buf.draw_centered(
        inner,
        top + 19,
        "?: help  p: presets  Tab: signature  q: quit",
        Style::new().fg(Color::HINT),
    );
}

/// Gap and figure count for a row of `count` figures of `width` cells inside
/// `avail` cells. The gap shrinks toward zero before figures are dropped.
fn fit_row(count: u16, width: u16, gap: u16, avail: u16) -> (u16, u16) {
    let gap = (0..=gap)
        .rev()
        .find(|g| count * (width + g) - g <= avail)
        .unwrap_or(0);
    let shown = count.min((avail + gap) / (width + gap));
    (gap, shown)
}

/// Whether beat `n` is the one currently flashing.
fn is_lit(n: u8, display: &DisplayState, engine: &EngineSnapshot) -> bool {
    engine.running && display.current_beat == n && display.flash > 0
}

fn render_beat_boxes(inner: Rect, y: u16, buf: &mut RenderBuf, display: &DisplayState, engine: &EngineSnapshot) {
    let (gap, shown) = fit_row(u16::from(engine.signature.beats), BOX_WIDTH, BOX_GAP, inner.width);
    let total = (shown * (BOX_WIDTH + gap)).saturating_sub(gap);
    let x0 = inner.x + inner.width.saturating_sub(total) / 2;

    for n in 1..=shown as u8 {
        let style = if is_lit(n, display, engine) {
            let bg = if n == 1 { Color::BRIGHT_TEAL } else { Color::PINK };
            Style::new().fg(Color::BLACK).bg(bg).bold()
        } else if engine.running && display.current_beat == n {
            Style::new().fg(Color::WHITE).bg(Color::DARK_GRAY)
        } else {
            Style::new().fg(Color::GRAY).bg(Color::CHARCOAL)
        };
        let x = x0 + u16::from(n - 1) * (BOX_WIDTH + gap);
        for row in 0..3 {
            buf.draw_str(x, y + row, &" ".repeat(usize::from(BOX_WIDTH)), style);
        }
        buf.draw_str(x + BOX_WIDTH / 2, y + 1, &n.to_string(), style);
    }
}

/// Bob offset from the pivot, in cells.
fn bob_offset(phase: f64) -> i32 {
    (phase.sin() * f64::from(ARM_LENGTH)) as i32
}

fn render_pendulum(inner: Rect, y: u16, buf: &mut RenderBuf, phase: f64) {
    let width = (ARM_LENGTH * 2 + 1) as u16;
    let x0 = inner.x + inner.width.saturating_sub(width) / 2;
    let bob = ARM_LENGTH + bob_offset(phase);

    let mut line: Vec<char> = vec![' '; usize::from(width)];
    let (lo, hi) = (ARM_LENGTH.min(bob), ARM_LENGTH.max(bob));
    for i in (lo + 1)..hi {
        line[i as usize] = '─';
    }
    line[ARM_LENGTH as usize] = '┬';
    line[bob as usize] = '●';

    let text: String = line.into_iter().collect();
    buf.draw_str(x0, y, &text, Style::new().fg(Color::GRAY));
}

fn render_gnomes(inner: Rect, y: u16, buf: &mut RenderBuf, display: &DisplayState, engine: &EngineSnapshot) {
    let (gap, shown) = fit_row(u16::from(engine.signature.beats), GNOME_WIDTH, GNOME_GAP, inner.width);
    let total = (shown * (GNOME_WIDTH + gap)).saturating_sub(gap);
    let x0 = inner.x + inner.width.saturating_sub(total) / 2;

    for n in 1..=shown as u8 {
        let pose = if n % 2 == 1 { &GNOME_ARMS_DOWN } else { &GNOME_ARMS_UP };
        let color = match (is_lit(n, display, engine), n == 1) {
            (true, true) => Color::BRIGHT_TEAL,
            (true, false) => Color::YELLOW,
            (false, _) => Color::DARK_GRAY,
        };
        let x = x0 + u16::from(n - 1) * (GNOME_WIDTH + gap);
        for (row, part) in pose.iter().enumerate() {
            buf.draw_str(x, y + row as u16, part, Style::new().fg(color));
        }
    }
}
