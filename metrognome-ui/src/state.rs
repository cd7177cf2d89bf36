//! Display state owned by the event loop.
//!
//! Mutated only on the loop's thread, one event at a time. The timing
//! engine is read through `EngineSnapshot` and never sees this struct.

use metrognome_core::PRESETS;

/// Animation ticks a beat flash lasts.
pub const FLASH_PEAK: u8 = 5;
/// Length of the twinkle cycle, in animation ticks.
pub const FRAME_PHASES: u8 = 4;

pub const MIN_STARS: usize = 50;
pub const MAX_STARS: usize = 300;

/// Full-view overlay replacing the main display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    Presets,
}

#[derive(Debug, Clone)]
pub struct DisplayState {
    /// Last beat delivered by the engine, 1-based.
    pub current_beat: u8,
    pub running: bool,
    pub selected_preset: usize,
    pub overlay: Overlay,
    /// Ticks left in the current beat flash; 0 when idle.
    pub flash: u8,
    /// Pendulum angle in radians.
    pub pendulum_phase: f64,
    /// Twinkle phase, 0..FRAME_PHASES.
    pub frame: u8,
    pub sound_enabled: bool,
    pub width: u16,
    pub height: u16,
    pub stars: Vec<(u16, u16)>,
    rng_state: u64,
    /// (keys, description) rows shown by the help overlay.
    pub help_rows: Vec<(String, String)>,
}

impl DisplayState {
    pub fn new(sound_enabled: bool, seed: u64) -> Self {
        Self {
            current_beat: 1,
            running: false,
            selected_preset: 0,
            overlay: Overlay::None,
            flash: 0,
            pendulum_phase: 0.0,
            frame: 0,
            sound_enabled,
            width: 0,
            height: 0,
            stars: Vec::new(),
            rng_state: seed,
            help_rows: Vec::new(),
        }
    }

    /// Record new terminal dimensions and re-scatter the stars.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.stars.clear();
        if width == 0 || height == 0 {
            return;
        }
        let count = star_count(width, height);
        for _ in 0..count {
            let x = (self.next_random() % u64::from(width)) as u16;
            let y = (self.next_random() % u64::from(height)) as u16;
            self.stars.push((x, y));
        }
    }

    /// Advance the twinkle phase and decay the beat flash.
    pub fn advance_frame(&mut self) {
        self.flash = self.flash.saturating_sub(1);
        self.frame = (self.frame + 1) % FRAME_PHASES;
    }

    /// Swing the pendulum by one tick's worth at `tempo`.
    pub fn swing(&mut self, tempo: u16) {
        let step = f64::from(tempo) / 60.0 * std::f64::consts::PI / 10.0;
        self.pendulum_phase = (self.pendulum_phase + step).rem_euclid(std::f64::consts::TAU);
    }

    /// Move the preset cursor by `delta`, clamped to the catalog.
    pub fn move_preset(&mut self, delta: isize) {
        let last = PRESETS.len() as isize - 1;
        self.selected_preset = (self.selected_preset as isize + delta).clamp(0, last) as usize;
    }

    fn next_random(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.rng_state >> 33
    }
}

/// One star per eight cells, kept within `MIN_STARS..=MAX_STARS`.
pub fn star_count(width: u16, height: u16) -> usize {
    (usize::from(width) * usize::from(height) / 8).clamp(MIN_STARS, MAX_STARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_count_is_banded() {
        assert_eq!(star_count(10, 10), MIN_STARS);
        assert_eq!(star_count(80, 24), 240);
        assert_eq!(star_count(200, 60), MAX_STARS);
    }

    #[test]
    fn resize_places_stars_in_bounds() {
        let mut state = DisplayState::new(true, 7);
        state.resize(80, 24);
        assert_eq!(state.stars.len(), 240);
        assert!(state.stars.iter().all(|&(x, y)| x < 80 && y < 24));

        state.resize(60, 24);
        assert_eq!(state.stars.len(), 180);
        assert!(state.stars.iter().all(|&(x, y)| x < 60 && y < 24));
        assert_eq!((state.width, state.height), (60, 24));
    }

    #[test]
    fn same_seed_same_sky() {
        let mut a = DisplayState::new(true, 42);
        let mut b = DisplayState::new(true, 42);
        a.resize(100, 30);
        b.resize(100, 30);
        assert_eq!(a.stars, b.stars);
    }

    #[test]
    fn zero_area_has_no_stars() {
        let mut state = DisplayState::new(true, 1);
        state.resize(0, 24);
        assert!(state.stars.is_empty());
    }

    #[test]
    fn flash_never_goes_below_zero() {
        let mut state = DisplayState::new(true, 1);
        state.flash = 1;
        state.advance_frame();
        state.advance_frame();
        assert_eq!(state.flash, 0);
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn frame_wraps_after_four_ticks() {
        let mut state = DisplayState::new(true, 1);
        for _ in 0..FRAME_PHASES {
            state.advance_frame();
        }
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn swing_scales_with_tempo() {
        let mut slow = DisplayState::new(true, 1);
        let mut fast = DisplayState::new(true, 1);
        slow.swing(60);
        fast.swing(120);
        assert!((slow.pendulum_phase - std::f64::consts::PI / 10.0).abs() < 1e-9);
        assert!((fast.pendulum_phase - 2.0 * slow.pendulum_phase).abs() < 1e-9);
    }

    #[test]
    fn preset_cursor_is_clamped() {
        let mut state = DisplayState::new(true, 1);
        state.move_preset(-1);
        assert_eq!(state.selected_preset, 0);
        for _ in 0..10 {
            state.move_preset(1);
        }
        assert_eq!(state.selected_preset, PRESETS.len() - 1);
    }
}
