//! Click playback contract.
//!
//! The render loop calls `play_click` once per delivered beat while sound is
//! enabled. Implementations must return without waiting for playback and
//! must swallow their own failures.

pub trait ClickPlayer: Send + Sync {
    /// Play one click; `accent` is set on the downbeat.
    fn play_click(&self, accent: bool);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentClick;

impl ClickPlayer for SilentClick {
    fn play_click(&self, _accent: bool) {}
}
