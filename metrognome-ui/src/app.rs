//! Event handlers for the render loop.
//!
//! `App` owns the timing engine, the click player, the input layers and the
//! display state. Every handler runs to completion on the loop thread and
//! tells the loop what to do next through a `Followup`.

use metrognome_core::signature::{next_in_catalog, prev_in_catalog};
use metrognome_core::{ClickPlayer, EngineSnapshot, TimingEngine, PRESETS};

use crate::state::{DisplayState, Overlay, FLASH_PEAK};
use crate::ui::action_id::{ActionId, GlobalActionId, PresetsActionId};
use crate::ui::{InputEvent, LayerResult, LayerStack};

const TEMPO_STEP: u16 = 5;

/// What the loop must do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    None,
    /// Issue a fresh receive on the beat slot. Beats are one-shot: without
    /// this the loop stops observing them.
    ListenForBeat,
    Quit,
}

pub struct App {
    engine: TimingEngine,
    clicker: Box<dyn ClickPlayer>,
    layers: LayerStack,
    pub display: DisplayState,
}

impl App {
    pub fn new(
        engine: TimingEngine,
        clicker: Box<dyn ClickPlayer>,
        mut layers: LayerStack,
        mut display: DisplayState,
    ) -> Self {
        layers.push("global");
        display.help_rows = layers.help_rows();
        display.running = engine.is_running();
        display.current_beat = engine.current_beat();
        Self {
            engine,
            clicker,
            layers,
            display,
        }
    }

    pub fn engine(&self) -> &TimingEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.engine.snapshot()
    }

    /// A beat was delivered by the engine.
    pub fn on_beat(&mut self, beat: u8) -> Followup {
        self.display.current_beat = beat;
        self.display.flash = FLASH_PEAK;
        if self.display.sound_enabled {
            self.clicker.play_click(beat == 1);
        }
        if self.engine.is_running() {
            Followup::ListenForBeat
        } else {
            Followup::None
        }
    }

    /// The 100ms animation tick. Runs whether or not the engine is playing.
    pub fn on_tick(&mut self) {
        self.display.advance_frame();
        if self.engine.is_running() {
            self.display.swing(self.engine.tempo());
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.display.resize(width, height);
    }

    /// Resolve a key through the active layers and dispatch the command.
    pub fn on_key(&mut self, event: &InputEvent) -> Followup {
        let followup = match self.layers.resolve(event) {
            LayerResult::Action(action) => self.on_action(action),
            LayerResult::Blocked | LayerResult::Unresolved => Followup::None,
        };
        self.layers
            .set_layer("presets", self.display.overlay == Overlay::Presets);
        followup
    }

    pub fn on_action(&mut self, action: ActionId) -> Followup {
        log::debug!(target: "runtime", "action {}", action.as_str());
        match action {
            ActionId::Global(GlobalActionId::Quit) => {
                self.engine.stop();
                self.display.running = false;
                Followup::Quit
            }
            ActionId::Global(GlobalActionId::PlayStop) => {
                if self.engine.is_running() {
                    self.engine.stop();
                    self.display.running = false;
                    self.display.current_beat = 1;
                    self.display.flash = 0;
                    Followup::None
                } else {
                    self.engine.start();
                    self.resync()
                }
            }
            ActionId::Global(GlobalActionId::TempoUp) => {
                let tempo = self.engine.tempo().saturating_add(TEMPO_STEP);
                self.engine.set_tempo(tempo);
                self.resync()
            }
            ActionId::Global(GlobalActionId::TempoDown) => {
                let tempo = self.engine.tempo().saturating_sub(TEMPO_STEP);
                self.engine.set_tempo(tempo);
                self.resync()
            }
            ActionId::Global(GlobalActionId::NextSignature) => {
                let next = next_in_catalog(self.engine.signature());
                self.engine.set_time_signature(next);
                self.resync()
            }
            ActionId::Global(GlobalActionId::PrevSignature) => {
                let prev = prev_in_catalog(self.engine.signature());
                self.engine.set_time_signature(prev);
                self.resync()
            }
            ActionId::Global(GlobalActionId::TogglePresets) => {
                self.display.overlay = match self.display.overlay {
                    Overlay::Presets => Overlay::None,
                    _ => Overlay::Presets,
                };
                Followup::None
            }
            ActionId::Global(GlobalActionId::ToggleHelp) => {
                self.display.overlay = match self.display.overlay {
                    Overlay::Help => Overlay::None,
                    _ => Overlay::Help,
                };
                Followup::None
            }
            ActionId::Global(GlobalActionId::ToggleSound) => {
                self.display.sound_enabled = !self.display.sound_enabled;
                Followup::None
            }
            ActionId::Global(GlobalActionId::CloseOverlay) => {
                self.display.overlay = Overlay::None;
                Followup::None
            }
            ActionId::Presets(preset_action) => self.on_preset_action(preset_action),
        }
    }

    fn on_preset_action(&mut self, action: PresetsActionId) -> Followup {
        if self.display.overlay != Overlay::Presets {
            return Followup::None;
        }
        match action {
            PresetsActionId::Prev => {
                self.display.move_preset(-1);
                Followup::None
            }
            PresetsActionId::Next => {
                self.display.move_preset(1);
                Followup::None
            }
            PresetsActionId::Confirm => {
                let preset = PRESETS[self.display.selected_preset];
                self.engine.apply_preset(preset.tempo, preset.signature);
                self.display.overlay = Overlay::None;
                log::debug!(target: "runtime", "applied preset {}", preset.name);
                self.resync()
            }
        }
    }

    /// The engine may have restarted: clear the stale flash, show the
    /// downbeat, and re-arm beat listening if it is playing.
    fn resync(&mut self) -> Followup {
        self.display.flash = 0;
        self.display.current_beat = 1;
        self.display.running = self.engine.is_running();
        if self.display.running {
            Followup::ListenForBeat
        } else {
            Followup::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::keymap::Keymap;
    use crate::ui::layer::Layer;
    use crate::ui::{KeyCode, Modifiers};
    use metrognome_core::{TimeSignature, SIGNATURES};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingClick(Arc<Mutex<Vec<bool>>>);

    impl ClickPlayer for RecordingClick {
        fn play_click(&self, accent: bool) {
            self.0.lock().unwrap().push(accent);
        }
    }

    const fn global(a: GlobalActionId) -> ActionId {
        ActionId::Global(a)
    }

    const fn presets(a: PresetsActionId) -> ActionId {
        ActionId::Presets(a)
    }

    fn test_layers() -> LayerStack {
        LayerStack::new(vec![
            Layer {
                name: "global",
                keymap: Keymap::new()
                    .bind('q', global(GlobalActionId::Quit), "Quit")
                    .bind('p', global(GlobalActionId::TogglePresets), "Presets"),
                transparent: true,
            },
            Layer {
                name: "presets",
                keymap: Keymap::new()
                    .bind_key(KeyCode::Right, presets(PresetsActionId::Next), "Next")
                    .bind_key(KeyCode::Enter, presets(PresetsActionId::Confirm), "Apply"),
                transparent: true,
            },
        ])
    }

    fn app_with(tempo: u16, clicks: &RecordingClick) -> App {
        let engine = TimingEngine::new(tempo, TimeSignature::new(4, 4)).unwrap();
        App::new(
            engine,
            Box::new(clicks.clone()),
            test_layers(),
            DisplayState::new(true, 1),
        )
    }

    fn app() -> App {
        app_with(120, &RecordingClick::default())
    }

    #[test]
    fn beat_sets_flash_and_clicks() {
        let clicks = RecordingClick::default();
        let mut app = app_with(120, &clicks);
        app.on_beat(1);
        assert_eq!(app.display.current_beat, 1);
        assert_eq!(app.display.flash, FLASH_PEAK);
        app.on_beat(2);
        assert_eq!(*clicks.0.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn muted_beat_does_not_click() {
        let clicks = RecordingClick::default();
        let mut app = app_with(120, &clicks);
        app.on_action(global(GlobalActionId::ToggleSound));
        app.on_beat(1);
        assert!(clicks.0.lock().unwrap().is_empty());
        assert_eq!(app.display.flash, FLASH_PEAK);
    }

    #[test]
    fn beat_rearms_only_while_running() {
        let mut app = app();
        assert_eq!(app.on_beat(1), Followup::None);
        assert_eq!(
            app.on_action(global(GlobalActionId::PlayStop)),
            Followup::ListenForBeat
        );
        assert_eq!(app.on_beat(2), Followup::ListenForBeat);
        assert_eq!(app.on_action(global(GlobalActionId::PlayStop)), Followup::None);
        assert!(!app.display.running);
        assert_eq!(app.display.current_beat, 1);
    }

    #[test]
    fn tick_swings_pendulum_only_while_running() {
        let mut app = app();
        app.on_tick();
        assert_eq!(app.display.pendulum_phase, 0.0);
        assert_eq!(app.display.frame, 1);

        app.on_action(global(GlobalActionId::PlayStop));
        app.on_tick();
        assert!(app.display.pendulum_phase > 0.0);
        app.on_action(global(GlobalActionId::Quit));
    }

    #[test]
    fn tempo_change_resets_flash_and_beat() {
        let mut app = app();
        app.display.flash = 3;
        app.display.current_beat = 3;
        assert_eq!(app.on_action(global(GlobalActionId::TempoUp)), Followup::None);
        assert_eq!(app.engine().tempo(), 125);
        assert_eq!(app.display.flash, 0);
        assert_eq!(app.display.current_beat, 1);

        app.on_action(global(GlobalActionId::TempoDown));
        app.on_action(global(GlobalActionId::TempoDown));
        assert_eq!(app.engine().tempo(), 115);
    }

    #[test]
    fn tempo_change_while_running_rearms() {
        let mut app = app();
        app.on_action(global(GlobalActionId::PlayStop));
        assert_eq!(
            app.on_action(global(GlobalActionId::TempoUp)),
            Followup::ListenForBeat
        );
        assert!(app.engine().is_running());
        app.on_action(global(GlobalActionId::Quit));
    }

    #[test]
    fn tempo_stops_at_bounds() {
        let mut app = app_with(300, &RecordingClick::default());
        app.on_action(global(GlobalActionId::TempoUp));
        assert_eq!(app.engine().tempo(), 300);

        let mut app = app_with(20, &RecordingClick::default());
        app.on_action(global(GlobalActionId::TempoDown));
        assert_eq!(app.engine().tempo(), 20);
    }

    #[test]
    fn signature_cycle_returns_to_start() {
        let mut app = app();
        let start = app.engine().signature();
        app.on_action(global(GlobalActionId::NextSignature));
        assert_eq!(app.engine().signature(), SIGNATURES[1].signature);
        for _ in 1..SIGNATURES.len() {
            app.on_action(global(GlobalActionId::NextSignature));
        }
        assert_eq!(app.engine().signature(), start);

        app.on_action(global(GlobalActionId::PrevSignature));
        assert_eq!(app.engine().signature(), SIGNATURES[SIGNATURES.len() - 1].signature);
    }

    #[test]
    fn overlays_are_exclusive() {
        let mut app = app();
        app.on_action(global(GlobalActionId::TogglePresets));
        assert_eq!(app.display.overlay, Overlay::Presets);
        app.on_action(global(GlobalActionId::ToggleHelp));
        assert_eq!(app.display.overlay, Overlay::Help);
        app.on_action(global(GlobalActionId::TogglePresets));
        assert_eq!(app.display.overlay, Overlay::Presets);
        app.on_action(global(GlobalActionId::TogglePresets));
        assert_eq!(app.display.overlay, Overlay::None);

        app.on_action(global(GlobalActionId::ToggleHelp));
        app.on_action(global(GlobalActionId::CloseOverlay));
        assert_eq!(app.display.overlay, Overlay::None);
    }

    #[test]
    fn five_rights_one_left_selects_index_four() {
        let mut app = app();
        app.on_action(global(GlobalActionId::TogglePresets));
        for _ in 0..5 {
            app.on_action(presets(PresetsActionId::Next));
        }
        app.on_action(presets(PresetsActionId::Prev));
        assert_eq!(app.display.selected_preset, 4);
    }

    #[test]
    fn preset_keys_ignored_without_overlay() {
        let mut app = app();
        app.on_action(presets(PresetsActionId::Next));
        assert_eq!(app.display.selected_preset, 0);
        app.on_action(presets(PresetsActionId::Confirm));
        assert_eq!(app.engine().tempo(), 120);
    }

    #[test]
    fn confirm_applies_preset_and_closes_overlay() {
        let mut app = app();
        app.on_action(global(GlobalActionId::TogglePresets));
        app.on_action(presets(PresetsActionId::Next));
        app.on_action(presets(PresetsActionId::Next));
        assert_eq!(app.on_action(presets(PresetsActionId::Confirm)), Followup::None);
        assert_eq!(app.engine().tempo(), PRESETS[2].tempo);
        assert_eq!(app.engine().signature(), PRESETS[2].signature);
        assert_eq!(app.display.overlay, Overlay::None);
    }

    #[test]
    fn quit_stops_engine() {
        let mut app = app();
        app.on_action(global(GlobalActionId::PlayStop));
        assert_eq!(app.on_action(global(GlobalActionId::Quit)), Followup::Quit);
        assert!(!app.engine().is_running());
    }

    #[test]
    fn presets_layer_follows_overlay() {
        let mut app = app();
        let right = InputEvent::key(KeyCode::Right);
        app.on_key(&right);
        assert_eq!(app.display.selected_preset, 0);

        app.on_key(&InputEvent::key(KeyCode::Char('p')));
        app.on_key(&right);
        assert_eq!(app.display.selected_preset, 1);

        app.on_key(&InputEvent::key(KeyCode::Enter));
        assert_eq!(app.engine().tempo(), PRESETS[1].tempo);
        assert_eq!(app.display.overlay, Overlay::None);
        app.on_key(&right);
        assert_eq!(app.display.selected_preset, 1);
    }

    #[test]
    fn unbound_key_does_nothing() {
        let mut app = app();
        let ev = InputEvent::new(KeyCode::Char('z'), Modifiers::none());
        assert_eq!(app.on_key(&ev), Followup::None);
    }

    #[test]
    fn help_rows_loaded_from_layers() {
        let app = app();
        assert_eq!(app.display.help_rows.len(), 4);
        assert_eq!(app.display.help_rows[0], ("q".to_string(), "Quit".to_string()));
    }
}
