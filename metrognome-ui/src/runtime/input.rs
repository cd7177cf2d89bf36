//! Event dispatch: beats, animation ticks, keys and resizes.

use std::io;

use crossbeam_channel::after;

use super::{AppRuntime, LoopEvent, TICK};
use crate::ui::AppEvent;

impl AppRuntime {
    /// Handle one loop event. Returns true if the app should quit.
    pub(crate) fn handle_event(&mut self, event: LoopEvent) -> io::Result<bool> {
        match event {
            LoopEvent::Beat(beat) => {
                // One-shot: the listener is spent until the handler re-arms it.
                self.beat_listener = None;
                let followup = self.app.on_beat(beat);
                Ok(self.apply_followup(followup))
            }
            LoopEvent::BeatsClosed => {
                log::warn!(target: "runtime", "beat channel closed");
                self.beat_listener = None;
                Ok(false)
            }
            LoopEvent::Tick => {
                self.app.on_tick();
                self.tick_timer = after(TICK);
                Ok(false)
            }
            LoopEvent::Input(AppEvent::Resize(width, height)) => {
                self.app.on_resize(width, height);
                Ok(false)
            }
            LoopEvent::Input(AppEvent::Key(key)) => {
                let followup = self.app.on_key(&key);
                Ok(self.apply_followup(followup))
            }
            LoopEvent::InputClosed => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::{unbounded, Sender};
    use metrognome_core::{SilentClick, TimeSignature, TimingEngine};

    use super::*;
    use crate::app::App;
    use crate::state::{DisplayState, FLASH_PEAK};
    use crate::ui::keybindings::load_keybindings_with_override;
    use crate::ui::{InputEvent, KeyCode, LayerStack, Modifiers};

    fn runtime(tempo: u16) -> (AppRuntime, Sender<AppEvent>) {
        let engine = TimingEngine::new(tempo, TimeSignature::new(4, 4)).unwrap();
        let app = App::new(
            engine,
            Box::new(SilentClick),
            LayerStack::new(load_keybindings_with_override(None)),
            DisplayState::new(true, 3),
        );
        let (tx, rx) = unbounded();
        (AppRuntime::new(app, rx), tx)
    }

    fn press(tx: &Sender<AppEvent>, key: KeyCode) {
        tx.send(AppEvent::Key(InputEvent::key(key))).unwrap();
    }

    /// Pull events until `want` matches, handling everything on the way.
    fn run_until(rt: &mut AppRuntime, want: impl Fn(&LoopEvent) -> bool) -> LoopEvent {
        loop {
            let event = rt.next_event();
            rt.handle_event(event).unwrap();
            if want(&event) {
                return event;
            }
        }
    }

    #[test]
    fn resize_is_recorded() {
        let (mut rt, tx) = runtime(120);
        tx.send(AppEvent::Resize(90, 30)).unwrap();
        run_until(&mut rt, |e| matches!(e, LoopEvent::Input(_)));
        assert_eq!((rt.app.display.width, rt.app.display.height), (90, 30));
        assert!(!rt.app.display.stars.is_empty());
    }

    #[test]
    fn ticks_keep_coming_while_stopped() {
        let (mut rt, _tx) = runtime(120);
        for _ in 0..3 {
            run_until(&mut rt, |e| *e == LoopEvent::Tick);
        }
        assert_eq!(rt.app.display.frame, 3);
    }

    #[test]
    fn beats_flow_after_play_and_rearm() {
        let (mut rt, tx) = runtime(300);
        press(&tx, KeyCode::Char(' '));
        run_until(&mut rt, |e| matches!(e, LoopEvent::Input(_)));
        assert!(rt.beat_listener.is_some());

        let first = run_until(&mut rt, |e| matches!(e, LoopEvent::Beat(_)));
        assert_eq!(first, LoopEvent::Beat(1));
        let second = run_until(&mut rt, |e| matches!(e, LoopEvent::Beat(_)));
        assert_eq!(second, LoopEvent::Beat(2));
        assert!(rt.app.display.flash > 0 && rt.app.display.flash <= FLASH_PEAK);

        let ctrl_c = AppEvent::Key(InputEvent::new(KeyCode::Char('c'), Modifiers::ctrl()));
        assert!(rt.handle_event(LoopEvent::Input(ctrl_c)).unwrap());
        assert!(!rt.app.engine().is_running());
    }

    #[test]
    fn quit_ends_loop() {
        let (mut rt, _tx) = runtime(120);
        let quit = rt
            .handle_event(LoopEvent::Input(AppEvent::Key(InputEvent::key(KeyCode::Char('q')))))
            .unwrap();
        assert!(quit);
    }

    #[test]
    fn spent_listener_stays_disarmed_when_stopped() {
        let (mut rt, _tx) = runtime(120);
        rt.handle_event(LoopEvent::Beat(1)).unwrap();
        assert!(rt.beat_listener.is_none());
        assert_eq!(rt.app.display.flash, FLASH_PEAK);
    }

    #[test]
    fn closed_input_is_an_error() {
        let (mut rt, tx) = runtime(120);
        drop(tx);
        // A tick may win the race; the closed channel is seen right after.
        let mut event = rt.next_event();
        while event == LoopEvent::Tick {
            rt.handle_event(event).unwrap();
            event = rt.next_event();
        }
        assert_eq!(event, LoopEvent::InputClosed);
        assert!(rt.handle_event(event).is_err());
    }
}
