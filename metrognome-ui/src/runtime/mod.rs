//! App runtime coordinator.
//!
//! A single-threaded loop multiplexing three sources with
//! `crossbeam_channel::select!`:
//! - `input`: key and resize events from the `input-reader` thread
//! - beats: the engine's single-slot channel, armed one receive at a time
//! - the animation timer: a one-shot `after(TICK)` re-armed after each tick
//!
//! Each event is handled to completion and the frame is redrawn (`render`).

mod input;
mod render;

use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::{after, never, Receiver};

use crate::app::{App, Followup};
use crate::ui::{ratatui_impl, AppEvent, RatatuiBackend};

/// Animation tick period.
pub const TICK: Duration = Duration::from_millis(100);

/// One unit of work for the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopEvent {
    Beat(u8),
    BeatsClosed,
    Tick,
    Input(AppEvent),
    InputClosed,
}

/// Top-level runtime that owns the app and drives the event loop.
pub struct AppRuntime {
    pub(crate) app: App,
    input_rx: Receiver<AppEvent>,
    /// Armed beat receive; `None` until the next `Followup::ListenForBeat`.
    beat_listener: Option<Receiver<u8>>,
    tick_timer: Receiver<Instant>,
}

impl AppRuntime {
    pub fn new(app: App, input_rx: Receiver<AppEvent>) -> Self {
        let beat_listener = app.engine().is_running().then(|| app.engine().beats());
        Self {
            app,
            input_rx,
            beat_listener,
            tick_timer: after(TICK),
        }
    }

    /// Main event loop. Returns after a quit command.
    pub fn run(&mut self, backend: &mut RatatuiBackend) -> io::Result<()> {
        let (width, height) = backend.size()?;
        self.app.on_resize(width, height);
        self.render(backend)?;

        loop {
            let event = self.next_event();
            if self.handle_event(event)? {
                break;
            }
            self.render(backend)?;
        }
        log::info!(target: "runtime", "event loop finished");
        Ok(())
    }

    /// Block until one source is ready.
    pub(crate) fn next_event(&mut self) -> LoopEvent {
        let idle = never();
        let beats = self.beat_listener.as_ref().unwrap_or(&idle);
        crossbeam_channel::select! {
            recv(beats) -> msg => match msg {
                Ok(beat) => LoopEvent::Beat(beat),
                Err(_) => LoopEvent::BeatsClosed,
            },
            recv(self.tick_timer) -> _ => LoopEvent::Tick,
            recv(self.input_rx) -> msg => match msg {
                Ok(app_event) => LoopEvent::Input(app_event),
                Err(_) => LoopEvent::InputClosed,
            },
        }
    }

    /// Act on a handler's followup. Returns true if the loop should end.
    pub(crate) fn apply_followup(&mut self, followup: Followup) -> bool {
        match followup {
            Followup::None => false,
            Followup::ListenForBeat => {
                self.beat_listener = Some(self.app.engine().beats());
                false
            }
            Followup::Quit => true,
        }
    }
}

/// Public entry point: start the input reader and run until quit.
pub fn run(app: App, backend: &mut RatatuiBackend) -> io::Result<()> {
    let (input_tx, input_rx) = crossbeam_channel::unbounded();
    // Detached: it blocks in the terminal read and ends with the process.
    ratatui_impl::spawn_input_reader(input_tx)?;
    let mut runtime = AppRuntime::new(app, input_rx);
    runtime.run(backend)
}
