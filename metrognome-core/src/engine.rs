//! Timing engine: owns tempo, time signature and the beat counter, and
//! publishes one beat per period on a single-slot channel.
//!
//! The producer is a dedicated `beat-clock` thread started by `start()` and
//! joined by `stop()`. A beat that finds the slot still occupied is dropped,
//! so a slow consumer sees at most one stale beat and never a backlog.
//!
//! The period is `60000 / tempo` whole milliseconds. Beat N is due exactly
//! N periods after `start()`, so a late wake-up delays one beat and not the
//! ones after it. The truncated remainder makes long runs slightly faster
//! than the nominal tempo (0.4% at 140 BPM); this is accepted behavior.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::error::EngineError;
use crate::signature::TimeSignature;

pub const MIN_TEMPO: u16 = 20;
pub const MAX_TEMPO: u16 = 300;
pub const DEFAULT_TEMPO: u16 = 120;

/// Beat period for a tempo, in whole milliseconds.
pub fn period_for(tempo: u16) -> Duration {
    Duration::from_millis(60_000 / u64::from(tempo.max(1)))
}

fn tempo_in_range(tempo: u16) -> bool {
    (MIN_TEMPO..=MAX_TEMPO).contains(&tempo)
}

/// Read-only view of engine state for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub tempo: u16,
    pub signature: TimeSignature,
    pub running: bool,
    pub current_beat: u8,
}

/// A running producer thread and the sender whose drop cancels it.
struct BeatClock {
    cancel_tx: Sender<()>,
    join_handle: JoinHandle<()>,
}

pub struct TimingEngine {
    tempo: u16,
    signature: TimeSignature,
    running: bool,
    /// Next beat to publish, 1..=signature.beats. Advanced by the clock thread.
    current_beat: Arc<AtomicU8>,
    beat_tx: Sender<u8>,
    beat_rx: Receiver<u8>,
    clock: Option<BeatClock>,
}

impl TimingEngine {
    /// Create a stopped engine. Fails if `tempo` is outside
    /// `MIN_TEMPO..=MAX_TEMPO` or either signature field is zero.
    pub fn new(tempo: u16, signature: TimeSignature) -> Result<Self, EngineError> {
        if !tempo_in_range(tempo) || !signature.is_valid() {
            return Err(EngineError::InvalidConfig { tempo, signature });
        }
        let (beat_tx, beat_rx) = crossbeam_channel::bounded(1);
        Ok(Self {
            tempo,
            signature,
            running: false,
            current_beat: Arc::new(AtomicU8::new(1)),
            beat_tx,
            beat_rx,
            clock: None,
        })
    }

    pub fn tempo(&self) -> u16 {
        self.tempo
    }

    pub fn signature(&self) -> TimeSignature {
        self.signature
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_beat(&self) -> u8 {
        self.current_beat.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            tempo: self.tempo,
            signature: self.signature,
            running: self.running,
            current_beat: self.current_beat(),
        }
    }

    /// Receiving end of the beat slot. Each `recv` yields one beat number;
    /// callers must receive again after every delivery to keep observing.
    pub fn beats(&self) -> Receiver<u8> {
        self.beat_rx.clone()
    }

    /// Start the clock at beat 1. No-op while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.current_beat.store(1, Ordering::SeqCst);

        let period = period_for(self.tempo);
        let beats_per_measure = self.signature.beats;
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(0);
        let beat_tx = self.beat_tx.clone();
        let current_beat = Arc::clone(&self.current_beat);

        let spawned = thread::Builder::new()
            .name("beat-clock".into())
            .spawn(move || {
                clock_loop(period, beats_per_measure, current_beat, beat_tx, cancel_rx);
            });

        match spawned {
            Ok(join_handle) => {
                self.clock = Some(BeatClock { cancel_tx, join_handle });
                self.running = true;
                log::debug!(
                    target: "engine",
                    "started at {} BPM in {} (period {:?})",
                    self.tempo, self.signature, period
                );
            }
            Err(e) => {
                log::error!(target: "engine", "failed to spawn beat clock: {}", e);
            }
        }
    }

    /// Stop the clock and reset to beat 1. No-op while stopped.
    ///
    /// Joins the clock thread and then empties the beat slot, so nothing
    /// published before this call can be received after it returns.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        if let Some(BeatClock { cancel_tx, join_handle }) = self.clock.take() {
            drop(cancel_tx);
            if join_handle.join().is_err() {
                log::warn!(target: "engine", "beat clock thread panicked");
            }
        }
        while self.beat_rx.try_recv().is_ok() {}

        self.current_beat.store(1, Ordering::SeqCst);
        log::debug!(target: "engine", "stopped");
    }

    /// Change tempo. Values outside `MIN_TEMPO..=MAX_TEMPO` are ignored.
    /// A running engine restarts on a fresh downbeat.
    pub fn set_tempo(&mut self, bpm: u16) {
        if !tempo_in_range(bpm) {
            log::debug!(target: "engine", "ignoring out-of-range tempo {}", bpm);
            return;
        }
        self.restart_with(|engine| engine.tempo = bpm);
    }

    /// Change time signature. Signatures with a zero field are ignored.
    /// Always resets to beat 1; a running engine restarts.
    pub fn set_time_signature(&mut self, signature: TimeSignature) {
        if !signature.is_valid() {
            log::debug!(target: "engine", "ignoring invalid signature {}", signature);
            return;
        }
        self.restart_with(|engine| engine.signature = signature);
    }

    /// Change tempo and signature in one stop/apply/restart cycle. If either
    /// value is out of bounds nothing changes.
    pub fn apply_preset(&mut self, tempo: u16, signature: TimeSignature) {
        if !tempo_in_range(tempo) || !signature.is_valid() {
            log::debug!(
                target: "engine",
                "ignoring preset {} BPM in {}",
                tempo, signature
            );
            return;
        }
        self.restart_with(|engine| {
            engine.tempo = tempo;
            engine.signature = signature;
        });
    }

    fn restart_with(&mut self, apply: impl FnOnce(&mut Self)) {
        let was_running = self.running;
        if was_running {
            self.stop();
        }
        apply(self);
        self.current_beat.store(1, Ordering::SeqCst);
        if was_running {
            self.start();
        }
    }
}

impl Drop for TimingEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Deadline after `due`, on the same phase grid. Deadlines already missed
/// are skipped instead of fired back to back.
fn next_due(due: Instant, period: Duration, now: Instant) -> Instant {
    let mut next = due + period;
    while next <= now {
        next += period;
    }
    next
}

fn clock_loop(
    period: Duration,
    beats_per_measure: u8,
    current_beat: Arc<AtomicU8>,
    beat_tx: Sender<u8>,
    cancel_rx: Receiver<()>,
) {
    let mut due = Instant::now() + period;
    loop {
        crossbeam_channel::select! {
            // Only ever disconnected, never sent on.
            recv(cancel_rx) -> _ => break,
            recv(crossbeam_channel::at(due)) -> _ => {
                let beat = current_beat.load(Ordering::SeqCst);
                match beat_tx.try_send(beat) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        log::trace!(target: "engine", "beat {} dropped, slot still full", beat);
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
                current_beat.store(beat % beats_per_measure + 1, Ordering::SeqCst);
                due = next_due(due, period, Instant::now());
            }
        }
    }
}
