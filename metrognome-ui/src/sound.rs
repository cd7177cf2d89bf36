//! Click players that shell out to the platform's sound tools.
//!
//! Every click runs on its own short-lived thread, so a slow or missing
//! player never holds up the event loop. Failures are logged and dropped.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use metrognome_core::config::SoundBackend;
use metrognome_core::{ClickPlayer, SilentClick};

/// One external command making one sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Wait before running; staggers the accent blip after the click.
    pub delay: Duration,
}

impl ClickCommand {
    const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            program,
            args,
            delay: Duration::ZERO,
        }
    }

    const fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn run(&self) -> bool {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => true,
            Ok(status) => {
                log::debug!(target: "sound", "{} exited with {}", self.program, status);
                false
            }
            Err(e) => {
                log::debug!(target: "sound", "{} failed: {}", self.program, e);
                false
            }
        }
    }
}

/// The commands for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickPlan {
    /// Played on every beat.
    pub click: ClickCommand,
    /// Tried when `click` fails.
    pub fallback: Option<ClickCommand>,
    /// Extra higher blip layered on the downbeat.
    pub accent: ClickCommand,
}

/// Commands for `os` (as in `std::env::consts::OS`), or `None` when only
/// the terminal bell is available.
pub fn plan_for(os: &str) -> Option<ClickPlan> {
    match os {
        "macos" => Some(ClickPlan {
            click: ClickCommand::new("afplay", &["/System/Library/Sounds/Tink.aiff"]),
            fallback: None,
            accent: ClickCommand::new("afplay", &["/System/Library/Sounds/Pop.aiff"]),
        }),
        "linux" => Some(ClickPlan {
            click: ClickCommand::new("beep", &["-f", "440", "-l", "50"]),
            fallback: Some(ClickCommand::new(
                "paplay",
                &["/usr/share/sounds/freedesktop/stereo/message.oga"],
            )),
            accent: ClickCommand::new("beep", &["-f", "880", "-l", "30"])
                .after(Duration::from_millis(10)),
        }),
        "windows" => Some(ClickPlan {
            click: ClickCommand::new("powershell", &["-c", "[console]::beep(800,100)"]),
            fallback: None,
            accent: ClickCommand::new("powershell", &["-c", "[console]::beep(1200,50)"])
                .after(Duration::from_millis(50)),
        }),
        _ => None,
    }
}

fn spawn_click(name: &str, job: impl FnOnce() + Send + 'static) {
    if let Err(e) = thread::Builder::new().name(name.into()).spawn(job) {
        log::warn!(target: "sound", "could not spawn {} thread: {}", name, e);
    }
}

/// Plays clicks through the platform's command-line sound tools.
pub struct SystemClick {
    plan: ClickPlan,
}

impl SystemClick {
    pub fn new(plan: ClickPlan) -> Self {
        Self { plan }
    }
}

impl ClickPlayer for SystemClick {
    fn play_click(&self, accent: bool) {
        let ClickPlan { click, fallback, .. } = self.plan;
        spawn_click("click", move || {
            if !click.run() {
                if let Some(fallback) = fallback {
                    fallback.run();
                }
            }
        });
        if accent {
            let blip = self.plan.accent;
            spawn_click("click-accent", move || {
                blip.run();
            });
        }
    }
}

/// Rings the terminal bell; twice on the downbeat.
pub struct BellClick;

impl ClickPlayer for BellClick {
    fn play_click(&self, accent: bool) {
        let bell: &[u8] = if accent { b"\x07\x07" } else { b"\x07" };
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(bell).and_then(|_| out.flush()) {
            log::debug!(target: "sound", "bell failed: {}", e);
        }
    }
}

/// Click player for the configured backend.
pub fn click_player(backend: SoundBackend) -> Box<dyn ClickPlayer> {
    match backend {
        SoundBackend::System => match plan_for(std::env::consts::OS) {
            Some(plan) => Box::new(SystemClick::new(plan)),
            None => {
                log::info!(target: "sound", "no sound command for {}, using the bell", std::env::consts::OS);
                Box::new(BellClick)
            }
        },
        SoundBackend::Bell => Box::new(BellClick),
        SoundBackend::Off => Box::new(SilentClick),
    }
}
