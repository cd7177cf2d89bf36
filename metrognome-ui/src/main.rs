mod app;
mod panes;
mod runtime;
mod sound;
mod state;
mod ui;

use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use metrognome_core::config::Config;
use metrognome_core::TimingEngine;

use app::App;
use state::DisplayState;
use ui::{keybindings, LayerStack, RatatuiBackend};

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("metrognome")
        .join("metrognome.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/metrognome.log")) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("metrognome: logging disabled: {}", e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        return;
    }

    log::info!("metrognome starting (log level: {:?})", log_level);
}

/// Seed for the starfield; any value works.
fn star_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let engine = TimingEngine::new(config.bpm(), config.time_signature())?;

    if !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
        return Err("standard input and output must be an interactive terminal".into());
    }

    let app = App::new(
        engine,
        sound::click_player(config.sound_backend()),
        LayerStack::new(keybindings::load_keybindings()),
        DisplayState::new(config.sound_enabled(), star_seed()),
    );

    let mut backend = RatatuiBackend::new()?;
    backend.start()?;

    let result = runtime::run(app, &mut backend);

    let stopped = backend.stop();
    result?;
    stopped?;
    Ok(())
}

fn main() -> ExitCode {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    match run() {
        Ok(()) => {
            log::info!("metrognome exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("fatal: {}", e);
            eprintln!("metrognome: {}", e);
            ExitCode::FAILURE
        }
    }
}
