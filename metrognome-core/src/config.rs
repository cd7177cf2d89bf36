use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::DEFAULT_TEMPO;
use crate::signature::{TimeSignature, COMMON_TIME};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    sound: SoundConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    bpm: Option<u16>,
    time_signature: Option<[u8; 2]>,
    sound: Option<bool>,
}

#[derive(Deserialize, Default)]
struct SoundConfig {
    backend: Option<String>,
}

/// How clicks are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundBackend {
    #[default]
    System,
    Bell,
    Off,
}

pub struct Config {
    defaults: DefaultsConfig,
    sound: SoundConfig,
}

impl Config {
    /// Embedded defaults merged with `~/.config/metrognome/config.toml`.
    pub fn load() -> Self {
        Self::load_with_override(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the file at `path`, if it exists.
    pub fn load_with_override(path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_sound(&mut base.sound, user.sound);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            sound: base.sound,
        }
    }

    /// Starting tempo. Not range-checked here; the engine rejects bad values.
    pub fn bpm(&self) -> u16 {
        self.defaults.bpm.unwrap_or(DEFAULT_TEMPO)
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.defaults
            .time_signature
            .map(|ts| TimeSignature::new(ts[0], ts[1]))
            .unwrap_or(COMMON_TIME)
    }

    /// Whether clicks are audible at startup.
    pub fn sound_enabled(&self) -> bool {
        self.defaults.sound.unwrap_or(true)
    }

    pub fn sound_backend(&self) -> SoundBackend {
        self.sound
            .backend
            .as_deref()
            .and_then(parse_sound_backend)
            .unwrap_or_default()
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("metrognome"))
}

fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.bpm.is_some() {
        base.bpm = user.bpm;
    }
    if user.time_signature.is_some() {
        base.time_signature = user.time_signature;
    }
    if user.sound.is_some() {
        base.sound = user.sound;
    }
}

fn merge_sound(base: &mut SoundConfig, user: SoundConfig) {
    if user.backend.is_some() {
        base.backend = user.backend;
    }
}

fn parse_sound_backend(s: &str) -> Option<SoundBackend> {
    match s.to_lowercase().as_str() {
        "system" => Some(SoundBackend::System),
        "bell" => Some(SoundBackend::Bell),
        "off" | "none" => Some(SoundBackend::Off),
        _ => {
            log::warn!(target: "config", "unknown sound backend '{}'", s);
            None
        }
    }
}
