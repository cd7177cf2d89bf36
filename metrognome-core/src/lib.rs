//! # metrognome-core
//!
//! Timing engine and musical data for the Metrognome terminal metronome,
//! independent of any UI framework.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use metrognome_core::config::Config;
//! use metrognome_core::engine::TimingEngine;
//!
//! let config = Config::load();
//! let mut engine = TimingEngine::new(config.bpm(), config.time_signature())?;
//! let beats = engine.beats();
//!
//! engine.start();
//! // One receive per beat; issue another receive after each delivery.
//! let first = beats.recv()?; // 1
//! engine.stop();
//! ```
//!
//! ## Module Overview
//!
//! - [`signature`]: `TimeSignature` and the fixed signature catalog
//! - [`preset`]: tempo/signature presets and tempo descriptions
//! - [`engine`]: `TimingEngine`: beat clock thread and single-slot beat channel
//! - [`click`]: `ClickPlayer`, the fire-and-forget sound contract
//! - [`config`]: TOML configuration loading (embedded + user override)
//! - [`error`]: `EngineError`

pub mod click;
pub mod config;
pub mod engine;
pub mod error;
pub mod preset;
pub mod signature;

pub use click::{ClickPlayer, SilentClick};
pub use engine::{EngineSnapshot, TimingEngine};
pub use error::EngineError;
pub use preset::{Preset, PRESETS};
pub use signature::{TimeSignature, SIGNATURES};
