use std::fmt;

use crate::signature::TimeSignature;

/// Error from constructing a timing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Tempo outside the supported range or a signature with a zero field.
    InvalidConfig { tempo: u16, signature: TimeSignature },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { tempo, signature } => write!(
                f,
                "invalid metronome config: {} BPM in {} (tempo must be {}-{}, signature fields non-zero)",
                tempo,
                signature,
                crate::engine::MIN_TEMPO,
                crate::engine::MAX_TEMPO
            ),
        }
    }
}

impl std::error::Error for EngineError {}
