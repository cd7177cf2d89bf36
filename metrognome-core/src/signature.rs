//! Time signatures and the fixed signature catalog.

use std::fmt;

/// A musical time signature: beats per measure over the note value that
/// gets the beat. Two signatures are the same signature when both numbers
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    pub beats: u8,
    pub unit: u8,
}

/// Catalog entry: a signature plus its display text.
#[derive(Debug, Clone, Copy)]
pub struct SignatureEntry {
    pub signature: TimeSignature,
    pub name: &'static str,
    pub saying: &'static str,
}

pub const COMMON_TIME: TimeSignature = TimeSignature::new(4, 4);

/// Signatures reachable by cycling, in cycle order.
pub const SIGNATURES: [SignatureEntry; 6] = [
    SignatureEntry {
        signature: TimeSignature::new(4, 4),
        name: "4/4 - Garden March",
        saying: "Four steady steps through the garden path!",
    },
    SignatureEntry {
        signature: TimeSignature::new(3, 4),
        name: "3/4 - Gnome Waltz",
        saying: "Dance among the toadstools, one-two-three!",
    },
    SignatureEntry {
        signature: TimeSignature::new(6, 8),
        name: "6/8 - Fairy Ring Jig",
        saying: "Six quick hops around the mushroom circle!",
    },
    SignatureEntry {
        signature: TimeSignature::new(5, 4),
        name: "5/4 - Mystical Garden",
        saying: "Five beats for the ancient gnome rituals!",
    },
    SignatureEntry {
        signature: TimeSignature::new(7, 8),
        name: "7/8 - Gnome's Riddle",
        saying: "Seven steps to solve the garden mystery!",
    },
    SignatureEntry {
        signature: TimeSignature::new(2, 4),
        name: "2/4 - Quick March",
        saying: "Left-right through the gnome village!",
    },
];

impl TimeSignature {
    pub const fn new(beats: u8, unit: u8) -> Self {
        Self { beats, unit }
    }

    /// Both numbers must be non-zero.
    pub fn is_valid(&self) -> bool {
        self.beats > 0 && self.unit > 0
    }

    fn entry(&self) -> Option<SignatureEntry> {
        SIGNATURES.iter().find(|e| e.signature == *self).copied()
    }

    /// Display name from the catalog, or plain "B/U" for uncatalogued signatures.
    pub fn name(&self) -> String {
        match self.entry() {
            Some(e) => e.name.to_string(),
            None => self.to_string(),
        }
    }

    pub fn saying(&self) -> &'static str {
        self.entry().map(|e| e.saying).unwrap_or("")
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        COMMON_TIME
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.unit)
    }
}

/// Position of `sig` in the catalog, matched on (beats, unit).
pub fn catalog_index(sig: TimeSignature) -> Option<usize> {
    SIGNATURES.iter().position(|e| e.signature == sig)
}

/// The signature after `sig` in the catalog, wrapping. Uncatalogued
/// signatures count as index 0.
pub fn next_in_catalog(sig: TimeSignature) -> TimeSignature {
    let idx = catalog_index(sig).unwrap_or(0);
    SIGNATURES[(idx + 1) % SIGNATURES.len()].signature
}

/// The signature before `sig` in the catalog, wrapping.
pub fn prev_in_catalog(sig: TimeSignature) -> TimeSignature {
    let idx = catalog_index(sig).unwrap_or(0);
    SIGNATURES[(idx + SIGNATURES.len() - 1) % SIGNATURES.len()].signature
}
