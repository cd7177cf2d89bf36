//! Tempo and signature presets.

use crate::signature::{TimeSignature, SIGNATURES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub tempo: u16,
    pub signature: TimeSignature,
    pub description: &'static str,
}

pub const PRESETS: [Preset; 6] = [
    Preset {
        name: "Peaceful Garden Stroll",
        tempo: 60,
        signature: SIGNATURES[0].signature,
        description: "A leisurely walk through the gnome gardens",
    },
    Preset {
        name: "Gnome Work Song",
        tempo: 120,
        signature: SIGNATURES[0].signature,
        description: "Perfect for tending to the mushroom patches",
    },
    Preset {
        name: "Toadstool Waltz",
        tempo: 90,
        signature: SIGNATURES[1].signature,
        description: "Dance beneath the moonlit mushrooms",
    },
    Preset {
        name: "Pixie Dust Presto",
        tempo: 180,
        signature: SIGNATURES[0].signature,
        description: "When the garden gnomes need to hurry!",
    },
    Preset {
        name: "Underground Jig",
        tempo: 140,
        signature: SIGNATURES[2].signature,
        description: "For celebrating in the gnome tunnels",
    },
    Preset {
        name: "Meditation by the Pond",
        tempo: 40,
        signature: SIGNATURES[0].signature,
        description: "Slow and steady wins the gnome race",
    },
];

/// Short description of a tempo band.
pub fn tempo_description(bpm: u16) -> &'static str {
    match bpm {
        0..=39 => "Gnome hibernation speed",
        40..=59 => "Sleepy garden gnome pace",
        60..=79 => "Morning dew collection tempo",
        80..=99 => "Casual mushroom picking rhythm",
        100..=119 => "Standard gnome work tempo",
        120..=139 => "Energetic garden tending speed",
        140..=159 => "Gnome celebration dance",
        160..=179 => "Chasing garden pests tempo",
        180..=199 => "Gnome emergency response speed",
        _ => "Hyperactive pixie dust overdose!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MAX_TEMPO, MIN_TEMPO};

    #[test]
    fn presets_are_within_engine_bounds() {
        for p in PRESETS.iter() {
            assert!((MIN_TEMPO..=MAX_TEMPO).contains(&p.tempo), "{}", p.name);
            assert!(p.signature.is_valid());
        }
    }

    #[test]
    fn tempo_bands() {
        assert_eq!(tempo_description(20), "Gnome hibernation speed");
        assert_eq!(tempo_description(40), "Sleepy garden gnome pace");
        assert_eq!(tempo_description(119), "Standard gnome work tempo");
        assert_eq!(tempo_description(120), "Energetic garden tending speed");
        assert_eq!(tempo_description(199), "Gnome emergency response speed");
        assert_eq!(tempo_description(300), "Hyperactive pixie dust overdose!");
    }
}
