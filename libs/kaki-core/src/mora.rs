//! Mora segmentation and pitch pattern levels.
//!
//! A mora is the unit pitch accent is counted over. Small glide and vowel
//! kana (きょ, ファ) belong to the preceding mora; every other character
//! starts a new one.

use serde::{Deserialize, Serialize};

/// Small kana that merge into the preceding mora.
const COMBINING_KANA: [char; 16] = [
    'ゃ', 'ゅ', 'ょ', 'ャ', 'ュ', 'ョ', 'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ',
];

/// Long-vowel mark.
pub const LONG_VOWEL_MARK: &str = "ー";

/// Geminate (sokuon) marks.
pub const GEMINATE_MARKS: [&str; 2] = ["っ", "ッ"];

/// Split a reading into morae.
///
/// Returns an empty vector for an empty reading.
pub fn segment(reading: &str) -> Vec<String> {
    let mut morae: Vec<String> = Vec::new();

    for c in reading.chars() {
        match morae.last_mut() {
            Some(current) if COMBINING_KANA.contains(&c) => current.push(c),
            _ => morae.push(c.to_string()),
        }
    }

    morae
}

/// Whether a mora can never carry an accent drop.
pub fn is_unaccentable(mora: &str) -> bool {
    mora == LONG_VOWEL_MARK || GEMINATE_MARKS.contains(&mora)
}

/// Pitch height of one mora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchLevel {
    Low,
    High,
}

/// Pitch levels for a word of `mora_count` morae with accent class `pitch`,
/// followed by the level of an attached particle.
///
/// The returned vector has `mora_count + 1` entries.
pub fn pitch_levels(mora_count: usize, pitch: u32) -> Vec<PitchLevel> {
    let pitch = pitch as usize;

    (0..=mora_count)
        .map(|i| match pitch {
            // Heiban: low start, high through the particle.
            0 => {
                if i == 0 {
                    PitchLevel::Low
                } else {
                    PitchLevel::High
                }
            }
            // Atamadaka: high first mora, low afterwards.
            1 => {
                if i == 0 {
                    PitchLevel::High
                } else {
                    PitchLevel::Low
                }
            }
            // Nakadaka / odaka: rise after the first mora, drop after `pitch`.
            _ => {
                if i == 0 || i >= pitch {
                    PitchLevel::Low
                } else {
                    PitchLevel::High
                }
            }
        })
        .collect()
}
