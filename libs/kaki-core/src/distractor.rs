//! Pitch-accent answer generation.

use rand::Rng;

use crate::mora::{is_unaccentable, segment};
use crate::shuffle::shuffle;
use crate::types::{AnswerOption, Word};

/// Most wrong answers offered alongside the correct one.
pub const MAX_DISTRACTORS: usize = 3;

/// Build the options for a pitch question on `word`.
///
/// Every pitch class the reading admits (0 through the mora count) is a
/// candidate. Classes that would drop on a long-vowel or geminate mora are
/// discarded, up to [`MAX_DISTRACTORS`] of the rest are picked at random and
/// the correct option is inserted at a random position. When no distractor
/// survives the result holds only the correct option.
///
/// Returns an empty vector when there is no word.
pub fn generate<R: Rng + ?Sized>(word: Option<&Word>, rng: &mut R) -> Vec<AnswerOption> {
    let Some(word) = word else {
        return Vec::new();
    };

    let morae = segment(&word.yomi);

    let candidates: Vec<AnswerOption> = (0..=morae.len() as u32)
        .filter(|&pitch| pitch != word.pitch)
        .filter(|&pitch| pitch == 0 || !is_unaccentable(&morae[pitch as usize - 1]))
        .map(|pitch| AnswerOption {
            yomi: word.yomi.clone(),
            pitch,
            correct: false,
        })
        .collect();

    let mut options = shuffle(&candidates, rng);
    options.truncate(MAX_DISTRACTORS);

    let correct = AnswerOption {
        yomi: word.yomi.clone(),
        pitch: word.pitch,
        correct: true,
    };
    let position = rng.gen_range(0..=options.len());
    options.insert(position, correct);

    options
}
