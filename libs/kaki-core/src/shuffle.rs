//! Randomisation used by sessions and distractor generation.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pseudo-random source used by the engine.
pub type StudyRng = ChaCha8Rng;

/// Build the engine's RNG, deterministic when a seed is given.
pub fn study_rng(seed: Option<u64>) -> StudyRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Return a uniformly random permutation of `items`, leaving the input untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
