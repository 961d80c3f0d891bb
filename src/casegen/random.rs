//! # Random Instance Generation
//!
//! Builds "changed" arrays by drawing a random original array, appending each
//! value's double and shuffling. A corrupted variant perturbs one value so that
//! no original array exists.

use crate::io::format_original;
use crate::reconstruct::reconstruct;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

/// A generated instance together with the answer the reconstructor gives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub changed: Vec<i64>,
    pub original: Vec<i64>,
}

impl Instance {
    /// The stdin text for this instance.
    pub fn input(&self) -> String {
        format!(
            "{}\n{}\n",
            self.changed.len(),
            format_original(&self.changed)
        )
    }

    /// The stdout the driver is expected to print.
    pub fn expected(&self) -> String {
        format!("{}\n", format_original(&self.original))
    }
}

/// Draws `len` values uniformly from `0..=max`.
pub fn generate_original<R: Rng>(len: usize, max: i64, rng: &mut R) -> Vec<i64> {
    (0..len).map(|_| rng.random_range(0..=max)).collect()
}

/// Appends the double of every value and shuffles the result.
pub fn double_and_shuffle<R: Rng>(original: &[i64], rng: &mut R) -> Vec<i64> {
    let mut changed: Vec<i64> = original.iter().flat_map(|&v| [v, 2 * v]).collect();
    changed.shuffle(rng);
    changed
}

/// Replaces one copy of the largest value `m` with `2m + 1`, so that the
/// multiset can no longer be split into halves and doubles.
///
/// The new value is larger than everything else and odd, so it is neither a
/// half nor a double of anything present. Assumes non-negative values.
pub fn corrupt<R: Rng>(changed: &mut [i64], rng: &mut R) {
    let Some(max) = changed.iter().copied().max() else {
        return;
    };
    let positions: Vec<usize> = (0..changed.len()).filter(|&i| changed[i] == max).collect();
    if let Some(&i) = positions.choose(rng) {
        changed[i] = 2 * max + 1;
    }
}

/// Generates one instance. With `impossible` set, the changed array is
/// corrupted so that reconstruction fails.
pub fn generate<R: Rng>(len: usize, max: i64, impossible: bool, rng: &mut R) -> Instance {
    let original = generate_original(len, max, rng);
    let mut changed = double_and_shuffle(&original, rng);
    if impossible {
        corrupt(&mut changed, rng);
    }
    let original = reconstruct(&changed);
    Instance { changed, original }
}
