//! # Doubled Array Reconstruction
//!
//! Given a "changed" array that is claimed to be the multiset union of some
//! array and its element-wise double, recovers one such original array.
//!
//! The values are processed in ascending order. When `v` is the smallest
//! value that is still unmatched, nothing smaller can claim it as a double,
//! so it must be a half and `2v` must still be available.

use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReconstructError {
    #[error("odd number of values ({len}); every original value contributes two")]
    OddLength { len: usize },
    #[error("value {value} has no double left to pair with")]
    Unpaired { value: i64 },
}

/// Reconstructs the original array, or explains why none exists.
///
/// The result lists the original values in ascending order. An empty input
/// yields `Ok(vec![])`.
///
/// # Examples
///
/// ```
/// use doubled::reconstruct::{find_original, ReconstructError};
/// assert_eq!(find_original(&[1, 3, 4, 2, 6, 8]), Ok(vec![1, 3, 4]));
/// assert_eq!(find_original(&[5]), Err(ReconstructError::OddLength { len: 1 }));
/// ```
pub fn find_original(changed: &[i64]) -> Result<Vec<i64>, ReconstructError> {
    if changed.len() % 2 == 1 {
        return Err(ReconstructError::OddLength { len: changed.len() });
    }
    let mut sorted = changed.to_vec();
    sorted.sort_unstable();

    let mut freq: FxHashMap<i64, usize> = FxHashMap::default();
    for &v in &sorted {
        *freq.entry(v).or_default() += 1;
    }

    let mut original = Vec::with_capacity(sorted.len() / 2);
    for &v in &sorted {
        if count(&freq, v) == 0 {
            continue;
        }
        // A double outside the i64 range can never be present.
        let double = v
            .checked_mul(2)
            .ok_or(ReconstructError::Unpaired { value: v })?;
        // Zero is its own double and needs a second copy.
        let needed = if double == v { 2 } else { 1 };
        if count(&freq, double) < needed {
            return Err(ReconstructError::Unpaired { value: v });
        }
        original.push(v);
        take(&mut freq, v);
        take(&mut freq, double);
    }
    Ok(original)
}

/// Empty-on-failure form used by the stdin/stdout driver.
///
/// An empty result is ambiguous: it is returned for empty input as well as for
/// any input without a valid pairing. Use [`find_original`] to tell them apart.
pub fn reconstruct(changed: &[i64]) -> Vec<i64> {
    find_original(changed).unwrap_or_default()
}

fn count(freq: &FxHashMap<i64, usize>, v: i64) -> usize {
    freq.get(&v).copied().unwrap_or(0)
}

fn take(freq: &mut FxHashMap<i64, usize>, v: i64) {
    if let Some(c) = freq.get_mut(&v) {
        *c -= 1;
    }
}
