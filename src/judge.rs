use crate::io::parse_values;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WitnessError {
    #[error("{original} values cannot cover {changed} changed values")]
    LengthMismatch { changed: usize, original: usize },
    #[error("value {value} appears {expected} times in the input but {actual} times in the answer")]
    CountMismatch {
        value: i64,
        expected: usize,
        actual: usize,
    },
    #[error("double of {value} overflows")]
    Overflow { value: i64 },
}

/// Checks that `{o, 2o : o in original}` is exactly the multiset `changed`.
pub fn check_witness(changed: &[i64], original: &[i64]) -> Result<(), WitnessError> {
    if changed.len() != 2 * original.len() {
        return Err(WitnessError::LengthMismatch {
            changed: changed.len(),
            original: original.len(),
        });
    }
    let mut expected: FxHashMap<i64, usize> = FxHashMap::default();
    for &v in changed {
        *expected.entry(v).or_default() += 1;
    }
    let mut actual: FxHashMap<i64, usize> = FxHashMap::default();
    for &o in original {
        let double = o.checked_mul(2).ok_or(WitnessError::Overflow { value: o })?;
        *actual.entry(o).or_default() += 1;
        *actual.entry(double).or_default() += 1;
    }
    // Report the smallest offending value so failures are reproducible.
    for &value in expected.keys().chain(actual.keys()).sorted().dedup() {
        let e = expected.get(&value).copied().unwrap_or(0);
        let a = actual.get(&value).copied().unwrap_or(0);
        if e != a {
            return Err(WitnessError::CountMismatch {
                value,
                expected: e,
                actual: a,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    WrongAnswer(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Decides whether a program's output is acceptable for one case.
pub trait Judge {
    fn name(&self) -> &str;
    fn judge(&self, input: &[i64], expected: &str, actual: &str) -> Verdict;
}

/// Trimmed string equality against the expected output.
pub struct ExactJudge;

impl Judge for ExactJudge {
    fn name(&self) -> &str {
        "exact"
    }
    fn judge(&self, _input: &[i64], expected: &str, actual: &str) -> Verdict {
        if expected.trim() == actual.trim() {
            Verdict::Accepted
        } else {
            Verdict::WrongAnswer(format!(
                "expected {:?}, got {:?}",
                expected.trim(),
                actual.trim()
            ))
        }
    }
}

/// Accepts any valid original array, not only the expected one.
///
/// An empty expected output means no reconstruction exists, so the answer
/// must be empty too.
pub struct WitnessJudge;

impl Judge for WitnessJudge {
    fn name(&self) -> &str {
        "witness"
    }
    fn judge(&self, input: &[i64], expected: &str, actual: &str) -> Verdict {
        let answer = match parse_values(actual) {
            Ok(v) => v,
            Err(e) => return Verdict::WrongAnswer(format!("unreadable output: {}", e)),
        };
        if expected.trim().is_empty() {
            return if answer.is_empty() {
                Verdict::Accepted
            } else {
                Verdict::WrongAnswer(format!(
                    "expected no reconstruction, got {} values",
                    answer.len()
                ))
            };
        }
        if answer.is_empty() && !input.is_empty() {
            return Verdict::WrongAnswer("missed an existing reconstruction".to_string());
        }
        match check_witness(input, &answer) {
            Ok(()) => Verdict::Accepted,
            Err(e) => Verdict::WrongAnswer(e.to_string()),
        }
    }
}

pub fn get_judge(name: &str) -> Option<Box<dyn Judge>> {
    match name {
        "exact" => Some(Box::new(ExactJudge)),
        "witness" => Some(Box::new(WitnessJudge)),
        _ => None,
    }
}
