//! Parsing of the `n v_1 ... v_n` stdin format and formatting of results.

use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("missing element count")]
    MissingCount,
    #[error("invalid token #{index}: {token:?}")]
    InvalidToken { index: usize, token: String },
    #[error("expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },
}

/// Reads the element count followed by that many integers.
///
/// Tokens may be split across lines arbitrarily. Anything after the `n`-th
/// value is ignored.
pub fn parse_changed(text: &str) -> Result<Vec<i64>, InputError> {
    let mut tokens = text.split_ascii_whitespace().enumerate();
    let n: usize = match tokens.next() {
        None => return Err(InputError::MissingCount),
        Some((index, token)) => token.parse().map_err(|_| InputError::InvalidToken {
            index,
            token: token.to_string(),
        })?,
    };
    let mut changed = Vec::with_capacity(n.min(1 << 20));
    for (index, token) in tokens.take(n) {
        let v = token.parse().map_err(|_| InputError::InvalidToken {
            index,
            token: token.to_string(),
        })?;
        changed.push(v);
    }
    if changed.len() < n {
        return Err(InputError::Truncated {
            expected: n,
            found: changed.len(),
        });
    }
    Ok(changed)
}

/// Formats values space-separated on one line, without a trailing newline.
pub fn format_original(values: &[i64]) -> String {
    values.iter().join(" ")
}

/// Parses a whitespace-separated list of integers (a program's answer).
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    text.split_ascii_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|_| InputError::InvalidToken {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}
