//! # Test-Case Folders
//!
//! A case folder holds numbered pairs of files: `input<K>.txt` with the stdin
//! given to a solution and `output<K>.txt` with the expected stdout. The
//! shorter `ip<K>.txt` / `op<K>.txt` naming is accepted as well.
//!
//! Cases usually come from problem statements, where examples look like
//!
//! ```text
//! Input: changed = [1,3,4,2,6,8]
//! Output: [1,3,4]
//! ```
//!
//! [`parse_examples`] turns such text into stdin/stdout pairs that
//! [`write_cases`] stores in a folder.

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid array literal {literal:?}: {source}")]
    Json {
        literal: String,
        source: serde_json::Error,
    },
    #[error("unbalanced brackets in {0:?}")]
    Unbalanced(String),
    #[error("line {line}: output without a preceding input")]
    DanglingOutput { line: usize },
    #[error("line {line}: input without an output")]
    MissingOutput { line: usize },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CaseError + use<> {
    let path = path.to_path_buf();
    move |source| CaseError::Io { path, source }
}

/// A numbered input/expected-output pair on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub id: u64,
    pub input_path: PathBuf,
    pub expected_path: PathBuf,
}

impl TestCase {
    pub fn read_input(&self) -> Result<String, CaseError> {
        fs::read_to_string(&self.input_path).map_err(io_err(&self.input_path))
    }
    pub fn read_expected(&self) -> Result<String, CaseError> {
        fs::read_to_string(&self.expected_path).map_err(io_err(&self.expected_path))
    }
}

const NAMINGS: &[(&str, &str)] = &[("input", "output"), ("ip", "op")];

/// Numeric id, the digits as written, and the expected-output prefix.
fn case_id(file_name: &str) -> Option<(u64, &str, &'static str)> {
    let stem = file_name.strip_suffix(".txt")?;
    for &(input, output) in NAMINGS {
        if let Some(digits) = stem.strip_prefix(input)
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return digits.parse().ok().map(|id| (id, digits, output));
        }
    }
    None
}

/// Lists the cases in `dir`, ordered by id.
///
/// Inputs without a matching expected-output file are skipped with a warning.
pub fn discover(dir: &Path) -> Result<Vec<TestCase>, CaseError> {
    let mut cases = vec![];
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let entry = entry.map_err(io_err(dir))?;
        let file_name = entry.file_name();
        let Some((id, digits, output)) = file_name.to_str().and_then(case_id) else {
            continue;
        };
        // `input01.txt` pairs with `output01.txt`, not `output1.txt`.
        let expected_path = dir.join(format!("{}{}.txt", output, digits));
        if !expected_path.exists() {
            eprintln!(
                "Missing expected output file: {}",
                expected_path.display()
            );
            continue;
        }
        cases.push(TestCase {
            id,
            input_path: entry.path(),
            expected_path,
        });
    }
    cases.sort_by(|a, b| (a.id, &a.input_path).cmp(&(b.id, &b.input_path)));
    Ok(cases)
}

/// Writes `input<i>.txt` / `output<i>.txt` for each pair, numbering from 1.
pub fn write_cases(dir: &Path, cases: &[(String, String)]) -> Result<Vec<TestCase>, CaseError> {
    fs::create_dir_all(dir).map_err(io_err(dir))?;
    let mut written = Vec::with_capacity(cases.len());
    for (i, (input, output)) in cases.iter().enumerate() {
        let id = i as u64 + 1;
        let input_path = dir.join(format!("input{}.txt", id));
        let expected_path = dir.join(format!("output{}.txt", id));
        fs::write(&input_path, input).map_err(io_err(&input_path))?;
        fs::write(&expected_path, output).map_err(io_err(&expected_path))?;
        written.push(TestCase {
            id,
            input_path,
            expected_path,
        });
    }
    Ok(written)
}

/// Lowercases a problem title and joins words with hyphens.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().map(str::to_lowercase).join("-")
}

fn parse_array(literal: &str) -> Result<Value, CaseError> {
    serde_json::from_str(literal).map_err(|source| CaseError::Json {
        literal: literal.to_string(),
        source,
    })
}

/// Lengths along the first element at each nesting level. An empty top-level
/// array has the single dimension 0.
fn dimensions(value: &Value) -> Vec<usize> {
    let mut dims = vec![];
    let mut cur = value;
    while let Value::Array(items) = cur {
        dims.push(items.len());
        match items.first() {
            Some(first) => cur = first,
            None => break,
        }
    }
    dims
}

fn flatten(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| flatten(v, out)),
        Value::String(s) => out.push(s.clone()),
        other => out.push(other.to_string()),
    }
}

/// Converts the right-hand sides of `name = value` assignments into stdin
/// tokens.
///
/// Arrays become their dimensions followed by their flattened elements, quoted
/// strings lose their quotes, and other scalars are kept verbatim.
///
/// ```
/// use doubled::cases::convert_input;
/// assert_eq!(convert_input("changed = [1,3,4,2,6,8]").unwrap(), "6 1 3 4 2 6 8");
/// ```
pub fn convert_input(example: &str) -> Result<String, CaseError> {
    let mut parts = vec![];
    let mut rest = example;
    while let Some(eq) = rest.find('=') {
        let value = rest[eq + 1..].trim_start();
        if value.starts_with('[') {
            let mut depth = 0usize;
            let mut end = None;
            for (i, c) in value.char_indices() {
                match c {
                    '[' => depth += 1,
                    ']' => {
                        depth -= 1;
                        if depth == 0 {
                            end = Some(i + 1);
                            break;
                        }
                    }
                    _ => {}
                }
            }
            let end = end.ok_or_else(|| CaseError::Unbalanced(value.to_string()))?;
            let array = parse_array(&value[..end])?;
            let mut tokens = dimensions(&array).iter().map(|d| d.to_string()).collect_vec();
            flatten(&array, &mut tokens);
            parts.push(tokens.join(" "));
            rest = &value[end..];
        } else if let Some(quoted) = value.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            parts.push(quoted[..end].to_string());
            rest = quoted.get(end + 1..).unwrap_or("");
        } else {
            let end = value.find(',').unwrap_or(value.len());
            parts.push(value[..end].trim().to_string());
            rest = &value[end..];
        }
    }
    Ok(parts.join(" "))
}

/// Converts an example's expected output into the stdout a solution prints.
///
/// ```
/// use doubled::cases::convert_output;
/// assert_eq!(convert_output("[1,3,4]").unwrap(), "1 3 4");
/// assert_eq!(convert_output("[]").unwrap(), "");
/// ```
pub fn convert_output(example: &str) -> Result<String, CaseError> {
    let example = example.trim();
    if example.starts_with('[') {
        let array = parse_array(example)?;
        let rows = match &array {
            Value::Array(items) if dimensions(&array).len() > 1 => items.clone(),
            _ => vec![array.clone()],
        };
        Ok(rows
            .iter()
            .map(|row| {
                let mut tokens = vec![];
                flatten(row, &mut tokens);
                tokens.join(" ")
            })
            .join("\n"))
    } else if let Some(quoted) = example.strip_prefix('"') {
        Ok(quoted.strip_suffix('"').unwrap_or(quoted).to_string())
    } else {
        Ok(example.to_string())
    }
}

/// Extracts `Input:` / `Output:` pairs from example text.
///
/// `Explanation:` lines and anything else between the pairs are ignored.
pub fn parse_examples(text: &str) -> Result<Vec<(String, String)>, CaseError> {
    let mut cases = vec![];
    let mut pending: Option<(usize, String)> = None;
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if let Some(input) = line.strip_prefix("Input:") {
            if let Some((prev, _)) = pending {
                return Err(CaseError::MissingOutput { line: prev });
            }
            pending = Some((line_no, convert_input(input.trim())?));
        } else if let Some(output) = line.strip_prefix("Output:") {
            let (_, input) = pending
                .take()
                .ok_or(CaseError::DanglingOutput { line: line_no })?;
            cases.push((input, convert_output(output)?));
        }
    }
    if let Some((line, _)) = pending {
        return Err(CaseError::MissingOutput { line });
    }
    Ok(cases)
}

/// A bundled scenario with a known answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub name: &'static str,
    pub changed: &'static [i64],
    /// `None` when no original array exists.
    pub original: Option<&'static [i64]>,
}

impl Sample {
    pub fn input(&self) -> String {
        format!("{}\n{}\n", self.changed.len(), self.changed.iter().join(" "))
    }
    pub fn expected(&self) -> String {
        format!("{}\n", self.original.unwrap_or(&[]).iter().join(" "))
    }
}

const SAMPLES_DATA: &[Sample] = &[
    Sample {
        name: "basic",
        changed: &[1, 3, 4, 2, 6, 8],
        original: Some(&[1, 3, 4]),
    },
    Sample {
        name: "unpaired",
        changed: &[1, 2, 3, 4],
        original: None,
    },
    Sample {
        name: "odd",
        changed: &[5],
        original: None,
    },
    Sample {
        name: "zeros",
        changed: &[0, 0],
        original: Some(&[0]),
    },
    Sample {
        name: "empty",
        changed: &[],
        original: Some(&[]),
    },
];

pub fn samples() -> &'static [Sample] {
    SAMPLES_DATA
}

static SAMPLE_MAP: Lazy<HashMap<&'static str, &'static Sample>> =
    Lazy::new(|| SAMPLES_DATA.iter().map(|s| (s.name, s)).collect());

pub fn get_sample(name: &str) -> Option<&'static Sample> {
    SAMPLE_MAP.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_changed;
    use crate::reconstruct::reconstruct;

    #[test]
    fn converts_assignments_to_tokens() {
        assert_eq!(
            convert_input("changed = [1,3,4,2,6,8]").unwrap(),
            "6 1 3 4 2 6 8"
        );
        assert_eq!(
            convert_input("grid = [[1,2],[3,4],[5,6]], k = 3").unwrap(),
            "3 2 1 2 3 4 5 6 3"
        );
        assert_eq!(convert_input("s = \"abc\", n = 7").unwrap(), "abc 7");
        assert_eq!(convert_input("changed = []").unwrap(), "0");
        assert!(matches!(
            convert_input("changed = [1,2"),
            Err(CaseError::Unbalanced(_))
        ));
    }

    #[test]
    fn converts_outputs() {
        assert_eq!(convert_output("[1,3,4]").unwrap(), "1 3 4");
        assert_eq!(convert_output("[[1,2],[3,4]]").unwrap(), "1 2\n3 4");
        assert_eq!(convert_output("\"yes\"").unwrap(), "yes");
        assert_eq!(convert_output(" 42 ").unwrap(), "42");
    }

    #[test]
    fn parses_statement_examples() {
        let text = "\
Example 1:
Input: changed = [1,3,4,2,6,8]
Output: [1,3,4]
Explanation: One possible original array could be [1,3,4].

Input: changed = [6,3,0,1]
Output: []
";
        let cases = parse_examples(text).unwrap();
        assert_eq!(
            cases,
            vec![
                ("6 1 3 4 2 6 8".to_string(), "1 3 4".to_string()),
                ("4 6 3 0 1".to_string(), "".to_string()),
            ]
        );
        assert!(matches!(
            parse_examples("Output: [1]"),
            Err(CaseError::DanglingOutput { line: 1 })
        ));
        assert!(matches!(
            parse_examples("Input: x = 1\n"),
            Err(CaseError::MissingOutput { line: 1 })
        ));
    }

    #[test]
    fn normalizes_problem_names() {
        assert_eq!(
            normalize_name("Find Original Array  From Doubled Array"),
            "find-original-array-from-doubled-array"
        );
    }

    #[test]
    fn writes_and_discovers_cases_in_id_order() {
        let dir = tempfile::tempdir().unwrap();
        let pairs: Vec<(String, String)> = (0..11)
            .map(|i| (format!("2 {} {}", i, 2 * i), i.to_string()))
            .collect();
        write_cases(dir.path(), &pairs).unwrap();
        fs::write(dir.path().join("ip20.txt"), "0").unwrap();
        fs::write(dir.path().join("op20.txt"), "").unwrap();
        fs::write(dir.path().join("input99.txt"), "0").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let cases = discover(dir.path()).unwrap();
        let ids = cases.iter().map(|c| c.id).collect_vec();
        assert_eq!(ids, (1..=11).chain([20]).collect_vec());
        assert_eq!(cases[9].read_input().unwrap(), "2 9 18");
        assert_eq!(cases[9].read_expected().unwrap(), "9");
    }

    #[test]
    fn zero_padded_ids_pair_with_matching_digits() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("input01.txt"), "2 1 2").unwrap();
        fs::write(dir.path().join("output01.txt"), "1").unwrap();
        fs::write(dir.path().join("input002.txt"), "0").unwrap();
        fs::write(dir.path().join("output2.txt"), "").unwrap();
        fs::write(dir.path().join("ip10.txt"), "2 0 0").unwrap();
        fs::write(dir.path().join("op10.txt"), "0").unwrap();

        let cases = discover(dir.path()).unwrap();
        assert_eq!(cases.iter().map(|c| c.id).collect_vec(), vec![1, 10]);
        assert_eq!(cases[0].expected_path, dir.path().join("output01.txt"));
        assert_eq!(cases[0].read_expected().unwrap(), "1");
        assert_eq!(cases[1].expected_path, dir.path().join("op10.txt"));
    }

    #[test]
    fn samples_agree_with_reconstruction() {
        assert_eq!(samples().len(), 5);
        for sample in samples() {
            let changed = parse_changed(&sample.input()).unwrap();
            let got = reconstruct(&changed);
            assert_eq!(got, sample.original.unwrap_or(&[]), "{}", sample.name);
            assert_eq!(
                format!("{}\n", got.iter().join(" ")),
                sample.expected()
            );
        }
        assert_eq!(get_sample("zeros").unwrap().original, Some(&[0][..]));
        assert!(get_sample("unknown").is_none());
    }
}
