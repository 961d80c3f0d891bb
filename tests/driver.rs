#![cfg(unix)]

use doubled::runner::run_case;
use std::time::Duration;

const RECONSTRUCT: &str = env!("CARGO_BIN_EXE_reconstruct");
const TESTER: &str = env!("CARGO_BIN_EXE_tester");

fn run(cmd: &str, input: &str) -> (String, Option<i32>) {
    let exec = run_case(cmd, input, Duration::from_secs(30)).unwrap();
    let status = exec.status.expect("driver timed out");
    (exec.stdout, status.code())
}

#[test]
fn prints_the_original_array() {
    assert_eq!(
        run(RECONSTRUCT, "6\n1 3 4 2 6 8\n"),
        ("1 3 4\n".to_string(), Some(0))
    );
    assert_eq!(run(RECONSTRUCT, "2\n0 0\n"), ("0\n".to_string(), Some(0)));
}

#[test]
fn prints_an_empty_line_when_impossible() {
    for input in ["4\n1 2 3 4\n", "1\n5\n", "0\n"] {
        assert_eq!(
            run(RECONSTRUCT, input),
            ("\n".to_string(), Some(0)),
            "{:?}",
            input
        );
    }
}

#[test]
fn explain_keeps_stdout_unchanged() {
    let exec = run_case(
        &format!("{} --explain", RECONSTRUCT),
        "1\n5\n",
        Duration::from_secs(30),
    )
    .unwrap();
    assert_eq!(exec.stdout, "\n");
    assert!(exec.stderr.contains("odd number of values"), "{}", exec.stderr);
    assert!(exec.status.unwrap().success());
}

#[test]
fn malformed_input_exits_non_zero_without_output() {
    for input in ["2 x 1", "4 1 2", ""] {
        let (stdout, code) = run(RECONSTRUCT, input);
        assert_eq!(stdout, "", "{:?}", input);
        assert_ne!(code, Some(0), "{:?}", input);
    }
}

#[test]
fn tester_passes_the_driver_on_bundled_samples() {
    let exec = run_case(
        &format!("{} --samples {}", TESTER, RECONSTRUCT),
        "",
        Duration::from_secs(60),
    )
    .unwrap();
    assert!(exec.status.unwrap().success(), "{}", exec.stderr);
    assert!(exec.stderr.contains("!log status AC"), "{}", exec.stderr);
    assert!(exec.stderr.contains("!log score 5"), "{}", exec.stderr);
}
