//! Runs a solution command against a folder of cases and judges its output.
//!
//! Each case runs `sh -c <cmd>` with the case input on stdin. Cases run one
//! after another; a case that exceeds the time limit is killed together with
//! any processes it spawned.

use crate::cases::TestCase;
use crate::io::parse_changed;
use crate::judge::{Judge, Verdict};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Raw result of running a command once.
#[derive(Debug)]
pub struct Execution {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed for exceeding the time limit.
    pub status: Option<ExitStatus>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed(String),
    RuntimeError(Option<i32>),
    TimeLimit,
}

impl Status {
    /// Short code used on `!log status` lines.
    pub fn code(&self) -> &'static str {
        match self {
            Status::Passed => "AC",
            Status::Failed(_) => "WA",
            Status::RuntimeError(_) => "RE",
            Status::TimeLimit => "TLE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseResult {
    pub id: u64,
    pub status: Status,
    pub expected: String,
    pub actual: String,
    pub stderr: String,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub results: Vec<CaseResult>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == Status::Passed)
            .count()
    }
    pub fn all_passed(&self) -> bool {
        self.passed() == self.results.len()
    }

    /// Per-case summary, with expected and actual output for failures.
    pub fn render(&self) -> String {
        let mut out = String::from("========== Test Results ==========\n");
        for r in &self.results {
            let label = match &r.status {
                Status::Passed => "Passed".to_string(),
                Status::Failed(reason) => format!("Failed ({})", reason),
                Status::RuntimeError(Some(code)) => format!("Runtime error (exit {})", code),
                Status::RuntimeError(None) => "Runtime error (signal)".to_string(),
                Status::TimeLimit => "Time limit exceeded".to_string(),
            };
            out.push_str(&format!(
                "Test Case {}: {} [{:.3}s]\n",
                r.id,
                label,
                r.elapsed.as_secs_f64()
            ));
            if r.status != Status::Passed {
                out.push_str(&format!("Expected: {}\n", r.expected.trim()));
                out.push_str(&format!("Actual:   {}\n", r.actual.trim()));
            }
        }
        out.push_str(&format!(
            "{} / {} passed\n",
            self.passed(),
            self.results.len()
        ));
        out
    }
}

#[cfg(unix)]
fn kill_child_group(child: &mut Child) {
    // The child leads its own process group; kill the whole group.
    unsafe {
        libc::kill(-(child.id() as i32), libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_child_group(child: &mut Child) {
    let _ = child.kill();
}

fn spawn_sh(cmd: &str) -> Result<Child> {
    let mut command = Command::new("sh");
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        unsafe {
            command.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }
    }
    command
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to execute command: {}", cmd))
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = vec![];
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Waits for a reader thread, giving up after `dur`.
fn join_with_timeout(h: JoinHandle<String>, dur: Duration) -> String {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(h.join().unwrap_or_default());
    });
    rx.recv_timeout(dur).unwrap_or_default()
}

fn supervise(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() > timeout {
            kill_child_group(child);
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Runs `cmd` through `sh -c`, feeding `input` on stdin.
pub fn run_case(cmd: &str, input: &str, timeout: Duration) -> Result<Execution> {
    let start = Instant::now();
    let mut child = spawn_sh(cmd)?;
    let mut stdin = child.stdin.take().context("child missing stdin pipe")?;
    let out_pipe = child.stdout.take().context("child missing stdout pipe")?;
    let err_pipe = child.stderr.take().context("child missing stderr pipe")?;

    let input = input.to_string();
    // Writing on a separate thread avoids a deadlock when the child fills its
    // stdout pipe before reading all of stdin.
    let writer = std::thread::spawn(move || {
        let _ = stdin.write_all(input.as_bytes());
    });
    let out_thread = spawn_reader(out_pipe);
    let err_thread = spawn_reader(err_pipe);

    let status = supervise(&mut child, timeout)?;
    let elapsed = start.elapsed();
    let _ = writer.join();
    let extra = Duration::from_secs(1);
    Ok(Execution {
        stdout: join_with_timeout(out_thread, extra),
        stderr: join_with_timeout(err_thread, extra),
        status,
        elapsed,
    })
}

/// Runs every case in order and judges the output.
pub fn run_cases(
    cmd: &str,
    cases: &[TestCase],
    judge: &dyn Judge,
    timeout: Duration,
    progress: bool,
) -> Result<Report> {
    let pb = if progress {
        let pb = ProgressBar::new(cases.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };
    let mut report = Report::default();
    for case in cases {
        pb.set_message(format!("case {}", case.id));
        let input = case.read_input()?;
        let expected = case.read_expected()?;
        let exec = run_case(cmd, &input, timeout)?;
        let status = match exec.status {
            None => Status::TimeLimit,
            Some(st) if !st.success() => Status::RuntimeError(st.code()),
            Some(_) => match parse_changed(&input) {
                Err(e) => Status::Failed(format!("unreadable case input: {}", e)),
                Ok(changed) => match judge.judge(&changed, &expected, &exec.stdout) {
                    Verdict::Accepted => Status::Passed,
                    Verdict::WrongAnswer(reason) => Status::Failed(reason),
                },
            },
        };
        if !exec.stderr.is_empty() {
            pb.suspend(|| eprintln!("Error in test case {}: {}", case.id, exec.stderr.trim_end()));
        }
        report.results.push(CaseResult {
            id: case.id,
            status,
            expected,
            actual: exec.stdout,
            stderr: exec.stderr,
            elapsed: exec.elapsed,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(report)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cases::write_cases;
    use crate::judge::{ExactJudge, WitnessJudge};

    #[test]
    fn captures_stdout_and_status() {
        let exec = run_case("cat; echo oops >&2", "2\n0 0\n", Duration::from_secs(10)).unwrap();
        assert_eq!(exec.stdout, "2\n0 0\n");
        assert_eq!(exec.stderr.trim(), "oops");
        assert!(exec.status.unwrap().success());
    }

    #[test]
    fn kills_commands_over_the_time_limit() {
        let exec = run_case("sleep 5", "", Duration::from_millis(200)).unwrap();
        assert!(exec.status.is_none());
        assert!(exec.elapsed < Duration::from_secs(4));
    }

    #[test]
    fn classifies_each_case() {
        let dir = tempfile::tempdir().unwrap();
        let cases = write_cases(
            dir.path(),
            &[
                ("2\n1 2\n".to_string(), "1\n".to_string()),
                ("2\n3 6\n".to_string(), "3\n".to_string()),
            ],
        )
        .unwrap();
        // Prints the smaller value of each pair: right for both cases.
        let report = run_cases(
            "awk 'NR == 2 { print $1 }'",
            &cases,
            &WitnessJudge,
            Duration::from_secs(10),
            false,
        )
        .unwrap();
        assert!(report.all_passed(), "{}", report.render());

        let report = run_cases("echo 1", &cases, &ExactJudge, Duration::from_secs(10), false)
            .unwrap();
        assert_eq!(report.passed(), 1);
        assert!(matches!(report.results[1].status, Status::Failed(_)));
        assert!(report.render().contains("Test Case 2: Failed"));

        let report =
            run_cases("exit 3", &cases, &ExactJudge, Duration::from_secs(10), false).unwrap();
        assert_eq!(report.results[0].status, Status::RuntimeError(Some(3)));
        assert_eq!(report.results[0].status.code(), "RE");
    }

    #[test]
    fn malformed_case_input_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let cases = write_cases(dir.path(), &[("3 1 x\n".to_string(), "\n".to_string())]).unwrap();
        let report =
            run_cases("echo", &cases, &WitnessJudge, Duration::from_secs(10), false).unwrap();
        match &report.results[0].status {
            Status::Failed(reason) => assert!(
                reason.starts_with("unreadable case input:"),
                "{}",
                reason
            ),
            other => panic!("unexpected status {:?}", other),
        }
    }
}
