use anyhow::{Context, bail};
use clap::Parser;
use doubled::cases::{discover, get_sample, samples, write_cases};
use doubled::judge::get_judge;
use doubled::runner::run_cases;
use std::path::PathBuf;
use std::time::Duration;

/// Runs a solution command on every case of a folder and compares its output.
#[derive(Parser, Debug)]
struct Cli {
    /// The shell command to run (e.g., the solution binary)
    cmd: String,
    /// Folder with input<K>.txt / output<K>.txt pairs
    #[clap(required_unless_present = "samples")]
    dir: Option<PathBuf>,
    /// Run the bundled samples instead of a folder
    #[clap(long, default_value_t = false)]
    samples: bool,
    /// Restrict --samples to a comma-separated list of names
    #[clap(long, requires = "samples", value_delimiter = ',')]
    only: Vec<String>,
    /// How answers are compared: `exact` or `witness`
    #[clap(long, short = 'j', default_value = "exact")]
    judge: String,
    /// Time limit per case in seconds
    #[clap(long, short = 't', default_value_t = 2.0)]
    timeout: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(judge) = get_judge(&cli.judge) else {
        bail!("Unknown judge: {}", cli.judge);
    };
    if cli.timeout.is_nan() || cli.timeout <= 0.0 {
        bail!("--timeout must be positive: {}", cli.timeout);
    }

    // Bundled samples are written to a temporary folder and run like any other.
    let mut _tmp: Option<tempfile::TempDir> = None;
    let cases = match (cli.samples, &cli.dir) {
        (true, _) => {
            let selected = if cli.only.is_empty() {
                samples().to_vec()
            } else {
                cli.only
                    .iter()
                    .map(|name| {
                        get_sample(name.trim())
                            .copied()
                            .with_context(|| format!("Unknown sample: {}", name))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?
            };
            let tmp = tempfile::tempdir()?;
            let pairs: Vec<_> = selected.iter().map(|s| (s.input(), s.expected())).collect();
            let cases = write_cases(tmp.path(), &pairs)?;
            _tmp = Some(tmp);
            cases
        }
        (false, Some(dir)) => {
            discover(dir).with_context(|| format!("Failed to read cases from {}", dir.display()))?
        }
        (false, None) => bail!("No case folder given"),
    };
    if cases.is_empty() {
        bail!("No test cases found");
    }

    let report = run_cases(
        &cli.cmd,
        &cases,
        judge.as_ref(),
        Duration::from_secs_f64(cli.timeout),
        true,
    )?;
    eprint!("{}", report.render());
    for r in &report.results {
        eprintln!("!log case {} {}", r.id, r.status.code());
    }
    let total: f64 = report.results.iter().map(|r| r.elapsed.as_secs_f64()).sum();
    eprintln!("!log time {:.3}", total);
    eprintln!("!log score {}", report.passed());
    if report.all_passed() {
        eprintln!("!log status AC");
        eprintln!("All test cases passed!");
    } else {
        eprintln!("!log status WA");
        eprintln!("Some test cases failed.");
        drop(_tmp);
        std::process::exit(1);
    }
    Ok(())
}
