use anyhow::Context;
use clap::Parser;
use doubled::cases::{normalize_name, parse_examples, write_cases};
use std::io::Read;
use std::path::PathBuf;

/// Converts problem-statement examples (`Input: ...` / `Output: ...` lines)
/// into a case folder under `<root>/<problem-name>`.
#[derive(Parser, Debug)]
struct Cli {
    /// Problem title; normalized to lowercase-hyphenated form for the folder name
    name: String,
    /// File with the example text (stdin when omitted)
    #[clap(long, short = 'f')]
    file: Option<PathBuf>,
    /// Folder that holds one sub-folder per problem
    #[clap(long, short = 'r', default_value = "TestData")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let pairs = parse_examples(&text).context("Failed to parse examples")?;
    if pairs.is_empty() {
        anyhow::bail!("No Input:/Output: pairs found");
    }
    let dir = cli.root.join(normalize_name(&cli.name));
    let written = write_cases(&dir, &pairs)?;
    for case in &written {
        eprintln!("{}", case.input_path.display());
    }
    eprintln!("wrote {} cases to {}", written.len(), dir.display());
    Ok(())
}
