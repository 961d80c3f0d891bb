use anyhow::Context;
use clap::Parser;
use doubled::io::{format_original, parse_changed};
use doubled::reconstruct::find_original;
use std::io::{Read, Write};

/// Reads `n` followed by `n` integers and prints an original array whose
/// values and their doubles make up the input, or an empty line if none exists.
#[derive(Parser, Debug)]
struct Cli {
    /// Explain on stderr why no original array exists
    #[clap(long, short = 'e', default_value_t = false)]
    explain: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    let changed = parse_changed(&input).context("Malformed input")?;

    let original = match find_original(&changed) {
        Ok(original) => original,
        Err(e) => {
            if cli.explain {
                eprintln!("{}", e);
            }
            vec![]
        }
    };
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", format_original(&original))?;
    Ok(())
}
