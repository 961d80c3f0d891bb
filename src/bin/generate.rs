use anyhow::{Context, bail};
use clap::Parser;
use doubled::casegen;
use doubled::cases::write_cases;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Parser)]
struct Cli {
    /// Length of the original array (the input holds twice as many values)
    #[clap(long, short = 'n', default_value = "10")]
    len: usize,
    /// Largest original value
    #[clap(long, short = 'm', default_value = "100")]
    max: i64,
    #[clap(long, short = 's')]
    seed: Option<u64>,
    /// Make the instance unsolvable
    #[clap(long, short = 'i', default_value_t = false)]
    impossible: bool,
    /// Print the instance and its answer as JSON instead of stdin format
    #[clap(long, short = 'j', default_value_t = false)]
    json: bool,
    /// Write `count` cases to this folder instead of printing one
    #[clap(long, short = 'o')]
    out_dir: Option<PathBuf>,
    #[clap(long, short = 'c', default_value = "1")]
    count: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    if args.max < 0 {
        bail!("--max must be non-negative: {}", args.max);
    }
    // Doubles of values above this overflow.
    if args.max > i64::MAX / 4 {
        bail!("--max is too large: {}", args.max);
    }
    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    if let Some(dir) = &args.out_dir {
        let pairs: Vec<(String, String)> = (0..args.count)
            .map(|_| {
                let inst = casegen::random::generate(args.len, args.max, args.impossible, &mut rng);
                (inst.input(), inst.expected())
            })
            .collect();
        let written = write_cases(dir, &pairs)
            .with_context(|| format!("Failed to write cases to {}", dir.display()))?;
        eprintln!("wrote {} cases to {}", written.len(), dir.display());
        return Ok(());
    }

    let inst = casegen::random::generate(args.len, args.max, args.impossible, &mut rng);
    if args.json {
        println!("{}", serde_json::to_string(&inst)?);
    } else {
        print!("{}", inst.input());
    }
    Ok(())
}
