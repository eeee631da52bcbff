use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use ngram_bigrams_core::{read_artifact, split_key};

#[derive(Parser)]
#[command(name = "inspect_bigrams", about = "Show the top entries of a bigrams.json artifact")]
struct Args {
    /// Artifact written by extract_bigrams
    #[arg(long, default_value = "bigrams.json")]
    path: PathBuf,

    /// Number of entries to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Only show pairs whose first word is this (case-insensitive)
    #[arg(long)]
    word: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    bigram_tools::init_tracing();

    let ranked = read_artifact(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    println!("{}: {} bigrams", args.path.display(), ranked.len());

    let first = args.word.as_deref().map(str::to_lowercase);
    let shown = ranked
        .iter()
        .filter(|(key, _)| match (&first, split_key(key)) {
            (Some(want), Some((w1, _))) => w1 == want.as_str(),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .take(args.top);

    for (rank, (key, count)) in shown.enumerate() {
        println!("{:>6}  {:<40} {}", rank + 1, key, count);
    }

    Ok(())
}
