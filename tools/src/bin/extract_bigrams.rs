// tools/src/bin/extract_bigrams.rs
//
// Extract vocabulary-filtered bigrams from a folder of gzip-compressed
// Google Books 2-gram shards and write them, ranked, to bigrams.json.
//
// Usage:
//   extract_bigrams <input_folder>
//
// Settings (vocabulary path, output path, worker count, noise threshold) come
// from the TOML file named by BIGRAMS_CONFIG, or the defaults:
//   vocabulary_path = "data.json"
//   output_path = "bigrams.json"
//   workers = 12
//   noise_threshold = 2

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use bigram_tools::{init_tracing, progress_lines};
use ngram_bigrams_core::{ExtractConfig, Pipeline};

const CONFIG_ENV: &str = "BIGRAMS_CONFIG";

#[derive(Parser)]
#[command(name = "extract_bigrams", about = "Extract ranked bigrams from gzip n-gram shards")]
struct Args {
    /// Folder whose entries are all gzip-compressed TSV shards
    input_folder: PathBuf,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{}", e.to_string().trim_end());
            std::process::exit(1);
        }
    };

    init_tracing();

    let config = match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        Some(path) => {
            let config = ExtractConfig::load_toml(&path)
                .with_context(|| format!("loading {} from {}", CONFIG_ENV, path.display()))?;
            info!(path = %path.display(), workers = config.workers, "configuration loaded");
            config
        }
        None => ExtractConfig::default(),
    };

    let pipeline = Pipeline::new(config);
    pipeline
        .run_with(&args.input_folder, |event| {
            for line in progress_lines(event) {
                println!("{line}");
            }
        })
        .with_context(|| format!("extracting bigrams from {}", args.input_folder.display()))?;

    Ok(())
}
