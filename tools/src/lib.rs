//! Shared plumbing for the bigram command-line tools.

use ngram_bigrams_core::PipelineEvent;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Human-readable progress line(s) for one pipeline event.
pub fn progress_lines(event: &PipelineEvent<'_>) -> Vec<String> {
    match event {
        PipelineEvent::Discovered { total } => vec![format!("Found {total} files to process")],
        PipelineEvent::VocabularyLoaded { words } => {
            vec![format!("Loaded {words} vocabulary words")]
        }
        PipelineEvent::FileFinished {
            path,
            completed,
            total,
            pairs,
        } => vec![format!(
            "[{completed}/{total}] {} ({pairs} pairs)",
            display_name(path)
        )],
        PipelineEvent::FileFailed {
            path,
            completed,
            total,
            error,
        } => vec![format!(
            "[{completed}/{total}] Error in {}: {error}",
            display_name(path)
        )],
        PipelineEvent::Finished {
            unique_bigrams,
            succeeded,
            failed,
        } => {
            let mut lines = vec![format!("Processed {succeeded} files, {failed} failed")];
            lines.push(format!("Found {unique_bigrams} unique bigrams"));
            lines
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
