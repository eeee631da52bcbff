// core/src/pipeline.rs
//
// Pipeline driver: discover -> load vocabulary -> dispatch -> collect -> emit.
//
// Files are submitted to a fixed-size rayon pool in sorted order. Results come
// back over a channel in completion order and are merged on the calling thread,
// which is the only owner of the global mapping. Completion order is used for
// progress numbering only; totals do not depend on it.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::aggregate::Aggregator;
use crate::artifact::write_artifact;
use crate::config::ExtractConfig;
use crate::error::{BigramError, Result};
use crate::vocabulary::Vocabulary;
use crate::worker::{FileOutcome, FileWorker};

/// Progress notifications passed to the observer of [`Pipeline::run_with`].
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    Discovered {
        total: usize,
    },
    VocabularyLoaded {
        words: usize,
    },
    FileFinished {
        path: &'a Path,
        completed: usize,
        total: usize,
        pairs: usize,
    },
    FileFailed {
        path: &'a Path,
        completed: usize,
        total: usize,
        error: &'a BigramError,
    },
    Finished {
        unique_bigrams: usize,
        succeeded: usize,
        failed: usize,
    },
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub files_total: usize,
    pub files_succeeded: usize,
    /// Files left out of the aggregate, with the reason.
    pub failures: Vec<(PathBuf, BigramError)>,
    pub unique_bigrams: usize,
    pub output_path: PathBuf,
}

pub struct Pipeline {
    config: ExtractConfig,
}

impl Pipeline {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Every entry directly under `input_dir`, as absolute paths in
    /// lexicographic order. No extension filtering is done.
    pub fn discover(input_dir: &Path) -> Result<Vec<PathBuf>> {
        let dir_err = |source: std::io::Error| BigramError::InputDirectory {
            path: input_dir.to_path_buf(),
            source,
        };

        let root = std::fs::canonicalize(input_dir).map_err(dir_err)?;
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&root).map_err(dir_err)? {
            names.push(entry.map_err(dir_err)?.file_name());
        }
        names.sort();

        Ok(names.into_iter().map(|name| root.join(name)).collect())
    }

    /// Run without progress reporting.
    pub fn run(&self, input_dir: &Path) -> Result<RunSummary> {
        self.run_with(input_dir, |_| {})
    }

    /// Run the whole pipeline, reporting progress to `observe`.
    ///
    /// Only configuration, input-folder, pool, and output failures are
    /// returned as errors. A file that fails is reported and skipped.
    pub fn run_with<F>(&self, input_dir: &Path, mut observe: F) -> Result<RunSummary>
    where
        F: FnMut(&PipelineEvent<'_>),
    {
        self.config.validate()?;

        let files = Self::discover(input_dir)?;
        let total = files.len();
        observe(&PipelineEvent::Discovered { total });

        let vocabulary = Vocabulary::load(&self.config.vocabulary_path)?;
        info!(
            path = %self.config.vocabulary_path.display(),
            words = vocabulary.len(),
            "vocabulary loaded"
        );
        observe(&PipelineEvent::VocabularyLoaded {
            words: vocabulary.len(),
        });

        let worker = FileWorker::new(Arc::new(vocabulary), self.config.noise_threshold);
        let (aggregator, failures) = self.collect(files, worker, &mut observe)?;

        let succeeded = aggregator.merged_files();
        if total > 0 && succeeded == 0 {
            warn!(
                files = total,
                "no input file was processed successfully; writing an empty result"
            );
        }

        let unique_bigrams = aggregator.unique_bigrams();
        let ranked = aggregator.finalize();
        write_artifact(&self.config.output_path, &ranked)?;
        info!(
            path = %self.config.output_path.display(),
            unique_bigrams,
            "result written"
        );

        observe(&PipelineEvent::Finished {
            unique_bigrams,
            succeeded,
            failed: failures.len(),
        });

        Ok(RunSummary {
            files_total: total,
            files_succeeded: succeeded,
            failures,
            unique_bigrams,
            output_path: self.config.output_path.clone(),
        })
    }

    /// Dispatch every file to the pool and merge results as they complete.
    fn collect<F>(
        &self,
        files: Vec<PathBuf>,
        worker: FileWorker,
        observe: &mut F,
    ) -> Result<(Aggregator, Vec<(PathBuf, BigramError)>)>
    where
        F: FnMut(&PipelineEvent<'_>),
    {
        let total = files.len();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("bigram-worker-{i}"))
            .build()
            .map_err(|e| BigramError::WorkerPool(e.to_string()))?;

        let (tx, rx) = mpsc::channel::<FileOutcome>();
        for path in files {
            let tx = tx.clone();
            let worker = worker.clone();
            pool.spawn(move || {
                let outcome = worker.process_file(&path);
                // receiver outlives every task
                let _ = tx.send(outcome);
            });
        }
        drop(tx);

        let mut aggregator = Aggregator::new();
        let mut failures = Vec::new();
        let mut completed = 0;

        for FileOutcome { path, result } in rx {
            completed += 1;
            match result {
                Ok(counts) => {
                    observe(&PipelineEvent::FileFinished {
                        path: &path,
                        completed,
                        total,
                        pairs: counts.len(),
                    });
                    aggregator.merge(counts);
                }
                Err(error) => {
                    warn!(file = %path.display(), error = %error, "skipping file");
                    observe(&PipelineEvent::FileFailed {
                        path: &path,
                        completed,
                        total,
                        error: &error,
                    });
                    failures.push((path, error));
                }
            }
        }

        drop(pool);
        Ok((aggregator, failures))
    }
}
