//! Error taxonomy for the extraction pipeline.
//!
//! Only a few variants abort a run (see [`BigramError::is_fatal`]). Per-file
//! failures are caught at the worker boundary, reported, and the file is left
//! out of the aggregate. Malformed individual records are never errors; the
//! record parser skips them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BigramError {
    /// Vocabulary source or run configuration is unusable.
    #[error("configuration error ({}): {reason}", path.display())]
    Configuration { path: PathBuf, reason: String },

    /// A setting the driver cannot run with, checked before any file is read.
    #[error("invalid configuration: {0}")]
    InvalidSetting(String),

    /// The input folder could not be listed.
    #[error("cannot list input folder {}: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The gzip stream is truncated or otherwise damaged.
    #[error("corrupted: {} ({reason})", path.display())]
    CorruptedInput { path: PathBuf, reason: String },

    /// Open/read failure unrelated to decompression.
    #[error("i/o error reading {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record is not valid UTF-8.
    #[error("decode error in {} at line {line}: {reason}", path.display())]
    Decode {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("cannot start worker pool: {0}")]
    WorkerPool(String),

    /// The result artifact could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BigramError {
    /// True for errors that abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BigramError::Configuration { .. }
                | BigramError::InvalidSetting(_)
                | BigramError::InputDirectory { .. }
                | BigramError::WorkerPool(_)
                | BigramError::Output { .. }
        )
    }

    /// The input file a per-file error refers to, if any.
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            BigramError::CorruptedInput { path, .. }
            | BigramError::FileIo { path, .. }
            | BigramError::Decode { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }

    pub(crate) fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BigramError::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BigramError>;
