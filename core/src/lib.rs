//! ngram-bigrams-core
//!
//! Extracts vocabulary-filtered word bigrams from Google Books style 2-gram
//! shards (gzip-compressed TSV) and ranks them by total frequency.
//!
//! Public API:
//! - `Vocabulary` - admissible second-word set loaded from a JSON table
//! - `RecordParser` - normalization and admissibility rules for one record
//! - `FileWorker` - per-file counting over a gzip stream
//! - `Aggregator` - merge of per-file counts and final ranking
//! - `Pipeline` - discovery, bounded worker pool, collection, emission
//! - `ExtractConfig` - run configuration (TOML)
//! - `BigramError` - error taxonomy

pub mod error;
pub use error::{BigramError, Result};

pub mod config;
pub use config::ExtractConfig;

pub mod vocabulary;
pub use vocabulary::Vocabulary;

pub mod record;
pub use record::{bigram_key, split_key, ParsedBigram, RecordParser};

pub mod worker;
pub use worker::{FileOutcome, FileWorker};

pub mod aggregate;
pub use aggregate::{finalize, merge, Aggregator, CountMap};

pub mod artifact;
pub use artifact::{read_artifact, write_artifact, RankedMap};

pub mod pipeline;
pub use pipeline::{Pipeline, PipelineEvent, RunSummary};
