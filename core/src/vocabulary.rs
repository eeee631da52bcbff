// core/src/vocabulary.rs
//
// Admissible second-word set, loaded once from a word -> frequency JSON table.
// Only the keys are kept; the frequencies are ignored.

use ahash::AHashSet;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BigramError, Result};

/// Immutable set of lower-cased words.
///
/// Built before any worker starts and shared read-only afterwards
/// (workers hold it behind an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: AHashSet<String>,
}

impl Vocabulary {
    /// Load the key set of a JSON object file.
    ///
    /// Fails with [`BigramError::Configuration`] if the file is missing,
    /// unreadable, not JSON, or JSON of any shape other than an object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BigramError::configuration(path, e.to_string()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BigramError::configuration(path, e.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self::from_words(map.keys())),
            other => Err(BigramError::configuration(
                path,
                format!("expected a JSON object of word frequencies, found {}", json_kind(&other)),
            )),
        }
    }

    /// Build a vocabulary from arbitrary words; each is lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Exact membership test. Callers lower-case the query themselves.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
