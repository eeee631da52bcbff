//! Result artifact: the ranked global mapping as a flat JSON object.
//!
//! Keys appear in rank order (highest frequency first). Non-ASCII text is
//! written as UTF-8, not escaped.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::aggregate::sort_ranked;
use crate::error::{BigramError, Result};

/// Borrowed view that serializes `(key, count)` pairs as an ordered JSON object.
pub struct RankedMap<'a>(pub &'a [(String, u64)]);

impl Serialize for RankedMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Write the ranked pairs to `path`, replacing any previous artifact only once
/// the new one is complete.
pub fn write_artifact(path: &Path, ranked: &[(String, u64)]) -> Result<()> {
    let output_err = |source: io::Error| BigramError::Output {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(output_err)?;

    let temp = NamedTempFile::new_in(parent).map_err(output_err)?;
    {
        let mut writer = BufWriter::new(&temp);
        serde_json::to_writer_pretty(&mut writer, &RankedMap(ranked))
            .map_err(|e| output_err(io::Error::from(e)))?;
        writer.write_all(b"\n").map_err(output_err)?;
        writer.flush().map_err(output_err)?;
    }
    temp.persist(path).map_err(|e| output_err(e.error))?;
    Ok(())
}

/// Load an artifact back in rank order (ties broken by key).
pub fn read_artifact(path: &Path) -> Result<Vec<(String, u64)>> {
    let file = File::open(path).map_err(|source| BigramError::FileIo {
        path: path.to_path_buf(),
        source,
    })?;
    let counts: HashMap<String, u64> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| BigramError::Decode {
            path: path.to_path_buf(),
            line: e.line() as u64,
            reason: e.to_string(),
        })?;

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    sort_ranked(&mut ranked);
    Ok(ranked)
}
