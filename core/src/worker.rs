// core/src/worker.rs
//
// Per-file counting: one gzip-compressed TSV shard in, one partial count map out.
//
// A worker shares nothing mutable with its siblings. The vocabulary is an
// immutable `Arc` handed to every worker before the first record is parsed.

use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::aggregate::CountMap;
use crate::error::{BigramError, Result};
use crate::record::RecordParser;
use crate::vocabulary::Vocabulary;

const READ_BUFFER: usize = 1 << 20;

/// Result of processing one input file.
///
/// On failure the partial map is dropped entirely; a damaged file contributes
/// nothing rather than whatever was read before the damage.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<CountMap>,
}

#[derive(Debug, Clone)]
pub struct FileWorker {
    vocabulary: Arc<Vocabulary>,
    noise_threshold: u64,
}

impl FileWorker {
    pub fn new(vocabulary: Arc<Vocabulary>, noise_threshold: u64) -> Self {
        Self {
            vocabulary,
            noise_threshold,
        }
    }

    /// Count every qualifying record of a gzip-compressed file.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let result = self.count_gzip_file(path);
        match &result {
            Ok(counts) => debug!(file = %path.display(), pairs = counts.len(), "file counted"),
            Err(e) => debug!(file = %path.display(), error = %e, "file failed"),
        }
        FileOutcome {
            path: path.to_path_buf(),
            result,
        }
    }

    fn count_gzip_file(&self, path: &Path) -> Result<CountMap> {
        let file = File::open(path).map_err(|source| BigramError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let members = GzipMembers::new(BufReader::new(file));
        self.count_records(path, BufReader::with_capacity(READ_BUFFER, members))
    }

    /// Count records from an already-decompressed line stream.
    ///
    /// `path` is only used to label errors.
    pub fn count_records<R: BufRead>(&self, path: &Path, mut reader: R) -> Result<CountMap> {
        let parser = RecordParser::new(&self.vocabulary, self.noise_threshold);
        let mut counts = CountMap::new();
        let mut buf = Vec::with_capacity(256);
        let mut line_no: u64 = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| classify_read_error(path, e))?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let line = std::str::from_utf8(&buf).map_err(|e| BigramError::Decode {
                path: path.to_path_buf(),
                line: line_no,
                reason: e.to_string(),
            })?;

            if let Some(bigram) = parser.parse_line(line) {
                let entry = counts.entry(bigram.key).or_insert(0);
                *entry = entry.saturating_add(bigram.frequency);
            }
        }

        Ok(counts)
    }
}

/// Decompressed stream of every gzip member in a file, read one after another.
///
/// A file with no bytes at all is an empty stream. Zero bytes following a
/// complete member are padding and are skipped; anything else after a member
/// must be the start of another member.
struct GzipMembers<R> {
    between: Option<R>,
    member: Option<GzDecoder<R>>,
    finished_one: bool,
}

impl<R: BufRead> GzipMembers<R> {
    fn new(reader: R) -> Self {
        Self {
            between: Some(reader),
            member: None,
            finished_one: false,
        }
    }
}

impl<R: BufRead> Read for GzipMembers<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        loop {
            if let Some(member) = self.member.as_mut() {
                let n = member.read(out)?;
                if n > 0 {
                    return Ok(n);
                }
                self.between = self.member.take().map(GzDecoder::into_inner);
                self.finished_one = true;
                continue;
            }

            let Some(mut reader) = self.between.take() else {
                return Ok(0);
            };
            if self.finished_one {
                skip_zero_padding(&mut reader)?;
            }
            if reader.fill_buf()?.is_empty() {
                return Ok(0);
            }
            self.member = Some(GzDecoder::new(reader));
        }
    }
}

fn skip_zero_padding<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        let zeros = buf.iter().take_while(|&&b| b == 0).count();
        let more = zeros == buf.len();
        reader.consume(zeros);
        if !more {
            return Ok(());
        }
    }
}

/// Decompression failures surface from flate2 as these kinds; anything else
/// is a plain I/O problem.
fn classify_read_error(path: &Path, err: io::Error) -> BigramError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
            BigramError::CorruptedInput {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
        _ => BigramError::FileIo {
            path: path.to_path_buf(),
            source: err,
        },
    }
}
