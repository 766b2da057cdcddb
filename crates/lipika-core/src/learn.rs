//! Incremental learning from bulk text imports.
//!
//! Input is streamed in large chunks so arbitrarily big corpora never
//! need to fit in memory. Each chunk is cut at a whitespace boundary,
//! its Devanagari runs are validated on a small thread pool, and the
//! surviving words land in the store under a single transaction per
//! chunk. A shared cancellation flag is polled between and inside
//! chunks; cancelling keeps everything committed so far.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::{debug, debug_span, warn};

use crate::store::{StoreError, WordStore};
use crate::unicode::{is_devanagari, is_valid_word};

/// Default chunk size for bulk imports.
pub const DEFAULT_CHUNK_SIZE: usize = 15 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum LearnError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of one learning run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LearnSummary {
    /// Chunks fully processed; a chunk interrupted by cancellation is
    /// not counted.
    pub chunks: usize,
    /// Devanagari runs extracted, before validation.
    pub candidates: usize,
    /// Words that passed validation and were added.
    pub learned: usize,
    /// Whether the run stopped early on the cancellation flag.
    pub cancelled: bool,
}

/// Learn every valid Devanagari word in a text file.
pub fn learn_from_file(
    store: &mut WordStore,
    path: &Path,
    chunk_size: usize,
    cancel: &AtomicBool,
) -> Result<LearnSummary, LearnError> {
    let file = File::open(path).map_err(|source| LearnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    learn_from_reader(store, reader, chunk_size, cancel).map_err(|e| match e {
        LearnError::Io { source, .. } => LearnError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Learn from any reader, cutting the stream into `chunk_size`-byte
/// chunks snapped to UTF-8 and whitespace boundaries.
pub fn learn_from_reader<R: Read>(
    store: &mut WordStore,
    mut reader: R,
    chunk_size: usize,
    cancel: &AtomicBool,
) -> Result<LearnSummary, LearnError> {
    let span = debug_span!("learn", chunk_size);
    let _enter = span.enter();

    let chunk_size = chunk_size.max(8);
    let mut summary = LearnSummary::default();
    // Bytes of an incomplete UTF-8 sequence at a chunk edge.
    let mut byte_carry: Vec<u8> = Vec::new();
    // Text after the last whitespace of the previous chunk; a word must
    // never be split by a chunk boundary.
    let mut text_carry = String::new();

    loop {
        if cancel.load(Ordering::Relaxed) {
            summary.cancelled = true;
            break;
        }

        let mut buf = std::mem::take(&mut byte_carry);
        let start = buf.len();
        buf.resize(start + chunk_size, 0);
        let mut filled = start;
        loop {
            let n = reader
                .read(&mut buf[filled..])
                .map_err(|source| LearnError::Io {
                    path: PathBuf::from("<reader>"),
                    source,
                })?;
            if n == 0 {
                break;
            }
            filled += n;
            if filled == buf.len() {
                break;
            }
        }
        buf.truncate(filled);
        let at_eof = filled < start + chunk_size;

        if buf.is_empty() {
            if !text_carry.is_empty() {
                process_chunk(store, &text_carry, cancel, &mut summary)?;
                text_carry.clear();
            }
            break;
        }

        let (text, carry, skipped) = decode_chunk(&buf);
        byte_carry = carry;
        if skipped > 0 {
            warn!(bytes = skipped, "skipping invalid utf-8 in input");
        }
        if at_eof && !byte_carry.is_empty() {
            // A sequence still incomplete at end of input never resolves.
            warn!(
                bytes = byte_carry.len(),
                "dropping truncated utf-8 at end of input"
            );
            byte_carry.clear();
        }

        let mut chunk = std::mem::take(&mut text_carry);
        chunk.push_str(&text);

        if !at_eof {
            match chunk.rfind(char::is_whitespace) {
                Some(cut) => {
                    let tail_start = cut + chunk[cut..].chars().next().map_or(1, char::len_utf8);
                    text_carry = chunk.split_off(tail_start);
                }
                // No boundary in sight: the whole chunk may be the front
                // of a word, so hold all of it.
                None => {
                    text_carry = chunk;
                    continue;
                }
            }
        }

        process_chunk(store, &chunk, cancel, &mut summary)?;
        if summary.cancelled {
            break;
        }
        if at_eof {
            if !text_carry.is_empty() {
                let tail = std::mem::take(&mut text_carry);
                process_chunk(store, &tail, cancel, &mut summary)?;
            }
            break;
        }
    }

    debug!(
        chunks = summary.chunks,
        learned = summary.learned,
        cancelled = summary.cancelled,
        "learning finished"
    );
    Ok(summary)
}

fn process_chunk(
    store: &mut WordStore,
    chunk: &str,
    cancel: &AtomicBool,
    summary: &mut LearnSummary,
) -> Result<(), LearnError> {
    let candidates = extract_runs(chunk);
    summary.candidates += candidates.len();
    if candidates.is_empty() {
        summary.chunks += 1;
        return Ok(());
    }

    let words = validate_parallel(&candidates, cancel);
    if cancel.load(Ordering::Relaxed) {
        summary.cancelled = true;
        return Ok(());
    }

    let tx = store.transaction()?;
    for word in &words {
        tx.add_word(word)?;
    }
    tx.commit()?;
    summary.chunks += 1;
    summary.learned += words.len();
    Ok(())
}

/// Decode as much of `buf` as possible. Returns the decoded text, the
/// bytes of a truncated trailing sequence (to prepend to the next
/// read), and the count of invalid bytes skipped. Skipped bytes become
/// spaces so they still separate adjacent words.
fn decode_chunk(buf: &[u8]) -> (String, Vec<u8>, usize) {
    let mut text = String::with_capacity(buf.len());
    let mut rest = buf;
    let mut skipped = 0usize;
    loop {
        match std::str::from_utf8(rest) {
            Ok(tail) => {
                text.push_str(tail);
                return (text, Vec::new(), skipped);
            }
            Err(e) => {
                let valid = e.valid_up_to();
                text.push_str(&String::from_utf8_lossy(&rest[..valid]));
                match e.error_len() {
                    Some(len) => {
                        skipped += len;
                        text.push(' ');
                        rest = &rest[valid + len..];
                    }
                    None => return (text, rest[valid..].to_vec(), skipped),
                }
            }
        }
    }
}

/// Maximal runs of Devanagari codepoints; everything else is a separator.
fn extract_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if is_devanagari(c) {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            runs.push(&text[s..i]);
        }
    }
    if let Some(s) = start {
        runs.push(&text[s..]);
    }
    runs
}

/// Validate candidates across the available cores, preserving input
/// order within each slice. Returns accepted words.
fn validate_parallel(candidates: &[&str], cancel: &AtomicBool) -> Vec<String> {
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(candidates.len().max(1));
    let slice_len = candidates.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .chunks(slice_len)
            .map(|slice| {
                scope.spawn(move || {
                    let mut accepted = Vec::new();
                    for candidate in slice {
                        if cancel.load(Ordering::Relaxed) {
                            break;
                        }
                        if is_valid_word(candidate) {
                            accepted.push(candidate.to_string());
                        }
                    }
                    accepted
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_default())
            .collect()
    })
}
