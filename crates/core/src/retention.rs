//! Stale-file retention policy for the bounded scratch cache.
//!
//! Given a snapshot of candidate files (path + last-modified time) and the
//! current time, decides which files are eligible for deletion. This is pure
//! logic with no filesystem dependencies; the caller owns enumeration and
//! deletion.

use std::path::PathBuf;

use serde::Serialize;

/// Maximum number of files kept in the cache by default.
pub const DEFAULT_MAX_COUNT: usize = 30;

/// Default maximum age before a file goes stale: 30 days.
pub const DEFAULT_MAX_AGE_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Immutable snapshot of one candidate file, taken at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Last-modified time in epoch milliseconds.
    pub modified_ms: i64,
}

/// Thresholds applied by [`select_for_deletion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    /// At most this many files survive, newest first.
    pub max_count: usize,
    /// Files at least this old (in milliseconds) are deleted regardless of count.
    pub max_age_ms: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            max_age_ms: DEFAULT_MAX_AGE_MS,
        }
    }
}

/// Select the subset of `files` eligible for deletion at `now_ms`.
///
/// Candidates are ordered most-recent-first; the file at sorted position `i`
/// is selected when `i >= config.max_count` or its age is at least
/// `config.max_age_ms` (inclusive, so a file exactly at the threshold is
/// selected). The sort is stable: files with equal timestamps keep their
/// input order, which determines which of them falls past the count cutoff.
///
/// The input is not mutated and no I/O is performed. `now_ms` is trusted to
/// be at or after the candidates' timestamps; future-dated files simply have
/// a non-positive age and are never stale.
pub fn select_for_deletion(
    now_ms: i64,
    files: &[FileRecord],
    config: &RetentionConfig,
) -> Vec<FileRecord> {
    let mut by_recency: Vec<&FileRecord> = files.iter().collect();
    by_recency.sort_by(|a, b| b.modified_ms.cmp(&a.modified_ms));

    by_recency
        .into_iter()
        .enumerate()
        .filter(|(i, file)| {
            *i >= config.max_count || now_ms - file.modified_ms >= config.max_age_ms
        })
        .map(|(_, file)| file.clone())
        .collect()
}
