//! Directory snapshotting.
//!
//! Turns one `read_dir` pass into the immutable [`FileRecord`] snapshot the
//! retention policy evaluates. Errors on individual entries are logged and
//! the entry is skipped rather than failing the entire scan; only a failure
//! to open the directory itself aborts the pass.

use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use scratchkeeper_core::retention::FileRecord;

/// A candidate file plus the size bookkeeping the report needs.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub record: FileRecord,
    pub size_bytes: u64,
}

/// Snapshot every regular file directly under `dir`.
///
/// Only regular files are candidates; subdirectories and symlinks are
/// skipped silently. An entry whose metadata or mtime cannot be read is
/// skipped with a warning.
pub fn snapshot_dir(dir: &Path) -> io::Result<Vec<ScannedFile>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, dir = %dir.display(), "Skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Skipping entry with unreadable metadata");
                continue;
            }
        };

        if !metadata.is_file() {
            continue;
        }

        let modified_ms = match metadata.modified() {
            // Pre-epoch mtimes clamp to 0: maximally stale, still evictable.
            Ok(mtime) => mtime
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as i64)
                .unwrap_or(0),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Skipping entry with unreadable mtime");
                continue;
            }
        };

        files.push(ScannedFile {
            record: FileRecord { path, modified_ms },
            size_bytes: metadata.len(),
        });
    }

    Ok(files)
}
