//! Sweep passes and the scheduled sweep loop.
//!
//! A pass is scan → select → delete. Deletion failures are strictly
//! per-file: each one is logged, recorded in the report, and the pass moves
//! on to the next candidate. Nothing is retried; whatever survives a failed
//! delete is revisited on the next scheduled pass.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use scratchkeeper_core::retention::{select_for_deletion, RetentionConfig};

use crate::config::SweeperConfig;
use crate::scanner::{self, ScannedFile};

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub files_scanned: usize,
    pub files_selected: usize,
    pub files_deleted: usize,
    pub bytes_reclaimed: u64,
    /// One message per file that could not be deleted.
    pub errors: Vec<String>,
}

/// Result of deleting one batch of selected files.
#[derive(Debug, Default)]
pub struct DeleteOutcome {
    pub files_deleted: usize,
    pub bytes_reclaimed: u64,
    pub errors: Vec<String>,
}

/// Delete each selected file in order.
///
/// A failure on one file is logged and recorded, never aborting the rest of
/// the list. A file already gone by deletion time is neither a deletion nor
/// an error; someone else reclaimed it between scan and delete.
pub async fn delete_selected(selected: &[ScannedFile]) -> DeleteOutcome {
    let mut outcome = DeleteOutcome::default();

    for file in selected {
        let path = &file.record.path;
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                outcome.files_deleted += 1;
                outcome.bytes_reclaimed += file.size_bytes;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Stale file vanished before deletion");
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to delete stale file");
                outcome
                    .errors
                    .push(format!("failed to delete {}: {e}", path.display()));
            }
        }
    }

    outcome
}

/// Run a single sweep pass over `dir` at the supplied timestamp.
///
/// Fails only if the directory itself cannot be enumerated.
pub async fn sweep_once(
    dir: &Path,
    now_ms: i64,
    retention: &RetentionConfig,
) -> io::Result<SweepReport> {
    let scanned = scanner::snapshot_dir(dir)?;

    let records: Vec<_> = scanned.iter().map(|f| f.record.clone()).collect();
    let selected_records = select_for_deletion(now_ms, &records, retention);
    let selected_paths: HashSet<&Path> =
        selected_records.iter().map(|r| r.path.as_path()).collect();

    let selected: Vec<ScannedFile> = scanned
        .iter()
        .filter(|f| selected_paths.contains(f.record.path.as_path()))
        .cloned()
        .collect();

    let outcome = delete_selected(&selected).await;

    Ok(SweepReport {
        files_scanned: scanned.len(),
        files_selected: selected.len(),
        files_deleted: outcome.files_deleted,
        bytes_reclaimed: outcome.bytes_reclaimed,
        errors: outcome.errors,
    })
}

/// Run the sweep loop until `cancel` is triggered.
///
/// The first pass runs immediately; subsequent passes run on the configured
/// fixed interval. A failed pass is logged and the loop keeps going.
pub async fn run(config: SweeperConfig, cancel: CancellationToken) {
    tracing::info!(
        dir = %config.scratch_dir.display(),
        interval_secs = config.sweep_interval.as_secs(),
        max_files = config.retention.max_count,
        max_age_ms = config.retention.max_age_ms,
        "Sweep loop started"
    );

    let mut interval = tokio::time::interval(config.sweep_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Sweep loop stopping");
                break;
            }
            _ = interval.tick() => {
                let now_ms = Utc::now().timestamp_millis();
                match sweep_once(&config.scratch_dir, now_ms, &config.retention).await {
                    Ok(report) if report.files_selected > 0 => {
                        tracing::info!(
                            files_scanned = report.files_scanned,
                            files_deleted = report.files_deleted,
                            bytes_reclaimed = report.bytes_reclaimed,
                            delete_errors = report.errors.len(),
                            "Sweep pass complete"
                        );
                    }
                    Ok(report) => {
                        tracing::debug!(files_scanned = report.files_scanned, "Sweep pass: nothing to delete");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, dir = %config.scratch_dir.display(), "Sweep pass failed");
                    }
                }
            }
        }
    }
}
