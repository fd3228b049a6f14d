//! `scratchkeeper-core` -- pure retention logic for the scratch-file sweeper.
//!
//! No I/O lives here: the sweeper daemon snapshots a directory, hands the
//! snapshot to [`retention::select_for_deletion`], and performs the actual
//! deletions itself.

pub mod error;
pub mod retention;
