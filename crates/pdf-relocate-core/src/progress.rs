use std::path::Path;

use crate::engine::RunStats;
use crate::model::VerifiedMatch;

/// Trait for reporting run progress.
///
/// The CLI implements it with indicatif; any other shell can plug in its own.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_complete(&self, _source_files: usize, _compare_files: usize) {}
    fn on_file_start(&self, _index: usize, _total: usize, _path: &Path) {}
    fn on_relocated(&self, _entry: &VerifiedMatch) {}
    fn on_run_complete(&self, _stats: &RunStats) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
