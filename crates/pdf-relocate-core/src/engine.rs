use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::error::Error;
use crate::matcher;
use crate::model::{FileRecord, MatchLog, VerifiedMatch};
use crate::pdf::{LopdfPageCounter, PageCounter};
use crate::progress::ProgressReporter;
use crate::relocate::{self, MoveOutcome};
use crate::report;
use crate::scanner::{self, CompareInventory};
use crate::verify::{MatchVerifier, Verification};

/// Matches source PDFs against a compare tree and moves verified ones into
/// the destination directory.
pub struct RelocationEngine<C = LopdfPageCounter> {
    config: AppConfig,
    verifier: MatchVerifier<C>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub source_files: usize,
    pub compare_files: usize,
    pub duplicate_compare_keys: usize,
    pub no_match: usize,
    pub unverified: usize,
    pub collisions_skipped: usize,
    pub move_failures: usize,
    pub relocated: usize,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub log: MatchLog,
    pub stats: RunStats,
    pub elapsed: Duration,
}

impl RelocationEngine {
    pub fn new(config: AppConfig) -> Self {
        Self::with_page_counter(config, LopdfPageCounter)
    }
}

impl<C: PageCounter> RelocationEngine<C> {
    pub fn with_page_counter(config: AppConfig, counter: C) -> Self {
        Self {
            config,
            verifier: MatchVerifier::new(counter),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Process every source file and return the log of relocations.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<MatchLog, Error> {
        self.run_with_stats(reporter).map(|outcome| outcome.log)
    }

    /// [`run`](Self::run), then write the report to the configured path.
    pub fn run_and_report(&self, reporter: &dyn ProgressReporter) -> Result<RunOutcome, Error> {
        let outcome = self.run_with_stats(reporter)?;
        report::write(&outcome.log, &self.config.report_path)?;
        Ok(outcome)
    }

    /// Run the full pipeline:
    /// 1. Scan source and compare trees (missing roots abort here)
    /// 2. For each source file: best name match, page-count check, move
    /// 3. Collect relocations in order
    pub fn run_with_stats(&self, reporter: &dyn ProgressReporter) -> Result<RunOutcome, Error> {
        let start = Instant::now();
        let config = &self.config;

        let sources = scanner::scan_with_ignores(&config.source_root, &config.ignore_patterns)?;
        let compare = CompareInventory::from_records(scanner::scan_with_ignores(
            &config.compare_root,
            &config.ignore_patterns,
        )?);
        if !config.dest_root.is_dir() {
            return Err(Error::NotFound {
                path: config.dest_root.clone(),
            });
        }

        config.check_destination()?;
        if config.dest_inside_source() {
            warn!(
                "Destination {} is inside the source tree {}",
                config.dest_root.display(),
                config.source_root.display()
            );
        }

        info!(
            "Matching {} source files against {} compare keys",
            sources.len(),
            compare.len()
        );
        reporter.on_scan_complete(sources.len(), compare.len());

        let mut stats = RunStats {
            source_files: sources.len(),
            compare_files: compare.len() + compare.duplicate_keys(),
            duplicate_compare_keys: compare.duplicate_keys(),
            ..RunStats::default()
        };
        let mut log = MatchLog::new();

        let total = sources.len();
        for (index, record) in sources.iter().enumerate() {
            reporter.on_file_start(index, total, &record.path);
            if let Some(entry) = self.process_file(record, &compare, &mut stats) {
                reporter.on_relocated(&entry);
                log.push(entry);
            }
        }

        info!(
            "Relocated {} of {} source files ({} without match, {} unverified, {} move failures)",
            stats.relocated,
            stats.source_files,
            stats.no_match,
            stats.unverified,
            stats.move_failures
        );
        reporter.on_run_complete(&stats);

        Ok(RunOutcome {
            log,
            stats,
            elapsed: start.elapsed(),
        })
    }

    fn process_file(
        &self,
        record: &FileRecord,
        compare: &CompareInventory,
        stats: &mut RunStats,
    ) -> Option<VerifiedMatch> {
        let Some(candidate) = matcher::best_match(&record.identity_key, compare.keys()) else {
            info!("No match for {}", record.path.display());
            stats.no_match += 1;
            return None;
        };
        let compare_path = compare.path_for(&candidate.compare_key)?;

        match self.verifier.verify_detailed(&record.path, compare_path) {
            Verification::Confirmed(pages) => {
                debug!(
                    "{} and {} both have {} pages",
                    record.path.display(),
                    compare_path.display(),
                    pages
                );
            }
            Verification::PageMismatch {
                source,
                compare: compare_pages,
            } => {
                info!(
                    "Page count mismatch: {} has {}, {} has {}",
                    record.path.display(),
                    source,
                    compare_path.display(),
                    compare_pages
                );
                stats.unverified += 1;
                return None;
            }
            Verification::Unreadable(_) => {
                info!(
                    "Could not verify {} against {}",
                    record.path.display(),
                    compare_path.display()
                );
                stats.unverified += 1;
                return None;
            }
        }

        self.move_verified(&record.path, compare_path, stats)
    }

    fn move_verified(
        &self,
        source_path: &Path,
        compare_path: &Path,
        stats: &mut RunStats,
    ) -> Option<VerifiedMatch> {
        let result = relocate::destination_for(source_path, &self.config.dest_root).and_then(
            |destination| relocate::relocate(source_path, &destination, self.config.on_collision),
        );

        match result {
            Ok(MoveOutcome::Moved(destination_path)) => {
                info!(
                    "Moved {} to {}",
                    source_path.display(),
                    destination_path.display()
                );
                stats.relocated += 1;
                Some(VerifiedMatch {
                    source_path: source_path.to_path_buf(),
                    compare_path: compare_path.to_path_buf(),
                    destination_path,
                })
            }
            Ok(MoveOutcome::Skipped(existing)) => {
                info!(
                    "Skipping {}: {} already exists",
                    source_path.display(),
                    existing.display()
                );
                stats.collisions_skipped += 1;
                None
            }
            Err(e) => {
                error!("{}", e);
                stats.move_failures += 1;
                None
            }
        }
    }
}
