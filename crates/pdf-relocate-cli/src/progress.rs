use indicatif::{ProgressBar, ProgressStyle};
use pdf_relocate_core::{ProgressReporter, RunStats, VerifiedMatch};
use std::path::Path;
use std::sync::Mutex;

/// CLI progress reporter: one bar over the source files, known in length
/// once both trees are scanned.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_complete(&self, source_files: usize, compare_files: usize) {
        let pb = ProgressBar::new(source_files as u64);
        let style = ProgressStyle::with_template(
            "  {spinner:.cyan} Matching [{bar:30.cyan/dim}] {pos}/{len} files {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸─")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);
        pb.println(format!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} source files, {} compare keys",
            source_files, compare_files
        ));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = guard.replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_file_start(&self, index: usize, _total: usize, path: &Path) {
        self.with_bar(|pb| {
            pb.set_position(index as u64);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(name);
        });
    }

    fn on_relocated(&self, entry: &VerifiedMatch) {
        self.with_bar(|pb| {
            pb.println(format!(
                "  \x1b[32m→\x1b[0m {} → {}",
                entry.source_path.display(),
                entry.destination_path.display()
            ));
        });
    }

    fn on_run_complete(&self, stats: &RunStats) {
        let mut guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = guard.take() {
            pb.set_position(stats.source_files as u64);
            pb.finish_and_clear();
        }
    }
}
