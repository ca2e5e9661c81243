use std::path::Path;
use tracing::warn;

use crate::error::Error;
use crate::pdf::PageCounter;

#[derive(Debug)]
pub enum Verification {
    /// Both documents have this many pages.
    Confirmed(usize),
    PageMismatch { source: usize, compare: usize },
    Unreadable(Error),
}

impl Verification {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Verification::Confirmed(_))
    }
}

/// Checks a name match by comparing page counts.
pub struct MatchVerifier<C> {
    counter: C,
}

impl<C: PageCounter> MatchVerifier<C> {
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// True only when both files can be read and have the same page count.
    pub fn verify(&self, source_path: &Path, compare_path: &Path) -> bool {
        self.verify_detailed(source_path, compare_path).is_confirmed()
    }

    pub fn verify_detailed(&self, source_path: &Path, compare_path: &Path) -> Verification {
        let source = match self.count(source_path) {
            Ok(pages) => pages,
            Err(e) => return Verification::Unreadable(e),
        };
        let compare = match self.count(compare_path) {
            Ok(pages) => pages,
            Err(e) => return Verification::Unreadable(e),
        };

        if source == compare {
            Verification::Confirmed(source)
        } else {
            Verification::PageMismatch { source, compare }
        }
    }

    fn count(&self, path: &Path) -> Result<usize, Error> {
        self.counter.count_pages(path).inspect_err(|e| warn!("{}", e))
    }
}
