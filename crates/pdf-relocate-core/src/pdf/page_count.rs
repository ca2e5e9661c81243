use lopdf::Document;
use std::path::Path;

use crate::error::Error;

/// Something that can tell how many pages a PDF has.
///
/// The engine only needs this one question answered, so tests can swap in a
/// table of canned answers instead of real documents.
pub trait PageCounter {
    fn count_pages(&self, path: &Path) -> Result<usize, Error>;
}

/// Counts pages by loading the document's page tree with `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfPageCounter;

impl PageCounter for LopdfPageCounter {
    fn count_pages(&self, path: &Path) -> Result<usize, Error> {
        let document = Document::load(path).map_err(|e| Error::UnreadablePdf {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(document.get_pages().len())
    }
}

impl<C: PageCounter + ?Sized> PageCounter for &C {
    fn count_pages(&self, path: &Path) -> Result<usize, Error> {
        (**self).count_pages(path)
    }
}
