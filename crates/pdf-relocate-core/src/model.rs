use std::path::{Path, PathBuf};

/// A PDF found during an inventory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// File name without its extension.
    pub identity_key: String,
    pub path: PathBuf,
}

impl FileRecord {
    pub fn from_path(path: PathBuf) -> Self {
        let identity_key = identity_key(&path);
        Self { identity_key, path }
    }
}

pub fn identity_key(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A compare key that cleared the similarity threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub compare_key: String,
    pub similarity: f64,
}

/// A source file that was matched, verified and moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedMatch {
    pub source_path: PathBuf,
    pub compare_path: PathBuf,
    pub destination_path: PathBuf,
}

/// Append-only record of the relocations performed in one run.
#[derive(Debug, Default)]
pub struct MatchLog {
    entries: Vec<VerifiedMatch>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: VerifiedMatch) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[VerifiedMatch] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerifiedMatch> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MatchLog {
    type Item = &'a VerifiedMatch;
    type IntoIter = std::slice::Iter<'a, VerifiedMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<VerifiedMatch> for MatchLog {
    fn from_iter<I: IntoIterator<Item = VerifiedMatch>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_strips_extension() {
        assert_eq!(identity_key(Path::new("/docs/invoice_final.pdf")), "invoice_final");
        assert_eq!(identity_key(Path::new("scan.v2.PDF")), "scan.v2");
    }

    #[test]
    fn test_match_log_preserves_order() {
        let mut log = MatchLog::new();
        for name in ["a", "b", "c"] {
            log.push(VerifiedMatch {
                source_path: PathBuf::from(format!("src/{name}.pdf")),
                compare_path: PathBuf::from(format!("cmp/{name}.pdf")),
                destination_path: PathBuf::from(format!("dst/{name}.pdf")),
            });
        }
        let names: Vec<_> = log
            .iter()
            .map(|m| m.source_path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["src/a.pdf", "src/b.pdf", "src/c.pdf"]);
        assert_eq!(log.len(), 3);
    }
}
