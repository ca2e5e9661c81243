use glob::Pattern;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

use crate::error::Error;
use crate::model::FileRecord;

/// Recursively collect every `.pdf` (any case) under `root`.
pub fn scan(root: &Path) -> Result<Vec<FileRecord>, Error> {
    scan_with_ignores(root, &[])
}

/// Like [`scan`], skipping files and directories whose path matches any of
/// `ignore_globs`.
///
/// Within a directory, files are yielded before subdirectories and each group
/// is sorted by name, so the order only depends on what is on disk.
pub fn scan_with_ignores(root: &Path, ignore_globs: &[String]) -> Result<Vec<FileRecord>, Error> {
    if !root.is_dir() {
        return Err(Error::NotFound {
            path: root.to_path_buf(),
        });
    }

    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let walker = WalkDir::new(root)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !ignore_patterns
                    .iter()
                    .any(|pattern| pattern.matches_path(entry.path()))
        });

    let mut records = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                error!("Error reading {} under {}: {}", path, root.display(), err);
                continue;
            }
        };

        if entry.file_type().is_symlink() {
            debug!("Skipping symlink {}", entry.path().display());
            continue;
        }

        if entry.file_type().is_file() && is_pdf(&entry) {
            records.push(FileRecord::from_path(entry.into_path()));
        }
    }

    debug!("Found {} PDF files under {}", records.len(), root.display());
    Ok(records)
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_pdf(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_string_lossy()
        .to_lowercase()
        .ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(records: &[FileRecord]) -> Vec<String> {
        records.iter().map(|r| r.identity_key.clone()).collect()
    }

    #[test]
    fn test_scan_missing_root_is_not_found() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("nope");
        match scan(&missing) {
            Err(Error::NotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_file_root_is_not_found() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.pdf");
        fs::write(&file, "x").unwrap();
        assert!(matches!(scan(&file), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_scan_filters_extension_case_insensitive() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.pdf"), "x").unwrap();
        fs::write(tmp.path().join("B.PDF"), "x").unwrap();
        fs::write(tmp.path().join("c.Pdf"), "x").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::write(tmp.path().join("pdf"), "x").unwrap();

        let records = scan(tmp.path()).unwrap();
        assert_eq!(names(&records), vec!["B", "a", "c"]);
    }

    #[test]
    fn test_scan_recurses_files_before_subdirs() {
        let tmp = tempdir().unwrap();
        let sub = tmp.path().join("a_sub");
        let deeper = sub.join("deeper");
        fs::create_dir_all(&deeper).unwrap();
        fs::write(tmp.path().join("z_top.pdf"), "x").unwrap();
        fs::write(sub.join("mid.pdf"), "x").unwrap();
        fs::write(deeper.join("low.pdf"), "x").unwrap();

        let records = scan(tmp.path()).unwrap();
        assert_eq!(names(&records), vec!["z_top", "mid", "low"]);
        assert_eq!(records[2].path, deeper.join("low.pdf"));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let tmp = tempdir().unwrap();
        for name in ["q", "b", "x", "a"] {
            fs::write(tmp.path().join(format!("{name}.pdf")), "x").unwrap();
        }
        assert_eq!(scan(tmp.path()).unwrap(), scan(tmp.path()).unwrap());
    }

    #[test]
    fn test_scan_with_ignores_skips_directories() {
        let tmp = tempdir().unwrap();
        let drafts = tmp.path().join("drafts");
        fs::create_dir_all(&drafts).unwrap();
        fs::write(tmp.path().join("keep.pdf"), "x").unwrap();
        fs::write(drafts.join("skip.pdf"), "x").unwrap();

        let records = scan_with_ignores(tmp.path(), &["*/drafts".to_string()]).unwrap();
        assert_eq!(names(&records), vec!["keep"]);
    }

    #[test]
    fn test_scan_with_invalid_glob_is_ignored() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("keep.pdf"), "x").unwrap();

        let records = scan_with_ignores(tmp.path(), &["[".to_string()]).unwrap();
        assert_eq!(names(&records), vec!["keep"]);
    }
}
