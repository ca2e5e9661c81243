#![allow(dead_code)]

use lopdf::{dictionary, Document, Object};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a minimal PDF with `pages` blank pages.
pub fn write_pdf(path: &Path, pages: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// Source, compare and destination directories under one temp root.
pub struct Trees {
    pub tmp: tempfile::TempDir,
    pub source: PathBuf,
    pub compare: PathBuf,
    pub dest: PathBuf,
}

impl Trees {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("source");
        let compare = tmp.path().join("compare");
        let dest = tmp.path().join("dest");
        for dir in [&source, &compare, &dest] {
            fs::create_dir_all(dir).unwrap();
        }
        Self {
            tmp,
            source,
            compare,
            dest,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.tmp.path().join("output.txt")
    }
}

/// File names directly inside `dir`, sorted.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
