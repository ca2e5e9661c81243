use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::model::FileRecord;

/// Compare-side inventory: identity key to path, in first-seen key order.
///
/// When two files share a key the later path replaces the earlier one but the
/// key keeps its original position (last write wins).
#[derive(Debug, Default)]
pub struct CompareInventory {
    by_key: IndexMap<String, PathBuf>,
    duplicate_keys: usize,
}

impl CompareInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FileRecord>) -> Self {
        let mut inventory = Self::new();
        for record in records {
            inventory.insert(record);
        }
        inventory
    }

    pub fn insert(&mut self, record: FileRecord) {
        if let Some(previous) = self.by_key.insert(record.identity_key.clone(), record.path) {
            self.duplicate_keys += 1;
            warn!(
                "Duplicate compare key '{}': {} replaced by {}",
                record.identity_key,
                previous.display(),
                self.by_key[&record.identity_key].display()
            );
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn path_for(&self, key: &str) -> Option<&Path> {
        self.by_key.get(key).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Number of records that collapsed onto an existing key.
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }
}
