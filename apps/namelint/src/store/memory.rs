//! In-memory store.

use super::{normalize, FileRef, FileStore, Result, StoreError};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// A store kept entirely in memory, keyed by path.
///
/// Every rename request is recorded, successful or not.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<String, FileRef>>,
    renames: RefCell<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with files at `paths`.
    pub fn with_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let store = Self::new();
        for p in paths {
            store.insert(FileRef::from_path(p.as_ref()));
        }
        store
    }

    /// Add `file`, replacing any entry at the same path.
    pub fn insert(&self, file: FileRef) {
        self.files.borrow_mut().insert(file.path().to_string(), file);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<FileRef> {
        self.files.borrow().get(path).cloned()
    }

    /// Sorted paths of every file.
    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    /// `(from, to)` of every rename request received so far.
    pub fn rename_requests(&self) -> Vec<(String, String)> {
        self.renames.borrow().clone()
    }
}

impl FileStore for MemoryStore {
    async fn files(&self) -> Result<Vec<FileRef>> {
        Ok(self.files.borrow().values().cloned().collect())
    }

    async fn rename(&self, file: &FileRef, new_path: &str) -> Result<()> {
        let target = normalize(new_path);
        self.renames
            .borrow_mut()
            .push((file.path().to_string(), target.clone()));
        if target.is_empty() {
            return Err(StoreError::InvalidPath(new_path.to_string()));
        }
        let mut files = self.files.borrow_mut();
        if files.contains_key(&target) {
            return Err(StoreError::AlreadyExists(target));
        }
        if files.remove(file.path()).is_none() {
            return Err(StoreError::NotFound(file.path().to_string()));
        }
        files.insert(target.clone(), FileRef::from_path(&target));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rename_and_conflict() {
        let store = MemoryStore::with_paths(["a#.md", "a.md", "b#.md"]);
        let a = store.get("a#.md").unwrap();
        let err = store.rename(&a, "a.md").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert!(store.contains("a#.md"));

        let b = store.get("b#.md").unwrap();
        store.rename(&b, "b.md").await.unwrap();
        assert_eq!(store.paths(), vec!["a#.md", "a.md", "b.md"]);
        assert_eq!(store.rename_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_rename_missing_source() {
        let store = MemoryStore::new();
        let ghost = FileRef::from_path("ghost.md");
        let err = store.rename(&ghost, "g.md").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
