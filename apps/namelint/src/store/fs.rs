//! Directory-backed store.

use super::{normalize, FileRef, FileStore, Result, StoreError};
use glob::Pattern;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A store rooted at a directory on disk.
///
/// Hidden directories (`.git`, `.namelint`, ...) are not part of the store.
/// Paths matching one of the `ignore` globs are skipped as well.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    ignore: Vec<Pattern>,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: Vec::new(),
        }
    }

    /// Exclude store-relative paths matching any of `patterns`. Invalid
    /// patterns are dropped with a warning.
    pub fn with_ignore(mut self, patterns: &[String]) -> Self {
        for p in patterns {
            match Pattern::new(p) {
                Ok(pat) => self.ignore.push(pat),
                Err(e) => warn!(pattern = %p, error = %e, "ignoring invalid ignore pattern"),
            }
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a store-relative path.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Store-relative form of `path`, if it lies inside the store and is
    /// neither hidden nor ignored.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let rel = to_store_path(rel)?;
        if rel.is_empty() || self.is_excluded(&rel) {
            return None;
        }
        Some(rel)
    }

    fn is_excluded(&self, rel: &str) -> bool {
        let hidden_dir = rel
            .rsplit_once('/')
            .map(|(dirs, _)| dirs.split('/').any(|d| d.starts_with('.')))
            .unwrap_or(false);
        hidden_dir || self.ignore.iter().any(|p| p.matches(rel))
    }

    fn walk(&self) -> Result<Vec<FileRef>> {
        if !self.root.is_dir() {
            return Err(StoreError::NotFound(self.root.to_string_lossy().to_string()));
        }
        let mut out = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !(e.file_type().is_dir() && is_hidden(e.file_name()))
            });
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default();
                StoreError::Io {
                    path,
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop")),
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().to_str().is_none() {
                warn!(path = %entry.path().display(), "skipping file with a non-UTF-8 name");
                continue;
            }
            if let Some(rel) = self.relative(entry.path()) {
                out.push(FileRef::from_path(&rel));
            }
        }
        debug!(root = %self.root.display(), files = out.len(), "enumerated store");
        Ok(out)
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Join normal components with `/`; reject anything that climbs, is
/// absolute or is not valid UTF-8.
fn to_store_path(rel: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for c in rel.components() {
        match c {
            Component::Normal(s) => parts.push(s.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

impl FileStore for FsStore {
    async fn files(&self) -> Result<Vec<FileRef>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.walk())
            .await
            .map_err(|e| StoreError::Io {
                path: self.root.to_string_lossy().to_string(),
                source: io::Error::other(e),
            })?
    }

    async fn rename(&self, file: &FileRef, new_path: &str) -> Result<()> {
        let target = normalize(new_path);
        if target.is_empty() || target.split('/').any(|seg| seg == "..") {
            return Err(StoreError::InvalidPath(new_path.to_string()));
        }
        let src = self.resolve(file.path());
        let dst = self.resolve(&target);

        // Check and rename without yielding: no other task may claim `dst`
        // in between.
        if src.symlink_metadata().is_err() {
            return Err(StoreError::NotFound(file.path().to_string()));
        }
        if dst.symlink_metadata().is_ok() {
            return Err(StoreError::AlreadyExists(target));
        }
        std::fs::rename(&src, &dst).map_err(|e| StoreError::Io {
            path: file.path().to_string(),
            source: e,
        })?;
        debug!(from = %file.path(), to = %target, "renamed");
        Ok(())
    }
}
