//! File store abstraction.
//!
//! A store is a hierarchy of files addressed by store-relative, `/`-separated
//! paths. namelint only enumerates files and asks for renames; stores must
//! refuse a rename whose destination already exists.
//!
//! Implementations:
//! - `FsStore`: a directory on disk.
//! - `MemoryStore`: an in-process map, used by tests and embedders.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("destination already exists: {0}")]
    AlreadyExists(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid store path: {0}")]
    InvalidPath(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Handle to a file entry in a store.
///
/// Built by the store; callers read its fields and hand it back for renames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileRef {
    path: String,
    basename: String,
    extension: String,
    parent_path: String,
}

impl FileRef {
    /// Split a store-relative path into its parts.
    ///
    /// The extension is whatever follows the last `.` of the final component,
    /// unless that dot leads or ends the name: `.gitignore` and `draft.` have
    /// no extension, and the dot stays part of the basename.
    pub fn from_path(path: &str) -> Self {
        let path = normalize(path);
        let (parent_path, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent.to_string(), name.to_string()),
            None => (String::new(), path.clone()),
        };
        let (basename, extension) = match name.rfind('.') {
            Some(i) if i > 0 && i + 1 < name.len() => {
                (name[..i].to_string(), name[i + 1..].to_string())
            }
            _ => (name, String::new()),
        };
        FileRef {
            path,
            basename,
            extension,
            parent_path,
        }
    }

    /// Build a reference from its parts. The path is derived from them, so a
    /// basename may carry characters a real path could not (`a/b`).
    pub fn new(parent_path: &str, basename: &str, extension: &str) -> Self {
        let mut f = FileRef {
            path: String::new(),
            basename: basename.to_string(),
            extension: extension.to_string(),
            parent_path: normalize(parent_path),
        };
        f.path = f.sibling_path(basename);
        f
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the containing directory; empty at the store root.
    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    /// Path this file would have under a different basename.
    pub fn sibling_path(&self, basename: &str) -> String {
        let mut out = String::new();
        if !self.parent_path.is_empty() {
            out.push_str(&self.parent_path);
            out.push('/');
        }
        out.push_str(basename);
        if !self.extension.is_empty() {
            out.push('.');
            out.push_str(&self.extension);
        }
        out
    }
}

/// Strip leading `./` and `/`, collapse repeated separators.
pub(crate) fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Operations namelint needs from a store.
///
/// Futures are not required to be `Send`: everything runs on one thread.
#[allow(async_fn_in_trait)]
pub trait FileStore {
    /// Every file in the store, across the whole hierarchy. Directories are
    /// never returned.
    async fn files(&self) -> Result<Vec<FileRef>>;

    /// Move `file` to `new_path`. Must fail with `AlreadyExists` rather than
    /// replace an existing entry at `new_path`.
    async fn rename(&self, file: &FileRef, new_path: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_splits_parts() {
        let f = FileRef::from_path("notes/daily/report[final].md");
        assert_eq!(f.path(), "notes/daily/report[final].md");
        assert_eq!(f.parent_path(), "notes/daily");
        assert_eq!(f.basename(), "report[final]");
        assert_eq!(f.extension(), "md");
    }

    #[test]
    fn test_from_path_root_and_odd_names() {
        let f = FileRef::from_path("./a.tar.gz");
        assert_eq!(f.path(), "a.tar.gz");
        assert_eq!(f.parent_path(), "");
        assert_eq!(f.basename(), "a.tar");
        assert_eq!(f.extension(), "gz");

        let dot = FileRef::from_path("cfg/.gitignore");
        assert_eq!(dot.basename(), ".gitignore");
        assert_eq!(dot.extension(), "");

        let bare = FileRef::from_path("/README");
        assert_eq!(bare.path(), "README");
        assert_eq!(bare.basename(), "README");
        assert_eq!(bare.extension(), "");
    }

    #[test]
    fn test_sibling_path_keeps_parent_and_extension() {
        let f = FileRef::from_path("x/y/a:b.md");
        assert_eq!(f.sibling_path("ab"), "x/y/ab.md");
        let root = FileRef::from_path("###.txt");
        assert_eq!(root.sibling_path("file-1234"), "file-1234.txt");
        let bare = FileRef::from_path("dir/Make|file");
        assert_eq!(bare.sibling_path("Makefile"), "dir/Makefile");
    }

    #[test]
    fn test_trailing_dot_stays_in_basename() {
        let f = FileRef::from_path("n/x#.");
        assert_eq!(f.basename(), "x#.");
        assert_eq!(f.extension(), "");
        assert_eq!(f.sibling_path("x."), "n/x.");
    }
}
