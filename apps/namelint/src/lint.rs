//! Filename lint runner.
//!
//! `lint_file` cleans one basename and asks the store to rename the file;
//! `lint_all` does the same for every file of the store concurrently.
//! Rename failures never escape: they become a `RenameFailed` notice and a
//! `Failed` outcome, and the file stays where it was.

use crate::models::{LintOutcome, Notice};
use crate::notice::Notifier;
use crate::sanitize::sanitize;
use crate::store::{FileRef, FileStore, StoreError};
use futures::future::join_all;
use tracing::{debug, warn};

/// Stable identifier of the bulk lint command.
pub const LINT_ALL_COMMAND_ID: &str = "lint-all-filenames";
/// Display name of the bulk lint command.
pub const LINT_ALL_COMMAND_NAME: &str = "Lint all filenames in the store";

/// Lints files of one store, reporting through one notifier.
pub struct Linter<S, N> {
    store: S,
    notifier: N,
}

impl<S: FileStore, N: Notifier> Linter<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Clean the basename of `file` and rename it when that changes it.
    ///
    /// An already clean name is a no-op: no store call, no notice.
    pub async fn lint_file(&self, file: &FileRef) -> LintOutcome {
        let old = file.basename();
        let new = sanitize(old);
        if new == old {
            return LintOutcome::Unchanged {
                path: file.path().to_string(),
            };
        }

        let target = file.sibling_path(&new);
        debug!(from = %file.path(), to = %target, "renaming");
        match self.store.rename(file, &target).await {
            Ok(()) => {
                self.notifier.notify(Notice::Renamed {
                    old: old.to_string(),
                    new: new.clone(),
                });
                LintOutcome::Renamed {
                    from: file.path().to_string(),
                    to: target,
                }
            }
            Err(e) => {
                warn!(from = %file.path(), to = %target, error = %e, "rename failed");
                self.notifier.notify(Notice::RenameFailed {
                    old: old.to_string(),
                    new,
                });
                LintOutcome::Failed {
                    from: file.path().to_string(),
                    to: target,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Lint the given files concurrently and wait for all of them.
    ///
    /// Outcomes line up with `files`; completion order is unspecified.
    pub async fn lint_files(&self, files: &[FileRef]) -> Vec<LintOutcome> {
        join_all(files.iter().map(|f| self.lint_file(f))).await
    }

    /// Lint every file in the store.
    ///
    /// Only a failure to enumerate the store is returned as an error;
    /// per-file failures are reported as outcomes and notices.
    pub async fn lint_all(&self) -> Result<Vec<LintOutcome>, StoreError> {
        let files = self.store.files().await?;
        debug!(command = LINT_ALL_COMMAND_ID, files = files.len(), "linting all files");
        Ok(self.lint_files(&files).await)
    }
}
