//! Filesystem watcher feeding the event bus.
//!
//! Raw `notify` events are forwarded over a channel to the single-threaded
//! runtime, reduced to `create` / `rename` store events for files inside the
//! store, and emitted on the bus one at a time.

use crate::events::{EventBus, StoreEventKind};
use crate::store::{FileRef, FsStore};
use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::future::Future;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: String,
        #[source]
        source: notify::Error,
    },
}

/// Live view of store events for a directory-backed store.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    store: FsStore,
}

impl StoreWatcher {
    /// Start watching the store root recursively.
    pub fn start(store: FsStore) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watch_err = |source| WatchError::Watch {
            path: store.root().to_string_lossy().to_string(),
            source,
        };
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Receiver gone means we are shutting down.
            let _ = tx.send(res);
        })
        .map_err(watch_err)?;
        watcher
            .watch(store.root(), RecursiveMode::Recursive)
            .map_err(watch_err)?;
        debug!(root = %store.root().display(), "watching");
        Ok(Self {
            _watcher: watcher,
            rx,
            store,
        })
    }

    /// Next store event, or `None` once the watcher stops.
    pub async fn next_event(&mut self) -> Option<(StoreEventKind, FileRef)> {
        loop {
            match self.rx.recv().await? {
                Ok(ev) => {
                    if let Some(mapped) = map_event(&self.store, &ev) {
                        return Some(mapped);
                    }
                }
                Err(e) => warn!(error = %e, "watch error"),
            }
        }
    }
}

/// Reduce a raw filesystem event to a store event.
///
/// Only files that currently exist inside the store count; directories,
/// hidden or ignored paths, removals and content changes are dropped.
pub fn map_event(store: &FsStore, ev: &Event) -> Option<(StoreEventKind, FileRef)> {
    let (kind, path) = match ev.kind {
        EventKind::Create(CreateKind::Folder) => return None,
        EventKind::Create(_) => (StoreEventKind::Create, ev.paths.first()?),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            (StoreEventKind::Rename, ev.paths.first()?)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            (StoreEventKind::Rename, ev.paths.get(1)?)
        }
        _ => return None,
    };
    if !path.is_file() {
        return None;
    }
    let rel = store.relative(path)?;
    Some((kind, FileRef::from_path(&rel)))
}

/// Emit watcher events on `bus` until the watcher stops or `shutdown`
/// resolves.
pub async fn run<F>(bus: &EventBus, mut watcher: StoreWatcher, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            next = watcher.next_event() => match next {
                Some((kind, file)) => {
                    debug!(event = %kind, path = %file.path(), "store event");
                    bus.emit(kind, file).await;
                }
                None => break,
            },
            _ = &mut shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::RemoveKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_map_create_and_rename() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("n")).unwrap();
        fs::write(root.join("n/a#.md"), "").unwrap();
        let store = FsStore::new(root);

        let create = Event::new(EventKind::Create(CreateKind::File)).add_path(root.join("n/a#.md"));
        let (kind, file) = map_event(&store, &create).unwrap();
        assert_eq!(kind, StoreEventKind::Create);
        assert_eq!(file.path(), "n/a#.md");

        let both = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(root.join("n/old.md"))
            .add_path(root.join("n/a#.md"));
        let (kind, file) = map_event(&store, &both).unwrap();
        assert_eq!(kind, StoreEventKind::Rename);
        assert_eq!(file.basename(), "a#");
    }

    #[test]
    fn test_map_ignores_dirs_hidden_and_removals() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("dir#1")).unwrap();
        fs::create_dir_all(root.join(".namelint")).unwrap();
        fs::write(root.join(".namelint/data.json"), "{}").unwrap();
        let store = FsStore::new(root);

        let dir = Event::new(EventKind::Create(CreateKind::Any)).add_path(root.join("dir#1"));
        assert!(map_event(&store, &dir).is_none());

        let hidden =
            Event::new(EventKind::Create(CreateKind::File)).add_path(root.join(".namelint/data.json"));
        assert!(map_event(&store, &hidden).is_none());

        let gone = Event::new(EventKind::Remove(RemoveKind::File)).add_path(root.join("x.md"));
        assert!(map_event(&store, &gone).is_none());
    }
}
