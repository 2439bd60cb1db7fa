//! Auto-lint wiring.
//!
//! Subscribes the linter's per-file callback to store events. Each event kind
//! is either subscribed or not; toggling always removes this instance's own
//! subscription first, so repeated toggles never leave more than one behind
//! and never touch another instance sharing the bus. All subscriptions are
//! released when the `AutoLint` is dropped.

use crate::events::{EventBus, Listener, Registrations, StoreEventKind};
use crate::lint::Linter;
use crate::notice::Notifier;
use crate::store::{FileRef, FileStore};
use futures::FutureExt;
use std::rc::Rc;
use tracing::debug;

/// Key the lint callback is subscribed under.
pub const LINT_LISTENER_KEY: &str = "namelint:lint-filename";

pub struct AutoLint<S, N> {
    linter: Rc<Linter<S, N>>,
    registrations: Registrations,
}

impl<S, N> AutoLint<S, N>
where
    S: FileStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(linter: Rc<Linter<S, N>>, bus: Rc<EventBus>) -> Self {
        Self {
            linter,
            registrations: Registrations::new(bus),
        }
    }

    pub fn linter(&self) -> &Rc<Linter<S, N>> {
        &self.linter
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        self.registrations.bus()
    }

    /// Enable or disable linting on `kind` events.
    pub fn set_auto_lint(&self, kind: StoreEventKind, enabled: bool) {
        let bus = self.registrations.bus();
        self.registrations.release_kind(kind);
        if enabled {
            let ev = bus.on(kind, LINT_LISTENER_KEY, self.listener());
            self.registrations.register(ev);
        }
        debug!(event = %kind, enabled, "auto-lint toggled");
    }

    pub fn is_enabled(&self, kind: StoreEventKind) -> bool {
        self.registrations.holds(kind)
    }

    fn listener(&self) -> Listener {
        let linter = Rc::clone(&self.linter);
        Rc::new(move |file: FileRef| {
            let linter = Rc::clone(&linter);
            async move {
                linter.lint_file(&file).await;
            }
            .boxed_local()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notices;
    use crate::store::MemoryStore;

    fn setup(paths: &[&str]) -> (Rc<EventBus>, AutoLint<MemoryStore, Notices>) {
        let bus = Rc::new(EventBus::new());
        let linter = Rc::new(Linter::new(
            MemoryStore::with_paths(paths.iter().copied()),
            Notices::new(),
        ));
        let auto = AutoLint::new(linter, Rc::clone(&bus));
        (bus, auto)
    }

    #[test]
    fn test_toggle_on_twice_keeps_one_subscription() {
        let (bus, auto) = setup(&[]);
        auto.set_auto_lint(StoreEventKind::Create, false);
        auto.set_auto_lint(StoreEventKind::Create, true);
        auto.set_auto_lint(StoreEventKind::Create, false);
        auto.set_auto_lint(StoreEventKind::Create, true);
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 1);
        auto.set_auto_lint(StoreEventKind::Create, true);
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 1);
        assert_eq!(bus.count(StoreEventKind::Rename, LINT_LISTENER_KEY), 0);
    }

    #[test]
    fn test_toggle_off_is_idempotent() {
        let (bus, auto) = setup(&[]);
        auto.set_auto_lint(StoreEventKind::Rename, true);
        auto.set_auto_lint(StoreEventKind::Rename, false);
        auto.set_auto_lint(StoreEventKind::Rename, false);
        assert!(!auto.is_enabled(StoreEventKind::Rename));
        assert_eq!(bus.count(StoreEventKind::Rename, LINT_LISTENER_KEY), 0);
    }

    #[tokio::test]
    async fn test_create_event_lints_new_file_once() {
        let (bus, auto) = setup(&["in[box].md"]);
        auto.set_auto_lint(StoreEventKind::Create, true);
        auto.set_auto_lint(StoreEventKind::Create, true);

        let file = auto.linter().store().get("in[box].md").unwrap();
        bus.emit(StoreEventKind::Create, file).await;

        let store = auto.linter().store();
        assert_eq!(store.paths(), vec!["inbox.md"]);
        assert_eq!(store.rename_requests().len(), 1);
        assert_eq!(auto.linter().notifier().len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_kind_ignores_events() {
        let (bus, auto) = setup(&["a#.md"]);
        auto.set_auto_lint(StoreEventKind::Create, true);
        let file = auto.linter().store().get("a#.md").unwrap();
        bus.emit(StoreEventKind::Rename, file).await;
        assert!(auto.linter().store().rename_requests().is_empty());
    }

    #[test]
    fn test_toggle_leaves_other_instance_on_shared_bus() {
        let (bus, first) = setup(&[]);
        let second = AutoLint::new(
            Rc::new(Linter::new(MemoryStore::new(), Notices::new())),
            Rc::clone(&bus),
        );
        first.set_auto_lint(StoreEventKind::Create, true);
        second.set_auto_lint(StoreEventKind::Create, true);
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 2);

        first.set_auto_lint(StoreEventKind::Create, false);
        assert!(!first.is_enabled(StoreEventKind::Create));
        assert!(second.is_enabled(StoreEventKind::Create));
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 1);

        second.set_auto_lint(StoreEventKind::Create, true);
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 1);
        drop(second);
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 0);
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let (bus, auto) = setup(&[]);
        auto.set_auto_lint(StoreEventKind::Create, true);
        auto.set_auto_lint(StoreEventKind::Rename, true);
        drop(auto);
        assert_eq!(bus.count(StoreEventKind::Create, LINT_LISTENER_KEY), 0);
        assert_eq!(bus.count(StoreEventKind::Rename, LINT_LISTENER_KEY), 0);
    }
}
