//! Store event bus.
//!
//! Listeners subscribe to `create` or `rename` events under a key and get an
//! `EventRef` back. `Registrations` owns the handles of one component: it can
//! drop that component's subscriptions of one kind without touching anyone
//! else's, and releases all of them when dropped.

use crate::store::FileRef;
use futures::future::{join_all, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Store events that can trigger a lint.
pub enum StoreEventKind {
    Create,
    Rename,
}

impl fmt::Display for StoreEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEventKind::Create => f.write_str("create"),
            StoreEventKind::Rename => f.write_str("rename"),
        }
    }
}

/// Callback invoked with the file an event refers to.
pub type Listener = Rc<dyn Fn(FileRef) -> LocalBoxFuture<'static, ()>>;

/// Handle to one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRef {
    id: u64,
    kind: StoreEventKind,
}

impl EventRef {
    pub fn kind(&self) -> StoreEventKind {
        self.kind
    }
}

struct Subscription {
    id: u64,
    kind: StoreEventKind,
    key: &'static str,
    listener: Listener,
}

/// Single-threaded publish/subscribe hub for store events.
#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    subs: RefCell<Vec<Subscription>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` under `key` to events of `kind`.
    pub fn on(&self, kind: StoreEventKind, key: &'static str, listener: Listener) -> EventRef {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subs.borrow_mut().push(Subscription {
            id,
            kind,
            key,
            listener,
        });
        EventRef { id, kind }
    }

    /// Remove a single subscription. Already-removed handles are ignored.
    pub fn offref(&self, ev: EventRef) {
        self.subs.borrow_mut().retain(|s| s.id != ev.id);
    }

    /// Number of subscriptions of `key` to `kind`.
    pub fn count(&self, kind: StoreEventKind, key: &'static str) -> usize {
        self.subs
            .borrow()
            .iter()
            .filter(|s| s.kind == kind && s.key == key)
            .count()
    }

    /// Deliver `file` to every listener of `kind` and wait for them.
    ///
    /// Listeners are snapshotted first, so a listener may subscribe or
    /// unsubscribe while the event is in flight.
    pub async fn emit(&self, kind: StoreEventKind, file: FileRef) {
        let listeners: Vec<Listener> = self
            .subs
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Rc::clone(&s.listener))
            .collect();
        join_all(listeners.iter().map(|l| l(file.clone()))).await;
    }
}

/// Subscriptions owned by one component, released on drop.
pub struct Registrations {
    bus: Rc<EventBus>,
    refs: RefCell<Vec<EventRef>>,
}

impl Registrations {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            refs: RefCell::new(Vec::new()),
        }
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Track `ev` so it is removed when this value is dropped.
    pub fn register(&self, ev: EventRef) {
        self.refs.borrow_mut().push(ev);
    }

    /// Remove this owner's subscriptions of `kind` from the bus. Other
    /// owners' subscriptions are left alone.
    pub fn release_kind(&self, kind: StoreEventKind) {
        self.refs.borrow_mut().retain(|ev| {
            if ev.kind == kind {
                self.bus.offref(*ev);
                false
            } else {
                true
            }
        });
    }

    /// Whether this owner holds a subscription of `kind`.
    pub fn holds(&self, kind: StoreEventKind) -> bool {
        self.refs.borrow().iter().any(|ev| ev.kind == kind)
    }

    /// Release every tracked subscription now.
    pub fn release(&self) {
        for ev in self.refs.borrow_mut().drain(..) {
            self.bus.offref(ev);
        }
    }
}

impl Drop for Registrations {
    fn drop(&mut self) {
        self.release();
    }
}
