//! Notice sinks.
//!
//! The linter reports every rename attempt through a `Notifier`. Notices are
//! fire-and-forget: a sink may show, collect or drop them.

use crate::models::Notice;
use std::cell::RefCell;

/// Receives one notice per rename attempt.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Keeps notices in arrival order until drained.
#[derive(Debug, Default)]
pub struct Notices {
    items: RefCell<Vec<Notice>>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.items.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Notifier for Notices {
    fn notify(&self, notice: Notice) {
        self.items.borrow_mut().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_collects_in_order_and_drains() {
        let sink = Rc::new(Notices::new());
        let shared: Rc<Notices> = Rc::clone(&sink);
        shared.notify(Notice::Renamed {
            old: "a#".into(),
            new: "a".into(),
        });
        sink.notify(Notice::RenameFailed {
            old: "b#".into(),
            new: "b".into(),
        });
        assert_eq!(sink.len(), 2);
        let got = sink.take();
        assert!(got[1].is_failure());
        assert!(sink.is_empty());
    }
}
