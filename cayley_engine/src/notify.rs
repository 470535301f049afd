//! Change notification — a single-slot, synchronous listener.
//!
//! Registering replaces whatever listener was there before.

use std::fmt;

use crate::selection::Coordinate;
use crate::table::TableKind;

/// What a successful write changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: TableKind,
    pub at: Coordinate,
    pub value: Option<usize>,
}

pub type ChangeListener = Box<dyn FnMut(&ChangeEvent)>;

#[derive(Default)]
pub struct ListenerSlot {
    listener: Option<ChangeListener>,
}

impl ListenerSlot {
    pub fn register(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn is_registered(&self) -> bool {
        self.listener.is_some()
    }

    /// Invoke the listener, if any, before returning.
    pub fn notify(&mut self, event: &ChangeEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }
}

impl fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event() -> ChangeEvent {
        ChangeEvent {
            kind: TableKind::Addition,
            at: Coordinate::new(2, 1),
            value: Some(3),
        }
    }

    #[test]
    fn test_notify_without_listener_is_noop() {
        let mut slot = ListenerSlot::default();
        assert!(!slot.is_registered());
        slot.notify(&event());
    }

    #[test]
    fn test_last_registration_wins() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let mut slot = ListenerSlot::default();

        let first = Rc::clone(&log);
        slot.register(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        slot.register(move |_| second.borrow_mut().push("second"));

        slot.notify(&event());
        slot.notify(&event());
        assert_eq!(*log.borrow(), vec!["second", "second"]);
    }
}
