//! Event listener registry
//!
//! Listeners are owned by whoever registered them through a
//! [`ListenerGuard`]; the registry only keeps a shared activity flag, so
//! dropping the guard unregisters the listener synchronously, including in
//! the middle of a dispatch.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use ally_dom::{EventKind, NodeId, UiEvent};

use crate::Host;

/// Event handler
pub type Handler = Rc<dyn Fn(&mut Host, &mut UiEvent)>;

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    /// `document.addEventListener`
    Document,
    /// `element.addEventListener`
    Node(NodeId),
}

/// Keeps a listener registered while alive
#[derive(Debug)]
#[must_use = "dropping a ListenerGuard unregisters the listener"]
pub struct ListenerGuard {
    active: Rc<Cell<bool>>,
}

impl ListenerGuard {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

struct Entry {
    target: ListenerTarget,
    kind: EventKind,
    active: Rc<Cell<bool>>,
    handler: Handler,
}

/// Registered listener snapshot taken at dispatch time
pub(crate) struct Registered {
    active: Rc<Cell<bool>>,
    handler: Handler,
}

impl Registered {
    /// Still registered (a handler earlier in the dispatch may have
    /// dropped it)
    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn handler(&self) -> Handler {
        Rc::clone(&self.handler)
    }
}

/// All listeners of a host
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<Entry>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add(&mut self, target: ListenerTarget, kind: EventKind, handler: Handler) -> ListenerGuard {
        self.prune();
        let active = Rc::new(Cell::new(true));
        self.entries.push(Entry {
            target,
            kind,
            active: Rc::clone(&active),
            handler,
        });
        ListenerGuard { active }
    }

    /// Listeners for `target`/`kind` in registration order
    pub(crate) fn snapshot(&self, target: ListenerTarget, kind: EventKind) -> Vec<Registered> {
        self.entries
            .iter()
            .filter(|e| e.active.get() && e.target == target && e.kind == kind)
            .map(|e| Registered {
                active: Rc::clone(&e.active),
                handler: Rc::clone(&e.handler),
            })
            .collect()
    }

    /// Live listener count
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.active.get()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live listeners of one kind on one target
    pub fn count(&self, target: ListenerTarget, kind: EventKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.active.get() && e.target == target && e.kind == kind)
            .count()
    }

    fn prune(&mut self) {
        self.entries.retain(|e| e.active.get());
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("live", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        Rc::new(|_: &mut Host, _: &mut UiEvent| {})
    }

    #[test]
    fn test_guard_unregisters() {
        let mut registry = ListenerRegistry::new();
        let guard = registry.add(ListenerTarget::Document, EventKind::KeyDown, noop());
        let _other = registry.add(ListenerTarget::Document, EventKind::Click, noop());
        assert_eq!(registry.count(ListenerTarget::Document, EventKind::KeyDown), 1);
        assert!(guard.is_active());

        drop(guard);
        assert_eq!(registry.count(ListenerTarget::Document, EventKind::KeyDown), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_sees_later_removal() {
        let mut registry = ListenerRegistry::new();
        let guard = registry.add(ListenerTarget::Document, EventKind::KeyDown, noop());
        let snapshot = registry.snapshot(ListenerTarget::Document, EventKind::KeyDown);
        assert!(snapshot[0].is_active());
        drop(guard);
        assert!(!snapshot[0].is_active());
    }
}
