//! Background isolation
//!
//! Hides everything beside the open modal from assistive technology by
//! setting `aria-hidden="true"` on the body's other element children, and
//! later restores exactly what was there before.

use std::cell::RefCell;
use std::rc::Rc;

use ally_dom::{Document, NodeId};
use ally_runtime::{Host, TaskHandle};

/// `aria-hidden` as it was before isolation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousAriaHidden {
    Absent,
    Value(String),
}

impl PreviousAriaHidden {
    /// Whether isolation has to set the attribute itself
    fn needs_hiding(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Value(value) => value.is_empty() || value == "false",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenSiblingRecord {
    pub node: NodeId,
    pub previous: PreviousAriaHidden,
}

/// Hide the body's element children other than `container` (and any
/// child containing it). Returns what is needed to undo it.
pub fn hide_siblings(doc: &mut Document, container: NodeId) -> Vec<HiddenSiblingRecord> {
    let body = doc.body();
    let mut records = Vec::new();
    for child in doc.tree.element_children(body) {
        if doc.tree.contains(child, container) {
            continue;
        }
        let previous = match doc.tree.get_attribute(child, "aria-hidden") {
            Some(value) => PreviousAriaHidden::Value(value.to_string()),
            None => PreviousAriaHidden::Absent,
        };
        if previous.needs_hiding() {
            let _ = doc.tree.set_attribute(child, "aria-hidden", "true");
        }
        records.push(HiddenSiblingRecord { node: child, previous });
    }
    tracing::trace!(hidden = records.len(), "background hidden");
    records
}

/// Undo `hide_siblings`. Elements that left the document are skipped.
pub fn restore_siblings(doc: &mut Document, records: Vec<HiddenSiblingRecord>) {
    for HiddenSiblingRecord { node, previous } in records {
        if !doc.is_connected(node) {
            tracing::trace!(%node, "hidden sibling left the document; not restored");
            continue;
        }
        let _ = match previous {
            PreviousAriaHidden::Absent => doc.tree.remove_attribute(node, "aria-hidden").map(|_| ()),
            PreviousAriaHidden::Value(value) => doc.tree.set_attribute(node, "aria-hidden", &value),
        };
    }
}

/// Isolation for one modal container. Hiding happens one tick after
/// activation so the container is in place first.
#[derive(Debug, Default)]
pub struct BackgroundIsolation {
    pending: Option<TaskHandle>,
    records: Rc<RefCell<Vec<HiddenSiblingRecord>>>,
    active: bool,
}

impl BackgroundIsolation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Records of the currently hidden siblings
    pub fn records(&self) -> Vec<HiddenSiblingRecord> {
        self.records.borrow().clone()
    }

    pub fn activate(&mut self, host: &mut Host, container: NodeId) {
        if self.active {
            return;
        }
        self.active = true;
        let records = Rc::downgrade(&self.records);
        self.pending = Some(host.defer(move |host| {
            let Some(records) = records.upgrade() else {
                return;
            };
            if !host.document.is_connected(container) {
                tracing::debug!(%container, "modal container gone before isolation");
                return;
            }
            *records.borrow_mut() = hide_siblings(&mut host.document, container);
        }));
    }

    /// Restore the background; before the deferred hide ran this only
    /// cancels it
    pub fn deactivate(&mut self, host: &mut Host) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        let records = std::mem::take(&mut *self.records.borrow_mut());
        restore_siblings(&mut host.document, records);
    }
}
