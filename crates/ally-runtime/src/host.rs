//! Host runtime
//!
//! The `Host` bundles what a widget sees of its environment: the document,
//! a virtual-time event loop, the listener registry and the overlay layer
//! stack. It also plays the user: `press_key` and `click` dispatch
//! synthetic input and run the browser's default actions when no listener
//! prevents them.

use std::cell::RefCell;
use std::rc::Rc;

use ally_a11y::{FocusOrder, tabbable_elements};
use ally_dom::{
    Document, EventKind, Key, KeyModifiers, KeyboardEvent, NodeId, PointerEvent, UiEvent,
};

use crate::event_loop::{EventLoop, TaskHandle};
use crate::layers::LayerStack;
use crate::listeners::{ListenerGuard, ListenerRegistry, ListenerTarget};

/// Deferred unit of work
pub type Task = Box<dyn FnOnce(&mut Host)>;

/// Upper bound on tasks run by a single `advance`, so a task that keeps
/// rescheduling itself cannot hang the caller
pub const MAX_TASKS_PER_TURN: usize = 10_000;

/// Cleanup queued by owners that are dropped without a `&mut Host` at
/// hand. Clones share one queue; the host drains it at the start of every
/// `advance` and `run_until_idle`.
#[derive(Clone, Default)]
pub struct TeardownQueue {
    tasks: Rc<RefCell<Vec<Task>>>,
}

impl TeardownQueue {
    pub fn push(&self, task: impl FnOnce(&mut Host) + 'static) {
        self.tasks.borrow_mut().push(Box::new(task));
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    fn take(&self) -> Vec<Task> {
        std::mem::take(&mut *self.tasks.borrow_mut())
    }
}

impl std::fmt::Debug for TeardownQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeardownQueue").field("len", &self.len()).finish()
    }
}

const LABELABLE: &[&str] = &["button", "input", "select", "textarea"];

/// Single-threaded host environment
pub struct Host {
    /// The document widgets render into
    pub document: Document,
    /// Open overlay layers
    pub layers: LayerStack,
    event_loop: EventLoop<Task>,
    listeners: ListenerRegistry,
    teardowns: TeardownQueue,
    next_id: u64,
}

impl Host {
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        tracing::info!("host created");
        Self {
            document,
            layers: LayerStack::new(),
            event_loop: EventLoop::new(),
            listeners: ListenerRegistry::new(),
            teardowns: TeardownQueue::default(),
            next_id: 0,
        }
    }

    /// Unique id with a prefix, e.g. `checkbox-3`
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Run `task` on the next tick
    pub fn defer(&mut self, task: impl FnOnce(&mut Host) + 'static) -> TaskHandle {
        self.set_timeout(0, task)
    }

    /// Run `task` after `delay_ms` of virtual time
    pub fn set_timeout(&mut self, delay_ms: u64, task: impl FnOnce(&mut Host) + 'static) -> TaskHandle {
        self.event_loop.set_timeout(Box::new(task), delay_ms)
    }

    /// Handle for queueing cleanup from `Drop`
    pub fn teardown_queue(&self) -> TeardownQueue {
        self.teardowns.clone()
    }

    /// Run queued teardowns, including any they queue in turn
    fn run_teardowns(&mut self) -> usize {
        let mut ran = 0;
        loop {
            let batch = self.teardowns.take();
            if batch.is_empty() {
                return ran;
            }
            for task in batch {
                task(self);
                ran += 1;
            }
            tracing::debug!(ran, "ran queued teardowns");
        }
    }

    /// Run every task that is due now (one tick)
    pub fn flush(&mut self) -> usize {
        self.advance(0)
    }

    /// Move virtual time forward by `ms`, running due tasks in order.
    /// Returns the number of tasks run.
    pub fn advance(&mut self, ms: u64) -> usize {
        let deadline = self.event_loop.current_time().saturating_add(ms);
        let mut ran = self.run_teardowns();
        while let Some((id, task)) = self.event_loop.pop_due(deadline) {
            tracing::trace!(?id, now = self.event_loop.current_time(), "running task");
            task(self);
            ran += 1;
            if ran >= MAX_TASKS_PER_TURN {
                tracing::warn!(ran, "task limit reached; remaining tasks left queued");
                return ran;
            }
        }
        self.event_loop.advance_clock_to(deadline);
        ran
    }

    /// Run timers until none are left
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = self.run_teardowns();
        while let Some(due) = self.event_loop.next_due() {
            let delta = due.saturating_sub(self.now());
            ran += self.advance(delta);
            if ran >= MAX_TASKS_PER_TURN {
                break;
            }
        }
        ran
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.event_loop.current_time()
    }

    /// Tasks still waiting to run, queued teardowns included
    pub fn pending_tasks(&self) -> usize {
        self.event_loop.pending_count() + self.teardowns.len()
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// `document.addEventListener`
    pub fn on_document(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&mut Host, &mut UiEvent) + 'static,
    ) -> ListenerGuard {
        self.listeners.add(ListenerTarget::Document, kind, Rc::new(handler))
    }

    /// `element.addEventListener`
    pub fn on_node(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: impl Fn(&mut Host, &mut UiEvent) + 'static,
    ) -> ListenerGuard {
        self.listeners.add(ListenerTarget::Node(node), kind, Rc::new(handler))
    }

    /// Live listeners of one kind on one target
    pub fn listener_count(&self, target: ListenerTarget, kind: EventKind) -> usize {
        self.listeners.count(target, kind)
    }

    /// All live listeners
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch an event: target and its ancestors first, then the
    /// document. Handlers removed mid-dispatch are skipped.
    pub fn dispatch(&mut self, mut event: UiEvent) -> UiEvent {
        let kind = event.kind();
        let target = event.target();
        tracing::trace!(kind = kind.as_str(), %target, "dispatch");

        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.document.tree.ancestors(target))
            .filter(|&n| self.document.tree.element(n).is_some())
            .collect();

        let targets = path
            .into_iter()
            .map(ListenerTarget::Node)
            .chain(std::iter::once(ListenerTarget::Document));
        for listener_target in targets {
            for registered in self.listeners.snapshot(listener_target, kind) {
                if registered.is_active() {
                    (registered.handler())(self, &mut event);
                }
            }
            if event.propagation_stopped() {
                break;
            }
        }
        event
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    pub fn active_element(&self) -> NodeId {
        self.document.active_element()
    }

    pub fn focus(&mut self, node: NodeId) -> bool {
        self.document.focus(node)
    }

    // ------------------------------------------------------------------
    // Input simulation
    // ------------------------------------------------------------------

    /// Press a key on the focused element
    pub fn press_key(&mut self, key: Key, modifiers: KeyModifiers) -> UiEvent {
        let target = self.active_element();
        let event = self.dispatch(UiEvent::Key(KeyboardEvent::new(key.clone(), modifiers, target)));
        if event.default_prevented() {
            return event;
        }

        match key {
            Key::Tab => self.sequential_focus(modifiers.shift),
            Key::Enter if self.activates_on_enter(target) => self.activate(target),
            Key::Space if self.activates_on_space(target) => self.activate(target),
            _ => {}
        }
        event
    }

    /// Pointer-press then click on `node`
    pub fn click(&mut self, node: NodeId) {
        let pointer = self.dispatch(UiEvent::Pointer(EventKind::PointerDown, PointerEvent::new(node)));
        if !pointer.default_prevented() {
            let focus_target = std::iter::once(node)
                .chain(self.document.tree.ancestors(node))
                .find(|&n| self.document.is_focusable_area(n));
            match focus_target {
                Some(target) => {
                    self.document.focus(target);
                }
                None => self.document.blur(),
            }
        }
        self.activate(node);
    }

    /// Fire `click` (keyboard or pointer activation) and run label
    /// activation behavior
    pub fn activate(&mut self, node: NodeId) {
        if self.is_disabled_control(node) {
            tracing::trace!(%node, "click suppressed on disabled control");
            return;
        }
        let event = self.dispatch(UiEvent::Pointer(EventKind::Click, PointerEvent::new(node)));
        if event.default_prevented() {
            return;
        }

        let tree = &self.document.tree;
        let Some(label) = std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|&n| tree.tag_name(n) == Some("label"))
        else {
            return;
        };
        let in_control = std::iter::once(node)
            .chain(tree.ancestors(node))
            .take_while(|&n| n != label)
            .any(|n| tree.tag_name(n).is_some_and(|t| LABELABLE.contains(&t)));
        if in_control {
            return;
        }
        if let Some(control) = self.labelled_control(label) {
            self.document.focus(control);
            self.activate(control);
        }
    }

    fn sequential_focus(&mut self, backwards: bool) {
        let order = FocusOrder::new(tabbable_elements(&self.document, self.document.tree.root()));
        let current = self.active_element();
        let next = if backwards { order.prev(current) } else { order.next(current) };
        if let Some(next) = next {
            self.document.focus(next);
        }
    }

    fn activates_on_enter(&self, node: NodeId) -> bool {
        let tree = &self.document.tree;
        match tree.tag_name(node) {
            Some("button") => true,
            Some("a") => tree.has_attribute(node, "href"),
            _ => false,
        }
    }

    fn activates_on_space(&self, node: NodeId) -> bool {
        let tree = &self.document.tree;
        match tree.tag_name(node) {
            Some("button") => true,
            Some("input") => tree.get_attribute(node, "type") == Some("checkbox"),
            _ => false,
        }
    }

    /// Clicks on a disabled control, or on anything inside one, never fire
    fn is_disabled_control(&self, node: NodeId) -> bool {
        let tree = &self.document.tree;
        std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|&n| tree.tag_name(n).is_some_and(|t| LABELABLE.contains(&t)))
            .is_some_and(|control| tree.has_attribute(control, "disabled"))
    }

    fn labelled_control(&self, label: NodeId) -> Option<NodeId> {
        let tree = &self.document.tree;
        match tree.get_attribute(label, "for") {
            Some(id) => self
                .document
                .get_element_by_id(id)
                .filter(|&n| tree.tag_name(n).is_some_and(|t| LABELABLE.contains(&t))),
            None => tree
                .descendants(label)
                .into_iter()
                .find(|&n| tree.tag_name(n).is_some_and(|t| LABELABLE.contains(&t))),
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("now", &self.now())
            .field("pending_tasks", &self.pending_tasks())
            .field("listeners", &self.listeners)
            .field("layers", &self.layers)
            .finish()
    }
}
