//! Core component trait and common types

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use ally_dom::NodeId;
use ally_runtime::{Host, ListenerGuard};

/// Component trait - base interface for all UI components
pub trait Component {
    /// Returns the component's name (for debugging)
    fn name(&self) -> &'static str;

    /// Render into `parent` and return the live handle
    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted;
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// A mounted component: its root node plus everything that must live
/// exactly as long as it is on screen (listeners, timers, child handles).
#[must_use = "dropping a Mounted handle unregisters its listeners and cancels its timers"]
pub struct Mounted {
    root: NodeId,
    guards: Vec<ListenerGuard>,
    children: Vec<Mounted>,
    resources: Vec<Box<dyn Any>>,
}

impl Mounted {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            guards: Vec::new(),
            children: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Keep a listener registered while mounted
    pub fn add_guard(&mut self, guard: ListenerGuard) {
        self.guards.push(guard);
    }

    /// Own a child's handle
    pub fn add_child(&mut self, child: Mounted) {
        self.children.push(child);
    }

    /// Own an arbitrary resource (timer handles, shared state)
    pub fn hold(&mut self, resource: impl Any) {
        self.resources.push(Box::new(resource));
    }

    /// Mounted children, in mount order
    pub fn children(&self) -> &[Mounted] {
        &self.children
    }

    /// Listeners held by this handle and its children
    pub fn listener_count(&self) -> usize {
        self.guards.iter().filter(|g| g.is_active()).count()
            + self.children.iter().map(Mounted::listener_count).sum::<usize>()
    }

    /// Remove the subtree from the document and release everything held
    pub fn unmount(self, host: &mut Host) {
        host.document.tree.detach(self.root);
        tracing::trace!(root = %self.root, "unmounted");
    }
}

impl fmt::Debug for Mounted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted")
            .field("root", &self.root)
            .field("listeners", &self.listener_count())
            .field("children", &self.children.len())
            .finish()
    }
}

/// A cloneable callback wrapper for event handlers.
///
/// Handlers receive the host so they can schedule work or touch the
/// document; `A` is the payload (`()` for plain activations).
pub struct Callback<A = ()> {
    inner: Rc<dyn Fn(&mut Host, A)>,
}

impl<A> Callback<A> {
    /// Creates a new Callback from a function or closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Host, A) + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Callback that does nothing
    pub fn noop() -> Self
    where
        A: 'static,
    {
        Self::new(|_, _| {})
    }

    /// Calls the callback with the given arguments.
    pub fn call(&self, host: &mut Host, args: A) {
        (self.inner)(host, args)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

impl<A, F> From<F> for Callback<A>
where
    F: Fn(&mut Host, A) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// Size variant for components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    /// Small
    Sm,
    /// Medium (default)
    #[default]
    Md,
}

impl Size {
    /// Convert size to CSS class suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
        }
    }
}

/// Join class names, skipping empty and absent parts and duplicates
pub fn cn(parts: &[Option<&str>]) -> String {
    let mut out: Vec<&str> = Vec::new();
    for part in parts.iter().flatten() {
        for class in part.split_whitespace() {
            if !out.contains(&class) {
                out.push(class);
            }
        }
    }
    out.join(" ")
}
