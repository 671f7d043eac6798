//! Modal root
//!
//! Owns the open/closed transitions. The open state itself belongs to the
//! caller, who reports it through `set_open`; only changes have an effect.

use ally_dom::NodeId;
use ally_runtime::{Host, LayerId, ListenerGuard, TeardownQueue};

use super::focus_trap::FocusTrap;
use super::isolation::BackgroundIsolation;
use super::outside_click::on_outside_click;
use super::parts::{ModalContent, ModalOverlay};
use crate::component::{Callback, Component, Mounted};
use crate::config::UiConfig;
use crate::element::El;

/// Everything that exists only while the modal is open
struct OpenModal {
    container: Mounted,
    content: NodeId,
    layer: LayerId,
    trap: FocusTrap,
    isolation: BackgroundIsolation,
    _outside_click: ListenerGuard,
    teardowns: TeardownQueue,
}

/// Undo everything `open_modal` did, newest first
fn teardown(open: OpenModal, host: &mut Host) {
    let OpenModal {
        container,
        layer,
        mut trap,
        mut isolation,
        _outside_click: outside_click,
        ..
    } = open;

    drop(outside_click);
    trap.deactivate(host);
    isolation.deactivate(host);
    container.unmount(host);
    host.layers.remove_layer(layer);
    tracing::debug!(?layer, "modal closed");
}

/// Modal dialog rendered into the document body while open.
///
/// `on_close` is the single close request path: the content's close
/// control, the footer's Cancel, Escape and presses outside the content
/// all call it. It should end with the caller reporting `set_open(false)`.
///
/// Dropping an open root queues its teardown on the host; it runs on the
/// next `flush`/`advance`.
pub struct ModalRoot {
    content: ModalContent,
    on_close: Callback,
    overlay: Option<ModalOverlay>,
    children: Vec<Box<dyn Component>>,
    config: UiConfig,
    open: Option<OpenModal>,
}

impl ModalRoot {
    pub fn new(content: ModalContent, on_close: impl Into<Callback>) -> Self {
        Self {
            content,
            on_close: on_close.into(),
            overlay: Some(ModalOverlay::new()),
            children: Vec::new(),
            config: UiConfig::default(),
            open: None,
        }
    }

    pub fn with_config(mut self, config: &UiConfig) -> Self {
        self.content.set_config(config);
        self.config = config.clone();
        self
    }

    /// Replace the backdrop; `None` renders none
    pub fn overlay(mut self, overlay: Option<ModalOverlay>) -> Self {
        self.overlay = overlay;
        self
    }

    /// Extra component rendered in the container after the content
    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Content region, while open
    pub fn content_node(&self) -> Option<NodeId> {
        self.open.as_ref().map(|o| o.content)
    }

    /// Portal container in the body, while open
    pub fn container_node(&self) -> Option<NodeId> {
        self.open.as_ref().map(|o| o.container.root())
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.open.as_ref().map(|o| o.layer)
    }

    /// Report the caller's open state
    pub fn set_open(&mut self, host: &mut Host, open: bool) {
        match (open, self.open.is_some()) {
            (true, false) => self.open_modal(host),
            (false, true) => self.close_modal(host),
            _ => tracing::trace!(open, "modal state unchanged"),
        }
    }

    /// Close if open, consuming the root
    pub fn unmount(mut self, host: &mut Host) {
        self.close_modal(host);
    }

    fn open_modal(&mut self, host: &mut Host) {
        let layer = host.layers.push_layer();
        let body = host.document.body();
        let mut container = El::new("div").class("ally-modal-container").mount(host, body);
        let node = container.root();

        if let Some(overlay) = &self.overlay {
            container.add_child(overlay.mount(host, node));
        }
        let content = self.content.mount_with_close(host, node, Some(&self.on_close));
        let content_node = content.root();
        container.add_child(content);
        for child in &self.children {
            container.add_child(child.mount(host, node));
        }

        let mut trap = FocusTrap::new(content_node)
            .with_layer(layer)
            .sr_only_class(self.config.sr_only_class.clone())
            .lock_scroll(self.config.modal.lock_scroll);
        trap.activate(host, self.on_close.clone());

        let mut isolation = BackgroundIsolation::new();
        isolation.activate(host, node);

        let outside_click = on_outside_click(host, content_node, Some(layer), self.on_close.clone());

        tracing::debug!(?layer, content = %content_node, title_id = self.content.title_id(), "modal opened");
        self.open = Some(OpenModal {
            container,
            content: content_node,
            layer,
            trap,
            isolation,
            _outside_click: outside_click,
            teardowns: host.teardown_queue(),
        });
    }

    fn close_modal(&mut self, host: &mut Host) {
        if let Some(open) = self.open.take() {
            teardown(open, host);
        }
    }
}

impl Drop for ModalRoot {
    fn drop(&mut self) {
        if let Some(open) = self.open.take() {
            tracing::debug!(layer = ?open.layer, "modal dropped while open; teardown queued");
            let queue = open.teardowns.clone();
            queue.push(move |host| teardown(open, host));
        }
    }
}

impl std::fmt::Debug for ModalRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalRoot")
            .field("title_id", &self.content.title_id())
            .field("open", &self.is_open())
            .field("layer", &self.layer())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalTitle;
    use std::cell::Cell;
    use std::rc::Rc;

    fn modal(closes: &Rc<Cell<u32>>) -> ModalRoot {
        let c = Rc::clone(closes);
        ModalRoot::new(
            ModalContent::new("title").child(ModalTitle::new("title", "Settings")),
            move |_: &mut Host, _: ()| c.set(c.get() + 1),
        )
    }

    #[test]
    fn test_open_renders_portal() {
        let mut host = Host::new();
        let closes = Rc::new(Cell::new(0));
        let mut root = modal(&closes);
        assert!(root.container_node().is_none());

        root.set_open(&mut host, true);
        let container = root.container_node().unwrap();
        let tree = &host.document.tree;
        assert_eq!(tree.parent(container), Some(host.document.body()));
        let children = tree.element_children(container);
        assert_eq!(children.len(), 2);
        assert_eq!(tree.get_attribute(children[0], "aria-hidden"), Some("true"));
        assert_eq!(Some(children[1]), root.content_node());
        assert_eq!(host.layers.depth(), 1);

        root.unmount(&mut host);
        assert!(!host.document.is_connected(container));
        assert!(host.layers.is_empty());
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn test_set_open_reacts_to_transitions_only() {
        let mut host = Host::new();
        let closes = Rc::new(Cell::new(0));
        let mut root = modal(&closes);
        root.set_open(&mut host, false);
        assert!(!root.is_open());

        root.set_open(&mut host, true);
        let first = root.container_node();
        root.set_open(&mut host, true);
        assert_eq!(root.container_node(), first);
        assert_eq!(host.document.tree.element_children(host.document.body()).len(), 1);

        root.set_open(&mut host, false);
        root.set_open(&mut host, false);
        assert!(host.document.tree.element_children(host.document.body()).is_empty());
        assert_eq!(closes.get(), 0);
    }

    #[test]
    fn test_overlay_press_closes_once() {
        let mut host = Host::new();
        let closes = Rc::new(Cell::new(0));
        let mut root = modal(&closes);
        root.set_open(&mut host, true);
        let overlay = host.document.tree.element_children(root.container_node().unwrap())[0];
        host.click(overlay);
        assert_eq!(closes.get(), 1);
        root.unmount(&mut host);
    }

    #[test]
    fn test_drop_while_open_tears_down_on_next_tick() {
        let mut host = Host::new();
        let closes = Rc::new(Cell::new(0));
        let body = host.document.body();
        let main = host.document.tree.create_element("main");
        host.document.tree.append_child(body, main).unwrap();
        let mut root = modal(&closes);
        root.set_open(&mut host, true);
        host.flush();
        assert_eq!(host.document.tree.get_attribute(main, "aria-hidden"), Some("true"));
        let container = root.container_node().unwrap();
        drop(root);

        assert!(host.document.is_connected(container));
        assert_eq!(host.pending_tasks(), 1);
        host.flush();
        assert!(!host.document.is_connected(container));
        assert!(!host.document.tree.has_attribute(main, "aria-hidden"));
        assert!(host.layers.is_empty());
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(closes.get(), 0);
    }

    #[test]
    fn test_without_overlay() {
        let mut host = Host::new();
        let closes = Rc::new(Cell::new(0));
        let mut root = modal(&closes).overlay(None);
        root.set_open(&mut host, true);
        let container = root.container_node().unwrap();
        assert_eq!(host.document.tree.element_children(container).len(), 1);
        root.unmount(&mut host);
    }
}
