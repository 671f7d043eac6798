//! Document - High-level document API
//!
//! Owns the tree plus the per-document state the widgets rely on: the
//! focused element and the viewport metrics.

use crate::{DomTree, NodeId};

/// Viewport metrics in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// `window.innerWidth` (includes the vertical scrollbar)
    pub inner_width: u32,
    /// `document.documentElement.clientWidth` (excludes it)
    pub client_width: u32,
}

impl Viewport {
    /// Width taken by the vertical scrollbar
    pub fn scrollbar_width(&self) -> u32 {
        self.inner_width.saturating_sub(self.client_width)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { inner_width: 1024, client_width: 1024 }
    }
}

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Viewport metrics
    pub viewport: Viewport,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    focused: NodeId,
}

impl Document {
    /// Create a document with `<html><head/><body/></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached nodes under a fresh root cannot violate the hierarchy.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            viewport: Viewport::default(),
            html_element: html,
            head_element: head,
            body_element: body,
            focused: NodeId::NONE,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Check whether a node is attached under the document root
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree.contains(self.tree.root(), node)
    }

    /// Get a connected element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// Whether the element would generate a layout box.
    ///
    /// Without a style engine this is approximated by the `hidden` attribute
    /// and an inline `display: none` on the element or any ancestor.
    pub fn has_layout_box(&self, node: NodeId) -> bool {
        if self.tree.element(node).is_none() || !self.is_connected(node) {
            return false;
        }
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .filter(|&n| self.tree.element(n).is_some())
            .all(|n| {
                !self.tree.has_attribute(n, "hidden")
                    && self.tree.style(n).get_property_value("display") != Some("none")
            })
    }

    /// Check whether an element can receive focus (tabbable or not)
    pub fn is_focusable_area(&self, node: NodeId) -> bool {
        let Some(el) = self.tree.element(node) else {
            return false;
        };
        if !self.has_layout_box(node) {
            return false;
        }
        let disabled = el.has_attr("disabled");
        let natively = match el.tag_name.as_str() {
            "a" => el.has_attr("href"),
            "button" | "select" | "textarea" => !disabled,
            "input" => !disabled && el.get_attr("type") != Some("hidden"),
            _ => false,
        };
        let by_tabindex = !disabled
            && el
                .get_attr("tabindex")
                .is_some_and(|v| v.trim().parse::<i32>().is_ok());
        natively || by_tabindex
    }

    /// Focused element; falls back to `<body>` when nothing (connected) is
    pub fn active_element(&self) -> NodeId {
        if self.focused.is_valid() && self.is_connected(self.focused) {
            self.focused
        } else {
            self.body_element
        }
    }

    /// Focus an element. Returns false (and leaves focus unchanged) when the
    /// element is not a focusable area.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_focusable_area(node) {
            tracing::trace!(%node, "focus ignored: not focusable");
            return false;
        }
        self.focused = node;
        true
    }

    /// Drop focus back to `<body>`
    pub fn blur(&mut self) {
        self.focused = NodeId::NONE;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
