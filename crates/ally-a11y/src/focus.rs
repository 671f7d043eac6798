//! Focus Management
//!
//! Tab-index parsing, the focusable-set query and sequential focus order.

use ally_dom::{Document, NodeId};

/// Parsed `tabindex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative: focusable by script or click, skipped by Tab
    Programmatic(i32),
    /// Zero or positive: part of sequential navigation
    Sequential(i32),
}

impl TabIndex {
    /// Parse an attribute value; invalid values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Some(Self::Programmatic(n)),
            Ok(n) => Some(Self::Sequential(n)),
            Err(_) => None,
        }
    }

    /// Effective tab index of an element: explicit, or 0 for natively
    /// focusable elements
    pub fn of(doc: &Document, node: NodeId) -> Option<Self> {
        let explicit = doc.tree.get_attribute(node, "tabindex").and_then(Self::parse);
        explicit.or_else(|| doc.is_focusable_area(node).then_some(Self::Sequential(0)))
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::Programmatic(n) | Self::Sequential(n) => *n,
        }
    }
}

/// Interactive allowlist: `a[href]`, enabled form controls, or a
/// non-negative `tabindex` on an element that is not disabled.
pub fn is_focusable_candidate(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.tree.element(node) else {
        return false;
    };
    let disabled = el.has_attr("disabled");
    let by_tag = match el.tag_name.as_str() {
        "a" => el.has_attr("href"),
        "button" | "input" | "select" | "textarea" => !disabled,
        _ => false,
    };
    let by_tabindex = !disabled
        && el
            .get_attr("tabindex")
            .and_then(TabIndex::parse)
            .is_some_and(|t| t.is_sequential());
    by_tag || by_tabindex
}

/// The elements inside `container` that can currently take keyboard focus,
/// in document order. Recomputed on every call.
///
/// An element qualifies when it passes [`is_focusable_candidate`], has no
/// `aria-hidden` attribute, has a layout box, and does not carry
/// `sr_only_class`.
pub fn focusable_elements(doc: &Document, container: NodeId, sr_only_class: &str) -> Vec<NodeId> {
    doc.tree
        .descendants(container)
        .into_iter()
        .filter(|&n| {
            is_focusable_candidate(doc, n)
                && !doc.tree.has_attribute(n, "aria-hidden")
                && doc.has_layout_box(n)
                && !doc.tree.has_class(n, sr_only_class)
        })
        .collect()
}

/// Sequential navigation order below `root`: positive tab indices
/// ascending, then tab index 0 in document order.
pub fn tabbable_elements(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut tabbable: Vec<(i32, NodeId)> = doc
        .tree
        .descendants(root)
        .into_iter()
        .filter(|&n| doc.is_focusable_area(n))
        .filter_map(|n| match TabIndex::of(doc, n) {
            Some(TabIndex::Sequential(v)) => Some((v, n)),
            _ => None,
        })
        .collect();
    // Stable sort keeps document order within a tab index.
    tabbable.sort_by_key(|&(v, _)| if v == 0 { i32::MAX } else { v });
    tabbable.into_iter().map(|(_, n)| n).collect()
}

/// Ordered focus targets with wrap-around navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusOrder {
    order: Vec<NodeId>,
}

impl FocusOrder {
    pub fn new(order: Vec<NodeId>) -> Self {
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.order.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.order.last().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.order.contains(&node)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }

    /// Element after `current`, wrapping; the first one when `current` is
    /// not in the order
    pub fn next(&self, current: NodeId) -> Option<NodeId> {
        match self.order.iter().position(|&n| n == current) {
            Some(p) if p + 1 < self.order.len() => Some(self.order[p + 1]),
            _ => self.first(),
        }
    }

    /// Element before `current`, wrapping; the last one when `current` is
    /// not in the order
    pub fn prev(&self, current: NodeId) -> Option<NodeId> {
        match self.order.iter().position(|&n| n == current) {
            Some(p) if p > 0 => Some(self.order[p - 1]),
            _ => self.last(),
        }
    }
}
