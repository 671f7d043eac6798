//! Ally DOM - Document Object Model
//!
//! Arena-based DOM tree the Ally components render into. It models the
//! parts of a browser document the widgets depend on: element attributes,
//! class lists, inline styles, layout-box visibility, focus and the viewport
//! metrics used for scrollbar compensation.

mod attributes;
mod classlist;
mod document;
mod events;
mod node;
mod serialize;
mod style;
mod tree;

pub use attributes::{Attr, AttributeMap};
pub use classlist::ClassList;
pub use document::{Document, Viewport};
pub use events::{EventKind, Key, KeyModifiers, KeyboardEvent, PointerEvent, UiEvent};
pub use node::{ElementData, Node, NodeData, NodeType, TextData};
pub use style::StyleDeclaration;
pub use tree::{Ancestors, Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("cannot insert {child} under {parent}: hierarchy request error")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
