//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; a removed subtree is simply detached from its
//! parent and can be re-inserted later. `NodeId`s therefore stay valid for
//! the lifetime of the tree, which is what lets components hold plain IDs
//! as weak back-references.

use crate::classlist::ClassList;
use crate::node::{ElementData, Node, NodeData};
use crate::style::StyleDeclaration;
use crate::{DomError, DomResult, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element data for a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data for a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag_name.as_str())
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// Iterate over ancestors, nearest first (excluding the node itself)
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        let next = self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE);
        Ancestors { tree: self, next }
    }

    /// Inclusive containment: true when `node` is `ancestor` or below it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if self.get(ancestor).is_none() || self.get(node).is_none() {
            return false;
        }
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// All descendants in document order (excluding the node itself)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let first = stack.len();
            stack.extend(self.children(current).map(|(c, _)| c));
            stack[first..].reverse();
        }
        out
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if !parent_node.can_have_children() || child == NodeId::ROOT || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Append a child node, moving it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: reference });
            }
            if reference == child {
                return Ok(child);
            }
        }

        self.detach(child);

        match reference {
            None => {
                let last = self.nodes[parent.index()].last_child;
                {
                    let node = &mut self.nodes[child.index()];
                    node.parent = parent;
                    node.prev_sibling = last;
                    node.next_sibling = NodeId::NONE;
                }
                if last.is_valid() {
                    self.nodes[last.index()].next_sibling = child;
                } else {
                    self.nodes[parent.index()].first_child = child;
                }
                self.nodes[parent.index()].last_child = child;
            }
            Some(reference) => {
                let prev = self.nodes[reference.index()].prev_sibling;
                {
                    let node = &mut self.nodes[child.index()];
                    node.parent = parent;
                    node.prev_sibling = prev;
                    node.next_sibling = reference;
                }
                self.nodes[reference.index()].prev_sibling = child;
                if prev.is_valid() {
                    self.nodes[prev.index()].next_sibling = child;
                } else {
                    self.nodes[parent.index()].first_child = child;
                }
            }
        }
        Ok(child)
    }

    /// Remove a child from its parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Unlink a node from its parent; no-op for detached nodes
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id) {
            Some(node) if node.is_text() => node.as_text().unwrap_or_default().to_string(),
            Some(_) => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if self.element(id).is_none() {
            return Err(DomError::NotAnElement(id));
        }
        let children: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)
            .ok_or(DomError::NotAnElement(id))?
            .set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self
            .element_mut(id)
            .ok_or(DomError::NotAnElement(id))?
            .remove_attr(name))
    }

    /// Parsed class list
    pub fn class_list(&self, id: NodeId) -> ClassList {
        ClassList::parse(self.get_attribute(id, "class").unwrap_or_default())
    }

    /// Check for a class
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).contains(class)
    }

    /// Add or remove a class; returns whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> DomResult<bool> {
        let mut list = self.class_list(id);
        let present = list.toggle(class, force);
        match list.to_attribute() {
            Some(value) => self.set_attribute(id, "class", &value)?,
            None => {
                self.remove_attribute(id, "class")?;
            }
        }
        Ok(present)
    }

    /// Parsed inline style
    pub fn style(&self, id: NodeId) -> StyleDeclaration {
        StyleDeclaration::parse(self.get_attribute(id, "style").unwrap_or_default())
    }

    /// Set an inline style property; an empty value removes it
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let mut style = self.style(id);
        style.set_property(name, value);
        self.write_style(id, &style)
    }

    /// Remove an inline style property, returning its value
    pub fn remove_style_property(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let mut style = self.style(id);
        let removed = style.remove_property(name);
        self.write_style(id, &style)?;
        Ok(removed)
    }

    // An emptied declaration drops the attribute entirely.
    fn write_style(&mut self, id: NodeId, style: &StyleDeclaration) -> DomResult<()> {
        if style.is_empty() {
            self.remove_attribute(id, "style")?;
        } else {
            self.set_attribute(id, "style", &style.css_text())?;
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();
        (tree, div, a, b)
    }

    #[test]
    fn test_append_and_children_order() {
        let (tree, div, a, b) = build();
        let kids: Vec<NodeId> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(tree.parent(a), Some(div));
    }

    #[test]
    fn test_insert_before() {
        let (mut tree, div, a, b) = build();
        let c = tree.create_element("c");
        tree.insert_before(div, c, Some(b)).unwrap();
        let kids: Vec<NodeId> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(kids, vec![a, c, b]);
    }

    #[test]
    fn test_move_between_parents() {
        let (mut tree, div, a, b) = build();
        tree.append_child(b, a).unwrap();
        assert_eq!(tree.element_children(div), vec![b]);
        assert_eq!(tree.parent(a), Some(b));
    }

    #[test]
    fn test_hierarchy_request() {
        let (mut tree, div, a, _) = build();
        assert_eq!(
            tree.append_child(a, div),
            Err(DomError::HierarchyRequest { parent: a, child: div })
        );
        assert!(tree.append_child(div, div).is_err());
    }

    #[test]
    fn test_remove_child_errors() {
        let (mut tree, div, a, b) = build();
        assert_eq!(tree.remove_child(a, b), Err(DomError::NotAChild { parent: a, child: b }));
        assert_eq!(tree.remove_child(div, a), Ok(a));
        assert!(!tree.contains(tree.root(), a));
        assert_eq!(tree.element_children(div), vec![b]);
    }

    #[test]
    fn test_descendants_document_order() {
        let (mut tree, div, a, b) = build();
        let a1 = tree.create_element("span");
        tree.append_child(a, a1).unwrap();
        assert_eq!(tree.descendants(div), vec![a, a1, b]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let (tree, div, a, _) = build();
        assert!(tree.contains(div, a));
        assert!(tree.contains(a, a));
        assert!(!tree.contains(a, div));
        assert!(!tree.contains(NodeId::NONE, a));
    }

    #[test]
    fn test_class_and_style_helpers() {
        let (mut tree, div, _, _) = build();
        tree.toggle_class(div, "open", Some(true)).unwrap();
        assert!(tree.has_class(div, "open"));
        tree.toggle_class(div, "open", None).unwrap();
        assert!(!tree.has_attribute(div, "class"));

        tree.set_style_property(div, "overflow", "hidden").unwrap();
        assert_eq!(tree.get_attribute(div, "style"), Some("overflow: hidden;"));
        assert_eq!(tree.remove_style_property(div, "overflow"), Ok(Some("hidden".to_string())));
        assert!(!tree.has_attribute(div, "style"));
    }

    #[test]
    fn test_text_content() {
        let (mut tree, div, a, b) = build();
        let t1 = tree.create_text("Hello ");
        let t2 = tree.create_text("world");
        tree.append_child(a, t1).unwrap();
        tree.append_child(b, t2).unwrap();
        assert_eq!(tree.text_content(div), "Hello world");

        tree.set_text_content(div, "replaced").unwrap();
        assert_eq!(tree.text_content(div), "replaced");
        assert!(tree.set_text_content(t1, "x").is_err());
    }
}
