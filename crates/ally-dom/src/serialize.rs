//! HTML serialization
//!
//! `outerHTML`-style output for debugging and test assertions.

use crate::node::NodeData;
use crate::{DomTree, NodeId};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

impl DomTree {
    /// Serialize a node and its subtree
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Serialize a node's children
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for (child, _) in self.children(node) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.get(node) else {
            return;
        };
        match &n.data {
            NodeData::Document => {
                for (child, _) in self.children(node) {
                    self.write_node(child, out);
                }
            }
            NodeData::Text(t) => out.push_str(&escape(&t.content, false)),
            NodeData::Comment(c) => {
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->");
            }
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag_name);
                for attr in el.attrs.iter() {
                    out.push(' ');
                    out.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape(&attr.value, true));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&el.tag_name.as_str()) {
                    return;
                }
                for (child, _) in self.children(node) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag_name);
                out.push('>');
            }
        }
    }
}

fn escape(s: &str, in_attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_html() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let input = tree.create_element("input");
        let text = tree.create_text("a < b");
        tree.set_attribute(div, "class", "x \"y\"").unwrap();
        tree.set_attribute(input, "disabled", "").unwrap();
        tree.append_child(div, input).unwrap();
        tree.append_child(div, text).unwrap();

        assert_eq!(
            tree.outer_html(div),
            "<div class=\"x &quot;y&quot;\"><input disabled>a &lt; b</div>"
        );
        assert_eq!(tree.inner_html(div), "<input disabled>a &lt; b");
    }
}
