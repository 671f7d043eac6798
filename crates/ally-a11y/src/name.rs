//! Accessible name computation
//!
//! A reduced accname algorithm: `aria-labelledby`, `aria-label`, native
//! labels for labelable elements, `alt`, content (for roles that take their
//! name from content) and finally `title`.

use ally_dom::{Document, NodeId};

use crate::aria::role_of;

const LABELABLE: &[&str] = &["button", "input", "select", "textarea"];

/// Compute the accessible name of an element; empty when it has none
pub fn accessible_name(doc: &Document, node: NodeId) -> String {
    let Some(el) = doc.tree.element(node) else {
        return String::new();
    };

    if let Some(ids) = el.get_attr("aria-labelledby") {
        let name = ids
            .split_whitespace()
            .filter_map(|id| doc.get_element_by_id(id))
            .map(|referenced| exposed_text(doc, referenced, true))
            .collect::<Vec<_>>()
            .join(" ");
        let name = normalize(&name);
        if !name.is_empty() {
            return name;
        }
    }

    if let Some(label) = el.get_attr("aria-label").map(normalize).filter(|l| !l.is_empty()) {
        return label;
    }

    if LABELABLE.contains(&el.tag_name.as_str()) {
        let name = normalize(
            &labels_for(doc, node)
                .into_iter()
                .map(|label| exposed_text(doc, label, false))
                .collect::<Vec<_>>()
                .join(" "),
        );
        if !name.is_empty() {
            return name;
        }
    }

    if el.is("img") {
        if let Some(alt) = el.get_attr("alt").map(normalize).filter(|a| !a.is_empty()) {
            return alt;
        }
    }

    if role_of(doc, node).is_some_and(|r| r.name_from_content()) {
        let name = normalize(&exposed_text(doc, node, false));
        if !name.is_empty() {
            return name;
        }
    }

    el.get_attr("title").map(normalize).unwrap_or_default()
}

/// `<label for=id>` elements plus a wrapping `<label>`, in that order
pub fn labels_for(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let mut labels = Vec::new();
    if let Some(id) = doc.tree.element(node).and_then(|e| e.id()).filter(|id| !id.is_empty()) {
        labels.extend(
            doc.tree
                .descendants(doc.tree.root())
                .into_iter()
                .filter(|&n| {
                    doc.tree.tag_name(n) == Some("label") && doc.tree.get_attribute(n, "for") == Some(id)
                }),
        );
    }
    if let Some(wrapping) = doc.tree.ancestors(node).find(|&a| doc.tree.tag_name(a) == Some("label")) {
        if !labels.contains(&wrapping) {
            labels.push(wrapping);
        }
    }
    labels
}

/// Text exposed to assistive technology below `node`. Subtrees marked
/// `aria-hidden="true"` or without a layout box are skipped, unless the
/// node was referenced directly (`referenced`), in which case only its
/// descendants are filtered.
fn exposed_text(doc: &Document, node: NodeId, referenced: bool) -> String {
    let mut out = String::new();
    collect(doc, node, referenced, &mut out);
    out
}

fn collect(doc: &Document, node: NodeId, skip_check: bool, out: &mut String) {
    let Some(n) = doc.tree.get(node) else {
        return;
    };
    if let Some(text) = n.as_text() {
        out.push_str(text);
        return;
    }
    if let Some(el) = n.as_element() {
        let hidden = el.get_attr("aria-hidden") == Some("true")
            || el.has_attr("hidden")
            || doc.tree.style(node).get_property_value("display") == Some("none");
        if hidden && !skip_check {
            return;
        }
        if el.is("input") {
            return;
        }
    }
    for (child, _) in doc.tree.children(node) {
        collect(doc, child, false, out);
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)], text: &str) -> NodeId {
        let node = doc.tree.create_element(tag);
        for (name, value) in attrs {
            doc.tree.set_attribute(node, name, value).unwrap();
        }
        if !text.is_empty() {
            doc.tree.set_text_content(node, text).unwrap();
        }
        doc.tree.append_child(parent, node).unwrap();
        node
    }

    #[test]
    fn test_labelledby_wins() {
        let mut doc = Document::new();
        let body = doc.body();
        el(&mut doc, body, "h2", &[("id", "t")], "Delete file");
        let dialog = el(&mut doc, body, "div", &[("role", "dialog"), ("aria-labelledby", "t"), ("aria-label", "x")], "");
        assert_eq!(accessible_name(&doc, dialog), "Delete file");
    }

    #[test]
    fn test_button_content_skips_aria_hidden() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = el(&mut doc, body, "button", &[], "");
        el(&mut doc, button, "span", &[("aria-hidden", "true")], "×");
        el(&mut doc, button, "span", &[("class", "sr-only")], "Close");
        assert_eq!(accessible_name(&doc, button), "Close");
    }

    #[test]
    fn test_label_for_and_wrapping_label() {
        let mut doc = Document::new();
        let body = doc.body();
        el(&mut doc, body, "label", &[("for", "email")], "Email  address");
        let input = el(&mut doc, body, "input", &[("id", "email")], "");
        assert_eq!(accessible_name(&doc, input), "Email address");

        let label = el(&mut doc, body, "label", &[], "");
        let switch = el(&mut doc, label, "button", &[("role", "switch")], "");
        el(&mut doc, label, "span", &[], "Wi-Fi");
        assert_eq!(accessible_name(&doc, switch), "Wi-Fi");
    }

    #[test]
    fn test_title_fallback_and_empty() {
        let mut doc = Document::new();
        let body = doc.body();
        let div = el(&mut doc, body, "div", &[("title", "Tooltip")], "ignored");
        assert_eq!(accessible_name(&doc, div), "Tooltip");
        let bare = el(&mut doc, body, "button", &[], "");
        assert_eq!(accessible_name(&doc, bare), "");
    }
}
