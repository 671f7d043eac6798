//! Comprehensive tests for ally-a11y
//!
//! Focus queries, naming and the audit over hand-built widget markup.

use ally_a11y::{
    A11yIssue, AccessibilityAudit, AriaRole, FocusOrder, accessible_name, focusable_elements,
    role_of, tabbable_elements,
};
use ally_dom::{Document, NodeId};
use proptest::prelude::*;

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

// ============================================================================
// DIALOG MARKUP
// ============================================================================

fn dialog_markup(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
    let body = doc.body();
    let dialog = el(
        doc,
        body,
        "div",
        &[("role", "dialog"), ("aria-modal", "true"), ("aria-labelledby", "title"), ("tabindex", "-1")],
        "",
    );
    el(doc, dialog, "h2", &[("id", "title")], "Confirm deletion");
    let close = el(doc, dialog, "button", &[("aria-label", "Close dialog")], "");
    el(doc, close, "span", &[("aria-hidden", "true")], "×");
    el(doc, close, "span", &[("class", "sr-only")], "Close");
    let confirm = el(doc, dialog, "button", &[], "Delete");
    (dialog, close, confirm)
}

#[test]
fn test_dialog_markup_is_clean() {
    let mut doc = Document::new();
    let (dialog, close, confirm) = dialog_markup(&mut doc);

    assert_eq!(role_of(&doc, dialog), Some(AriaRole::Dialog));
    assert_eq!(accessible_name(&doc, dialog), "Confirm deletion");
    assert_eq!(accessible_name(&doc, close), "Close dialog");
    assert_eq!(focusable_elements(&doc, dialog, "sr-only"), vec![close, confirm]);

    let audit = AccessibilityAudit::run(&doc, doc.body());
    assert!(audit.issues.is_empty(), "{:?}", audit.issues);
}

#[test]
fn test_dialog_with_dangling_title() {
    let mut doc = Document::new();
    let body = doc.body();
    let dialog = el(&mut doc, body, "div", &[("role", "dialog"), ("aria-labelledby", "nope")], "");

    let audit = AccessibilityAudit::run(&doc, body);
    assert!(audit.issues.contains(&A11yIssue::UnlabelledDialog { node: dialog }));
    assert!(audit.issues.iter().any(|i| matches!(i, A11yIssue::BrokenReference { id, .. } if id == "nope")));
}

// ============================================================================
// FOCUS ORDER
// ============================================================================

#[test]
fn test_display_none_subtree_is_skipped() {
    let mut doc = Document::new();
    let body = doc.body();
    let visible = el(&mut doc, body, "button", &[], "A");
    let wrapper = el(&mut doc, body, "div", &[("style", "display: none")], "");
    el(&mut doc, wrapper, "button", &[], "B");

    assert_eq!(tabbable_elements(&doc, doc.tree.root()), vec![visible]);
    assert_eq!(focusable_elements(&doc, body, "sr-only"), vec![visible]);
}

proptest! {
    #[test]
    fn prop_focus_order_cycles(n in 1usize..8, steps in 0usize..20) {
        let mut doc = Document::new();
        let body = doc.body();
        let buttons: Vec<NodeId> = (0..n).map(|_| el(&mut doc, body, "button", &[], "x")).collect();
        let order = FocusOrder::new(focusable_elements(&doc, body, "sr-only"));

        let mut current = buttons[0];
        for _ in 0..steps {
            current = order.next(current).unwrap();
        }
        prop_assert_eq!(current, buttons[steps % n]);

        for _ in 0..steps {
            current = order.prev(current).unwrap();
        }
        prop_assert_eq!(current, buttons[0]);
    }
}
