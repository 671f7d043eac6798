//! Accessibility Audit
//!
//! Rule checks over a rendered subtree. Components never fail on misuse
//! such as a dangling `aria-labelledby`; the audit is where that shows up.

use std::collections::HashMap;

use ally_dom::{Document, NodeId};

use crate::aria::{AriaRole, AriaState, role_of};
use crate::focus::TabIndex;
use crate::name::accessible_name;

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Minor issue, suggestion only
    Info,
    /// Should fix for better accessibility
    Warning,
    /// Must fix - fails WCAG AA
    Error,
    /// Critical - major a11y barrier
    Critical,
}

/// Accessibility issue type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum A11yIssue {
    /// Interactive element missing accessible name
    MissingLabel { node: NodeId, role: AriaRole },
    /// Dialog without a name
    UnlabelledDialog { node: NodeId },
    /// Form field missing label
    FormMissingLabel { node: NodeId, input_type: String },
    /// IDREF attribute pointing at nothing
    BrokenReference { node: NodeId, attribute: String, id: String },
    /// Keyboard-reachable element hidden from assistive technology
    FocusableInHiddenSubtree { node: NodeId },
    /// Same `id` used more than once
    DuplicateId { node: NodeId, id: String },
    /// ARIA attribute with a value outside its grammar
    InvalidState { node: NodeId, attribute: String, value: String },
}

impl A11yIssue {
    /// Get severity of this issue
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::MissingLabel { .. } => IssueSeverity::Error,
            Self::UnlabelledDialog { .. } => IssueSeverity::Error,
            Self::FormMissingLabel { .. } => IssueSeverity::Error,
            Self::BrokenReference { .. } => IssueSeverity::Warning,
            Self::FocusableInHiddenSubtree { .. } => IssueSeverity::Critical,
            Self::DuplicateId { .. } => IssueSeverity::Warning,
            Self::InvalidState { .. } => IssueSeverity::Error,
        }
    }

    /// Get WCAG criteria this affects
    pub fn wcag_criteria(&self) -> &'static str {
        match self {
            Self::MissingLabel { .. } | Self::UnlabelledDialog { .. } => "4.1.2 Name, Role, Value",
            Self::FormMissingLabel { .. } => "1.3.1 Info and Relationships",
            Self::BrokenReference { .. } => "1.3.1 Info and Relationships",
            Self::FocusableInHiddenSubtree { .. } => "4.1.2 Name, Role, Value",
            Self::DuplicateId { .. } => "4.1.1 Parsing",
            Self::InvalidState { .. } => "4.1.2 Name, Role, Value",
        }
    }

    /// Node the issue was found on
    pub fn node(&self) -> NodeId {
        match self {
            Self::MissingLabel { node, .. }
            | Self::UnlabelledDialog { node }
            | Self::FormMissingLabel { node, .. }
            | Self::BrokenReference { node, .. }
            | Self::FocusableInHiddenSubtree { node }
            | Self::DuplicateId { node, .. }
            | Self::InvalidState { node, .. } => *node,
        }
    }
}

const IDREF_ATTRIBUTES: &[&str] = &["aria-labelledby", "aria-describedby", "aria-errormessage"];
const CHECKED_STATES: &[&str] = &["checked", "hidden", "modal", "live", "atomic", "disabled"];

/// Accessibility audit
#[derive(Debug, Default)]
pub struct AccessibilityAudit {
    /// Detected issues
    pub issues: Vec<A11yIssue>,
}

impl AccessibilityAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Audit `root` and everything below it
    pub fn run(doc: &Document, root: NodeId) -> Self {
        let mut audit = Self::new();
        audit.check_subtree(doc, root);
        audit
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: A11yIssue) {
        self.issues.push(issue);
    }

    /// Run every rule over `root` (inclusive)
    pub fn check_subtree(&mut self, doc: &Document, root: NodeId) {
        let nodes: Vec<NodeId> = std::iter::once(root)
            .chain(doc.tree.descendants(root))
            .filter(|&n| doc.tree.element(n).is_some())
            .collect();

        let mut seen_ids: HashMap<&str, NodeId> = HashMap::new();
        for &node in &nodes {
            if let Some(id) = doc.tree.element(node).and_then(|e| e.id()).filter(|id| !id.is_empty()) {
                if seen_ids.insert(id, node).is_some() {
                    self.add_issue(A11yIssue::DuplicateId { node, id: id.to_string() });
                }
            }
            self.check_references(doc, node);
            self.check_states(doc, node);
            if is_exposed(doc, node) {
                self.check_name(doc, node);
            } else {
                self.check_hidden_focusable(doc, node);
            }
        }

        tracing::debug!(%root, issues = self.issues.len(), "accessibility audit finished");
    }

    fn check_references(&mut self, doc: &Document, node: NodeId) {
        for &attribute in IDREF_ATTRIBUTES {
            let Some(value) = doc.tree.get_attribute(node, attribute) else {
                continue;
            };
            for id in value.split_whitespace() {
                if doc.get_element_by_id(id).is_none() {
                    self.add_issue(A11yIssue::BrokenReference {
                        node,
                        attribute: attribute.to_string(),
                        id: id.to_string(),
                    });
                }
            }
        }
        if doc.tree.tag_name(node) == Some("label") {
            if let Some(id) = doc.tree.get_attribute(node, "for") {
                if doc.get_element_by_id(id).is_none() {
                    self.add_issue(A11yIssue::BrokenReference {
                        node,
                        attribute: "for".to_string(),
                        id: id.to_string(),
                    });
                }
            }
        }
    }

    fn check_states(&mut self, doc: &Document, node: NodeId) {
        for &state in CHECKED_STATES {
            let attribute = format!("aria-{state}");
            let Some(value) = doc.tree.get_attribute(node, &attribute) else {
                continue;
            };
            if AriaState::parse(state, value).is_err() {
                self.add_issue(A11yIssue::InvalidState { node, attribute, value: value.to_string() });
            }
        }
    }

    fn check_name(&mut self, doc: &Document, node: NodeId) {
        let Some(role) = role_of(doc, node) else {
            return;
        };
        if !role.requires_name() || !accessible_name(doc, node).is_empty() {
            return;
        }
        let tag = doc.tree.tag_name(node).unwrap_or_default();
        if role.is_dialog() {
            self.add_issue(A11yIssue::UnlabelledDialog { node });
        } else if matches!(tag, "input" | "select" | "textarea") {
            let input_type = doc.tree.get_attribute(node, "type").unwrap_or(tag).to_string();
            self.add_issue(A11yIssue::FormMissingLabel { node, input_type });
        } else {
            self.add_issue(A11yIssue::MissingLabel { node, role });
        }
    }

    fn check_hidden_focusable(&mut self, doc: &Document, node: NodeId) {
        let reachable = doc.is_focusable_area(node)
            && TabIndex::of(doc, node).is_some_and(|t| t.is_sequential());
        let aria_hidden = std::iter::once(node)
            .chain(doc.tree.ancestors(node))
            .any(|n| doc.tree.get_attribute(n, "aria-hidden") == Some("true"));
        if reachable && aria_hidden {
            self.add_issue(A11yIssue::FocusableInHiddenSubtree { node });
        }
    }

    /// Issues at or above `severity`
    pub fn count_at_least(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity() >= severity).count()
    }

    /// Whether any issue is an error or worse
    pub fn has_errors(&self) -> bool {
        self.count_at_least(IssueSeverity::Error) > 0
    }
}

/// Exposed to assistive technology: rendered and not under `aria-hidden`
fn is_exposed(doc: &Document, node: NodeId) -> bool {
    doc.has_layout_box(node)
        && !std::iter::once(node)
            .chain(doc.tree.ancestors(node))
            .any(|n| doc.tree.get_attribute(n, "aria-hidden") == Some("true"))
}
