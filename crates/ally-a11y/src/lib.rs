//! Ally Accessibility
//!
//! Accessibility semantics over the Ally DOM.
//!
//! Features:
//! - ARIA roles, states and live-region politeness
//! - Tab-index parsing and the focusable-set query used by focus traps
//! - Accessible-name computation
//! - Rule-based audit of a rendered subtree

pub mod aria;
pub mod audit;
pub mod focus;
pub mod live_region;
pub mod name;

pub use aria::{AriaRole, AriaState, LiveRegionMode, TriState, role_of};
pub use audit::{A11yIssue, AccessibilityAudit, IssueSeverity};
pub use focus::{FocusOrder, TabIndex, focusable_elements, is_focusable_candidate, tabbable_elements};
pub use live_region::LiveRegionConfig;
pub use name::accessible_name;

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("invalid ARIA role: {0}")]
    InvalidRole(String),

    #[error("invalid value {value:?} for {attribute}")]
    InvalidState { attribute: String, value: String },
}
