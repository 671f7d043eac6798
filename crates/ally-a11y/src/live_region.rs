//! Live Region Support
//!
//! Announcement settings for containers whose content changes after
//! mount, such as toasts.

use ally_dom::{DomResult, DomTree, NodeId};

use crate::aria::{AriaRole, LiveRegionMode};

/// How a live container announces its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiveRegionConfig {
    /// Off, polite or assertive
    pub politeness: LiveRegionMode,
    /// Announce the whole container rather than the changed part
    pub atomic: bool,
}

impl LiveRegionConfig {
    /// Announced when the user is idle
    pub fn polite() -> Self {
        Self {
            politeness: LiveRegionMode::Polite,
            ..Default::default()
        }
    }

    /// Interrupts the user
    pub fn assertive() -> Self {
        Self {
            politeness: LiveRegionMode::Assertive,
            ..Default::default()
        }
    }

    /// Set atomic mode
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Role carrying the same politeness implicitly
    pub fn role(&self) -> Option<AriaRole> {
        match self.politeness {
            LiveRegionMode::Assertive => Some(AriaRole::Alert),
            LiveRegionMode::Polite => Some(AriaRole::Status),
            LiveRegionMode::Off => None,
        }
    }

    /// Write `role`, `aria-live` and `aria-atomic` onto an element
    pub fn apply(&self, tree: &mut DomTree, node: NodeId) -> DomResult<()> {
        if let Some(role) = self.role() {
            tree.set_attribute(node, "role", role.as_str())?;
        }
        tree.set_attribute(node, "aria-live", self.politeness.as_str())?;
        tree.set_attribute(node, "aria-atomic", if self.atomic { "true" } else { "false" })?;
        Ok(())
    }
}
