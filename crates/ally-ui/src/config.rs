//! UI Configuration
//!
//! Default labels and timings shared by the components. Every field has a
//! default, so a JSON document only needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::toast::ToastPosition;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid UI configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Library-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Modal labels and behavior
    pub modal: ModalConfig,

    /// Toast timing and labels
    pub toast: ToastConfig,

    /// Class marking visually hidden, screen-reader-only text
    pub sr_only_class: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            modal: ModalConfig::default(),
            toast: ToastConfig::default(),
            sr_only_class: "sr-only".to_string(),
        }
    }
}

impl UiConfig {
    /// Load overrides from JSON on top of the defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(json)?;
        tracing::debug!(?config, "UI configuration loaded");
        Ok(config)
    }
}

/// Modal configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Default cancel control label
    pub cancel_label: String,

    /// Default confirm control label
    pub confirm_label: String,

    /// `aria-label` of the close control
    pub close_label: String,

    /// Screen-reader-only text inside the close control
    pub close_sr_text: String,

    /// Lock body scrolling while open
    pub lock_scroll: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            cancel_label: "Cancel".to_string(),
            confirm_label: "Confirm".to_string(),
            close_label: "Close dialog".to_string(),
            close_sr_text: "Close".to_string(),
            lock_scroll: true,
        }
    }
}

/// Toast configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Auto-dismiss delay when a toast does not set one (ms)
    pub default_duration_ms: u64,

    /// Time between starting the exit and removal (ms)
    pub exit_delay_ms: u64,

    /// Screen corner/edge toasts stack in
    pub default_position: ToastPosition,

    /// `aria-label` of the close control
    pub close_label: String,

    /// Screen-reader-only text inside the close control
    pub close_sr_text: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 5000,
            exit_delay_ms: 200,
            default_position: ToastPosition::TopRight,
            close_label: "Close notification".to_string(),
            close_sr_text: "Close".to_string(),
        }
    }
}
