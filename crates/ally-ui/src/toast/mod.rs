//! Toast notifications
//!
//! Transient messages announced through a live region. `Toaster` owns the
//! list of active toasts and renders each one into the document body;
//! `Toast` is the single-notification view and `ToastContainer` renders a
//! caller-owned list.
//!
//! Each toast becomes visible one tick after mounting, starts its exit
//! after `duration` ms (never when the duration is 0) and asks to be
//! removed `exit_delay_ms` later. Every timer belongs to the mounted view,
//! so unmounting a toast cancels whatever it still had scheduled.

mod container;
mod toaster;
mod view;

use serde::{Deserialize, Serialize};

use crate::component::Callback;

pub use container::ToastContainer;
pub use toaster::Toaster;
pub use view::Toast;

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastType {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Errors interrupt; everything else waits for a pause
    pub fn is_assertive(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Screen edge or corner toasts stack in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ToastPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }
}

/// Button rendered next to the message
#[derive(Debug, Clone)]
pub struct ToastAction {
    pub label: String,
    pub on_click: Callback,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, on_click: impl Into<Callback>) -> Self {
        Self {
            label: label.into(),
            on_click: on_click.into(),
        }
    }
}

/// What a caller asks for when adding a toast
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    /// Generated when absent
    pub id: Option<String>,
    pub toast_type: ToastType,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Auto-dismiss delay in ms; `None` uses the configured default and
    /// `Some(0)` keeps the toast until it is closed
    pub duration: Option<u64>,
    pub action: Option<ToastAction>,
    /// Called once when the toast is removed
    pub on_close: Option<Callback>,
}

impl ToastOptions {
    pub fn new(toast_type: ToastType) -> Self {
        Self {
            toast_type,
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration(mut self, ms: u64) -> Self {
        self.duration = Some(ms);
        self
    }

    /// Keep the toast until it is closed
    pub fn persistent(self) -> Self {
        self.duration(0)
    }

    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn on_close(mut self, on_close: impl Into<Callback>) -> Self {
        self.on_close = Some(on_close.into());
        self
    }
}

/// An active toast with every default resolved
#[derive(Debug, Clone)]
pub struct ToastData {
    pub id: String,
    pub toast_type: ToastType,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Auto-dismiss delay in ms; 0 disables it
    pub duration: u64,
    pub action: Option<ToastAction>,
    pub on_close: Option<Callback>,
}

impl ToastData {
    /// Resolve options against the default duration
    pub fn from_options(options: ToastOptions, id: String, default_duration_ms: u64) -> Self {
        Self {
            id,
            toast_type: options.toast_type,
            title: options.title,
            description: options.description,
            duration: options.duration.unwrap_or(default_duration_ms),
            action: options.action,
            on_close: options.on_close,
        }
    }

    pub fn title_id(&self) -> String {
        format!("toast-title-{}", self.id)
    }

    pub fn description_id(&self) -> String {
        format!("toast-description-{}", self.id)
    }
}
