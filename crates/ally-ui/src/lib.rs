//! Ally UI
//!
//! Accessible UI components rendered into the Ally DOM.
//!
//! Features:
//! - Button, Link, Checkbox, Switch, TextField
//! - Toast notifications with a live region and auto-dismiss timers
//! - Modal dialog with focus trap, background isolation and
//!   outside-click dismissal
//! - JSON-loadable defaults for labels and timings

pub mod button;
pub mod checkbox;
pub mod component;
pub mod config;
pub mod element;
pub mod link;
pub mod modal;
pub mod switch;
pub mod text_field;
pub mod toast;

pub use button::{Button, ButtonVariant};
pub use checkbox::Checkbox;
pub use component::{Callback, Component, Mounted, Size, cn};
pub use config::{ConfigError, ModalConfig, ToastConfig, UiConfig};
pub use element::{El, Text};
pub use link::{IconPosition, Link, LinkVariant, looks_external};
pub use modal::{
    BackgroundIsolation, FocusTrap, FooterButton, HiddenSiblingRecord, ModalContent, ModalFooter, ModalHeader,
    ModalOverlay, ModalRoot, ModalTitle, PreviousAriaHidden, ScrollLock,
};
pub use switch::Switch;
pub use text_field::TextField;
pub use toast::{Toast, ToastAction, ToastContainer, ToastData, ToastOptions, ToastPosition, ToastType, Toaster};

// Re-export the host so callers need only this crate
pub use ally_dom::{Document, Key, KeyModifiers, NodeId};
pub use ally_runtime::Host;
