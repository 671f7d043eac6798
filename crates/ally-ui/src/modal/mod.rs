//! Modal dialog
//!
//! `ModalRoot` renders a portal container into the document body while
//! open: the overlay, then the `ModalContent` dialog region. Opening
//! activates three behaviors, each torn down on close:
//!
//! - a focus trap with Escape handling and body scroll lock
//! - background isolation (`aria-hidden` on the rest of the page)
//! - outside-click dismissal
//!
//! Several modals may be open at once. Each pushes a layer on the host's
//! layer stack and only the topmost one reacts to keys and pointer presses.
//! Background restoration is exact when modals close in reverse opening
//! order.

mod focus_trap;
mod isolation;
mod outside_click;
mod parts;
mod root;

pub use focus_trap::{FocusTrap, ScrollLock};
pub use isolation::{BackgroundIsolation, HiddenSiblingRecord, PreviousAriaHidden, hide_siblings, restore_siblings};
pub use outside_click::on_outside_click;
pub use parts::{FooterButton, ModalContent, ModalFooter, ModalHeader, ModalOverlay, ModalTitle};
pub use root::ModalRoot;
