//! Toast manager

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use ally_runtime::Host;

use super::{Toast, ToastData, ToastOptions, ToastPosition};
use crate::component::{Callback, Component, Mounted};
use crate::config::UiConfig;

struct ActiveToast {
    data: ToastData,
    mounted: Mounted,
}

struct ToasterInner {
    config: UiConfig,
    position: ToastPosition,
    toasts: Vec<ActiveToast>,
    next_id: u64,
}

/// Owns the active toasts and renders them into the document body.
///
/// Cloning yields another handle to the same list.
#[derive(Clone)]
pub struct Toaster {
    inner: Rc<RefCell<ToasterInner>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::with_config(&UiConfig::default())
    }

    pub fn with_config(config: &UiConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ToasterInner {
                config: config.clone(),
                position: config.toast.default_position,
                toasts: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Position used for toasts added from now on
    pub fn set_position(&self, position: ToastPosition) {
        self.inner.borrow_mut().position = position;
    }

    pub fn position(&self) -> ToastPosition {
        self.inner.borrow().position
    }

    /// Show a toast and return its id
    pub fn add_toast(&self, host: &mut Host, options: ToastOptions) -> String {
        let (toast, id) = {
            let mut inner = self.inner.borrow_mut();
            let id = match options.id.clone() {
                Some(id) => id,
                None => {
                    inner.next_id += 1;
                    format!("toast-{}", inner.next_id)
                }
            };
            let data = ToastData::from_options(options, id.clone(), inner.config.toast.default_duration_ms);
            let weak = Rc::downgrade(&self.inner);
            let toast = Toast::new(data, Callback::new(move |host: &mut Host, id: String| {
                remove_weak(&weak, host, &id);
            }))
            .position(inner.position)
            .with_config(&inner.config.toast)
            .sr_only_class(inner.config.sr_only_class.clone());
            (toast, id)
        };

        let body = host.document.body();
        let mounted = toast.mount(host, body);
        self.inner.borrow_mut().toasts.push(ActiveToast {
            data: toast.data().clone(),
            mounted,
        });
        tracing::debug!(%id, "toast added");
        id
    }

    /// Remove every toast carrying `id` now, calling each `on_close`.
    /// Returns false for unknown ids.
    pub fn remove_toast(&self, host: &mut Host, id: &str) -> bool {
        let removed: Vec<ActiveToast> = {
            let mut inner = self.inner.borrow_mut();
            let (removed, kept) = std::mem::take(&mut inner.toasts)
                .into_iter()
                .partition(|t| t.data.id == id);
            inner.toasts = kept;
            removed
        };
        if removed.is_empty() {
            tracing::debug!(%id, "remove_toast: no such toast");
            return false;
        }
        if removed.len() > 1 {
            tracing::debug!(%id, count = removed.len(), "removing toasts sharing an id");
        }
        for toast in removed {
            finish(host, toast);
        }
        true
    }

    /// Remove every toast, calling each `on_close` in display order
    pub fn clear_all(&self, host: &mut Host) {
        let removed = std::mem::take(&mut self.inner.borrow_mut().toasts);
        tracing::debug!(count = removed.len(), "clearing toasts");
        for toast in removed {
            finish(host, toast);
        }
    }

    /// Snapshot of the active toasts, oldest first
    pub fn toasts(&self) -> Vec<ToastData> {
        self.inner.borrow().toasts.iter().map(|t| t.data.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn remove_weak(inner: &Weak<RefCell<ToasterInner>>, host: &mut Host, id: &str) {
    if let Some(inner) = inner.upgrade() {
        Toaster { inner }.remove_toast(host, id);
    }
}

fn finish(host: &mut Host, toast: ActiveToast) {
    let ActiveToast { data, mounted } = toast;
    mounted.unmount(host);
    if let Some(on_close) = data.on_close {
        on_close.call(host, ());
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Toaster")
            .field("position", &inner.position)
            .field("toasts", &inner.toasts.len())
            .finish()
    }
}
