//! Focus trap
//!
//! While active, keyboard focus cannot leave the content region: Tab and
//! Shift+Tab wrap around its focusable elements and Escape requests a
//! close. Page scrolling is locked for the duration, and focus goes back
//! to whatever held it before activation once the trap is released.

use ally_a11y::focusable_elements;
use ally_dom::{EventKind, Key, NodeId, UiEvent};
use ally_runtime::{Host, LayerId, ListenerGuard, TaskHandle};

use crate::component::Callback;

/// Body scroll lock. Remembers the inline `overflow` and `padding-right`
/// it replaced and puts them back on release.
#[derive(Debug)]
pub struct ScrollLock {
    body: NodeId,
    overflow: Option<String>,
    padding_right: Option<String>,
}

impl ScrollLock {
    pub fn acquire(host: &mut Host) -> Self {
        let body = host.document.body();
        let style = host.document.tree.style(body);
        let lock = Self {
            body,
            overflow: style.get_property_value("overflow").map(str::to_string),
            padding_right: style.get_property_value("padding-right").map(str::to_string),
        };

        let scrollbar = host.document.viewport.scrollbar_width();
        let tree = &mut host.document.tree;
        if scrollbar > 0 {
            let _ = tree.set_style_property(body, "padding-right", &format!("{scrollbar}px"));
        }
        let _ = tree.set_style_property(body, "overflow", "hidden");
        tracing::trace!(scrollbar, "scroll locked");
        lock
    }

    pub fn release(self, host: &mut Host) {
        let tree = &mut host.document.tree;
        for (name, previous) in [("overflow", self.overflow), ("padding-right", self.padding_right)] {
            let _ = match previous {
                Some(value) => tree.set_style_property(self.body, name, &value),
                None => tree.remove_style_property(self.body, name).map(|_| ()),
            };
        }
        tracing::trace!("scroll unlocked");
    }
}

#[derive(Debug)]
struct ActiveTrap {
    trigger: NodeId,
    scroll: Option<ScrollLock>,
    _keydown: ListenerGuard,
}

/// Focus trap over one content region
#[derive(Debug)]
pub struct FocusTrap {
    content: NodeId,
    layer: Option<LayerId>,
    sr_only_class: String,
    lock_scroll: bool,
    active: Option<ActiveTrap>,
    restore: Option<TaskHandle>,
}

impl FocusTrap {
    pub fn new(content: NodeId) -> Self {
        Self {
            content,
            layer: None,
            sr_only_class: "sr-only".to_string(),
            lock_scroll: true,
            active: None,
            restore: None,
        }
    }

    /// Only react to keys while `layer` is the topmost overlay
    pub fn with_layer(mut self, layer: LayerId) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn sr_only_class(mut self, class: impl Into<String>) -> Self {
        self.sr_only_class = class.into();
        self
    }

    pub fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Element focus will return to, while active
    pub fn trigger(&self) -> Option<NodeId> {
        self.active.as_ref().map(|a| a.trigger)
    }

    pub fn activate(&mut self, host: &mut Host, on_close: Callback) {
        if self.active.is_some() {
            return;
        }
        if let Some(restore) = self.restore.take() {
            restore.cancel();
        }

        let trigger = host.active_element();
        let scroll = self.lock_scroll.then(|| ScrollLock::acquire(host));

        let content = self.content;
        let layer = self.layer;
        let sr_only_class = self.sr_only_class.clone();
        let keydown = host.on_document(EventKind::KeyDown, move |host, ev| {
            if layer.is_some_and(|layer| !host.layers.is_top(layer)) {
                return;
            }
            let Some((key, shift)) = ev.as_key().map(|k| (k.key.clone(), k.modifiers.shift)) else {
                return;
            };
            match key {
                Key::Escape => {
                    ev.prevent_default();
                    on_close.call(host, ());
                }
                Key::Tab => wrap_tab(host, ev, content, &sr_only_class, shift),
                _ => {}
            }
        });

        let initial = focusable_elements(&host.document, content, &self.sr_only_class)
            .first()
            .copied()
            .unwrap_or(content);
        host.focus(initial);
        tracing::debug!(%content, %trigger, %initial, "focus trap activated");

        self.active = Some(ActiveTrap {
            trigger,
            scroll,
            _keydown: keydown,
        });
    }

    pub fn deactivate(&mut self, host: &mut Host) {
        let Some(active) = self.active.take() else {
            return;
        };
        let ActiveTrap { trigger, scroll, _keydown: keydown } = active;
        drop(keydown);
        if let Some(scroll) = scroll {
            scroll.release(host);
        }

        self.restore = Some(host.defer(move |host| {
            if host.document.is_connected(trigger) {
                host.focus(trigger);
            } else {
                tracing::trace!(%trigger, "trigger left the document; focus not restored");
            }
        }));
        tracing::debug!(content = %self.content, "focus trap deactivated");
    }
}

impl Drop for FocusTrap {
    fn drop(&mut self) {
        // the restore tick must still run after the modal is gone
        if let Some(restore) = self.restore.take() {
            restore.detach();
        }
    }
}

/// Tab handling inside an active trap
fn wrap_tab(host: &mut Host, ev: &mut UiEvent, content: NodeId, sr_only_class: &str, backwards: bool) {
    let focusable = focusable_elements(&host.document, content, sr_only_class);
    let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
        ev.prevent_default();
        return;
    };
    let active = host.active_element();

    if !host.document.tree.contains(content, active) {
        ev.prevent_default();
        host.focus(first);
    } else if backwards {
        if active == first || active == content {
            ev.prevent_default();
            host.focus(last);
        }
    } else if active == last || active == content {
        ev.prevent_default();
        host.focus(first);
    }
}
