//! Switch
//!
//! `role="switch"` button inside a label. A named switch also renders a
//! hidden checkbox so the value takes part in form submission.

use ally_a11y::{AriaRole, AriaState, TriState};
use ally_dom::{EventKind, NodeId};
use ally_runtime::Host;

use crate::component::{Callback, Component, Mounted, Size, cn};
use crate::element::El;

#[derive(Debug, Default)]
pub struct Switch {
    label: Option<String>,
    checked: bool,
    disabled: bool,
    size: Size,
    id: Option<String>,
    name: Option<String>,
    value: Option<String>,
    class: Option<String>,
    on_checked_change: Option<Callback<bool>>,
}

impl Switch {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Form field name; enables the hidden form input
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Submitted value, `on` when unset
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn on_checked_change(mut self, on_change: impl Into<Callback<bool>>) -> Self {
        self.on_checked_change = Some(on_change.into());
        self
    }

    fn form_input(&self, name: &str) -> El {
        El::new("input")
            .attr("type", "checkbox")
            .attr("name", name)
            .attr("value", self.value.as_deref().unwrap_or("on"))
            .flag("checked", self.checked)
            .flag("readonly", true)
            .style("display: none")
            .attr("aria-hidden", "true")
            .attr("tabindex", "-1")
    }
}

impl Component for Switch {
    fn name(&self) -> &'static str {
        "Switch"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let size = format!("ally-switch--{}", self.size.as_str());
        let container_class = cn(&[
            Some("ally-switch"),
            Some(&size),
            self.checked.then_some("ally-switch--checked"),
            self.disabled.then_some("ally-switch--disabled"),
            self.class.as_deref(),
        ]);
        let track_class = cn(&[
            Some("ally-switch__track"),
            self.checked.then_some("ally-switch__track--checked"),
        ]);

        let track = El::new("button")
            .attr("type", "button")
            .attr("role", AriaRole::Switch.as_str())
            .attr_opt("id", self.id.clone())
            .class(track_class)
            .aria(AriaState::Checked(TriState::from(self.checked)))
            .flag("disabled", self.disabled)
            .child(El::new("span").class("ally-switch__thumb"));

        let el = El::new("label")
            .class(container_class)
            .attr_opt("aria-disabled", self.disabled.then_some("true"))
            .child(track)
            .child_opt(self.name.as_deref().map(|name| self.form_input(name)))
            .child_opt(
                self.label
                    .as_deref()
                    .map(|text| El::new("span").class("ally-switch__label").text(text)),
            );

        let mut mounted = el.mount(host, parent);
        let Some(button) = host.document.tree.element_children(mounted.root()).first().copied() else {
            return mounted;
        };
        if let Some(on_change) = self.on_checked_change.clone() {
            let disabled = self.disabled;
            let next = !self.checked;
            mounted.add_guard(host.on_node(button, EventKind::Click, move |host, _| {
                if !disabled {
                    on_change.call(host, next);
                }
            }));
        }
        mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_a11y::{AccessibilityAudit, accessible_name, role_of};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn track(host: &Host, mounted: &Mounted) -> NodeId {
        host.document.tree.element_children(mounted.root())[0]
    }

    #[test]
    fn test_markup_and_name() {
        let mut host = Host::new();
        let body = host.document.body();
        let mounted = Switch::new("Dark mode").checked(true).mount(&mut host, body);
        let button = track(&host, &mounted);
        let tree = &host.document.tree;
        assert_eq!(role_of(&host.document, button), Some(AriaRole::Switch));
        assert_eq!(tree.get_attribute(button, "aria-checked"), Some("true"));
        assert!(!tree.has_attribute(mounted.root(), "aria-disabled"));
        assert_eq!(accessible_name(&host.document, button), "Dark mode");
        assert!(AccessibilityAudit::run(&host.document, body).issues.is_empty());
    }

    #[test]
    fn test_hidden_form_input() {
        let mut host = Host::new();
        let body = host.document.body();
        let mounted = Switch::new("Alerts").name("alerts").mount(&mut host, body);
        let tree = &host.document.tree;
        let input = tree.element_children(mounted.root())[1];
        assert_eq!(tree.get_attribute(input, "value"), Some("on"));
        assert_eq!(tree.get_attribute(input, "aria-hidden"), Some("true"));
        assert!(!tree.has_attribute(input, "checked"));
        assert!(!host.document.has_layout_box(input));
    }

    #[test]
    fn test_click_toggles_once() {
        let mut host = Host::new();
        let body = host.document.body();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let mounted = Switch::new("Wi-Fi")
            .checked(true)
            .name("wifi")
            .on_checked_change(move |_: &mut Host, next: bool| s.borrow_mut().push(next))
            .mount(&mut host, body);

        host.click(track(&host, &mounted));
        assert_eq!(*seen.borrow(), vec![false]);

        let text = *host.document.tree.element_children(mounted.root()).last().unwrap();
        host.click(text);
        assert_eq!(*seen.borrow(), vec![false, false]);
        assert_eq!(host.active_element(), track(&host, &mounted));
    }

    #[test]
    fn test_disabled() {
        let mut host = Host::new();
        let body = host.document.body();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let mounted = Switch::new("Locked")
            .disabled(true)
            .on_checked_change(move |_: &mut Host, next: bool| s.borrow_mut().push(next))
            .mount(&mut host, body);
        assert_eq!(host.document.tree.get_attribute(mounted.root(), "aria-disabled"), Some("true"));
        host.click(track(&host, &mounted));
        host.click(mounted.root());
        assert!(seen.borrow().is_empty());
    }
}
