//! Checkbox
//!
//! Native checkbox wrapped in its label, with a decorative visual box and
//! optional helper or error text wired up through `aria-describedby`.
//! The component is controlled: clicks report the requested state through
//! `on_checked_change` and the caller re-renders.

use ally_a11y::{AriaState, TriState};
use ally_dom::{EventKind, NodeId};
use ally_runtime::Host;

use crate::component::{Callback, Component, Mounted, cn};
use crate::element::El;

const CHECK_MARK: &str = "✓";
const MIXED_MARK: &str = "−";

#[derive(Debug, Default)]
pub struct Checkbox {
    label: Option<String>,
    checked: bool,
    indeterminate: bool,
    disabled: bool,
    error: Option<String>,
    helper_text: Option<String>,
    id: Option<String>,
    name: Option<String>,
    value: Option<String>,
    aria_describedby: Option<String>,
    class: Option<String>,
    on_checked_change: Option<Callback<bool>>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    /// Checkbox without visible text; give it an accessible name another way
    pub fn unlabelled() -> Self {
        Self::default()
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn helper_text(mut self, helper: impl Into<String>) -> Self {
        self.helper_text = Some(helper.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Used when neither an error nor helper text is shown
    pub fn aria_describedby(mut self, ids: impl Into<String>) -> Self {
        self.aria_describedby = Some(ids.into());
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

    /// State reported to assistive technology
    pub fn tri_state(&self) -> TriState {
        TriState::from_checked(self.checked, self.indeterminate)
    }

    /// Value emitted by a click: a mixed box becomes checked
    pub fn next_checked(&self) -> bool {
        !(self.checked && !self.indeterminate)
    }

    fn visual_box(&self) -> El {
        let class = cn(&[
            Some("ally-checkbox__box"),
            (self.checked && !self.indeterminate).then_some("ally-checkbox__box--checked"),
            self.indeterminate.then_some("ally-checkbox__box--indeterminate"),
            self.error.is_some().then_some("ally-checkbox__box--error"),
            self.disabled.then_some("ally-checkbox__box--disabled"),
        ]);
        let mark = if self.indeterminate {
            Some(MIXED_MARK)
        } else if self.checked {
            Some(CHECK_MARK)
        } else {
            None
        };
        El::new("span")
            .class(class)
            .attr("aria-hidden", "true")
            .child_opt(mark.map(|m| El::new("span").class("ally-checkbox__mark").text(m)))
    }
}

impl Component for Checkbox {
    fn name(&self) -> &'static str {
        "Checkbox"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let id = self.id.clone().unwrap_or_else(|| host.next_id("checkbox"));
        let error_id = format!("{id}-error");
        let helper_id = format!("{id}-helper");
        let helper = self.helper_text.as_deref().filter(|_| self.error.is_none());

        let describedby = if self.error.is_some() {
            Some(error_id.clone())
        } else if helper.is_some() {
            Some(helper_id.clone())
        } else {
            self.aria_describedby.clone()
        };

        let input = El::new("input")
            .attr("type", "checkbox")
            .id(&id)
            .class("ally-checkbox__input")
            .attr_opt("name", self.name.clone())
            .attr_opt("value", self.value.clone())
            .flag("checked", self.checked && !self.indeterminate)
            .flag("disabled", self.disabled)
            .aria(AriaState::Checked(self.tri_state()))
            .attr_opt("aria-invalid", self.error.as_ref().map(|_| "true"))
            .attr_opt("aria-describedby", describedby)
            .attr_opt("aria-errormessage", self.error.as_ref().map(|_| error_id.clone()));

        let label = El::new("label")
            .attr("for", id.as_str())
            .class("ally-checkbox__label")
            .child(input)
            .child(self.visual_box())
            .child_opt(
                self.label
                    .as_deref()
                    .map(|text| El::new("span").class("ally-checkbox__text").text(text)),
            );

        let container_class = cn(&[
            Some("ally-checkbox"),
            self.disabled.then_some("ally-checkbox--disabled"),
            self.class.as_deref(),
        ]);
        let mut container = El::new("div").class(container_class).child(label);
        if let Some(error) = &self.error {
            container = container.child(
                El::new("span")
                    .id(&error_id)
                    .class("ally-checkbox__error")
                    .attr("role", "alert")
                    .text(error.as_str()),
            );
        } else if let Some(helper) = helper {
            container = container.child(
                El::new("span")
                    .id(&helper_id)
                    .class("ally-checkbox__helper")
                    .text(helper),
            );
        }

        let mut mounted = container.mount(host, parent);
        let tree = &host.document.tree;
        let Some(input_node) = tree
            .descendants(mounted.root())
            .into_iter()
            .find(|&n| tree.tag_name(n) == Some("input"))
        else {
            return mounted;
        };
        if let Some(on_change) = self.on_checked_change.clone() {
            let disabled = self.disabled;
            let next = self.next_checked();
            mounted.add_guard(host.on_node(input_node, EventKind::Click, move |host, _| {
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
    use ally_a11y::accessible_name;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn input_of(host: &Host, id: &str) -> NodeId {
        host.document.get_element_by_id(id).unwrap()
    }

    #[test]
    fn test_states() {
        let cases = [
            (false, false, "false", false),
            (true, false, "true", true),
            (true, true, "mixed", false),
            (false, true, "mixed", false),
        ];
        for (checked, indeterminate, aria, attr) in cases {
            let mut host = Host::new();
            let body = host.document.body();
            let _cb = Checkbox::new("Accept")
                .id("cb")
                .checked(checked)
                .indeterminate(indeterminate)
                .mount(&mut host, body);
            let input = input_of(&host, "cb");
            assert_eq!(host.document.tree.get_attribute(input, "aria-checked"), Some(aria));
            assert_eq!(host.document.tree.has_attribute(input, "checked"), attr);
        }
    }

    #[test]
    fn test_label_names_input() {
        let mut host = Host::new();
        let body = host.document.body();
        let _cb = Checkbox::new("Subscribe").checked(true).mount(&mut host, body);
        let input = host
            .document
            .tree
            .descendants(body)
            .into_iter()
            .find(|&n| host.document.tree.tag_name(n) == Some("input"))
            .unwrap();
        assert_eq!(host.document.tree.get_attribute(input, "id"), Some("checkbox-1"));
        assert_eq!(accessible_name(&host.document, input), "Subscribe");
    }

    #[test]
    fn test_error_wins_over_helper() {
        let mut host = Host::new();
        let body = host.document.body();
        let _cb = Checkbox::new("Terms")
            .id("terms")
            .error("Required")
            .helper_text("Read them first")
            .aria_describedby("elsewhere")
            .mount(&mut host, body);
        let input = input_of(&host, "terms");
        let tree = &host.document.tree;
        assert_eq!(tree.get_attribute(input, "aria-describedby"), Some("terms-error"));
        assert_eq!(tree.get_attribute(input, "aria-errormessage"), Some("terms-error"));
        assert_eq!(tree.get_attribute(input, "aria-invalid"), Some("true"));
        let error = host.document.get_element_by_id("terms-error").unwrap();
        assert_eq!(tree.get_attribute(error, "role"), Some("alert"));
        assert!(host.document.get_element_by_id("terms-helper").is_none());
    }

    #[test]
    fn test_describedby_fallbacks() {
        let mut host = Host::new();
        let body = host.document.body();
        let _a = Checkbox::new("A").id("a").helper_text("hint").mount(&mut host, body);
        let _b = Checkbox::new("B").id("b").aria_describedby("note").mount(&mut host, body);
        let tree = &host.document.tree;
        assert_eq!(tree.get_attribute(input_of(&host, "a"), "aria-describedby"), Some("a-helper"));
        assert_eq!(tree.get_attribute(input_of(&host, "b"), "aria-describedby"), Some("note"));
        assert!(!tree.has_attribute(input_of(&host, "b"), "aria-invalid"));
    }

    #[test]
    fn test_click_reports_next_state() {
        let mut host = Host::new();
        let body = host.document.body();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut mounts = Vec::new();

        for (id, checked, indeterminate) in [("off", false, false), ("on", true, false), ("mixed", true, true)] {
            let s = Rc::clone(&seen);
            let mounted = Checkbox::new(id)
                .id(id)
                .checked(checked)
                .indeterminate(indeterminate)
                .on_checked_change(move |_: &mut Host, next: bool| s.borrow_mut().push(next))
                .mount(&mut host, body);
            host.click(input_of(&host, id));
            mounts.push(mounted);
        }
        assert_eq!(*seen.borrow(), vec![true, false, true]);
    }

    #[test]
    fn test_label_click_and_space_toggle() {
        let mut host = Host::new();
        let body = host.document.body();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let mounted = Checkbox::new("Remember me")
            .id("remember")
            .on_checked_change(move |_: &mut Host, next: bool| s.borrow_mut().push(next))
            .mount(&mut host, body);

        let label = host.document.tree.element_children(mounted.root())[0];
        let text = host.document.tree.element_children(label)[2];
        host.click(text);
        assert_eq!(*seen.borrow(), vec![true]);
        assert_eq!(host.active_element(), input_of(&host, "remember"));

        host.press_key(ally_dom::Key::Space, ally_dom::KeyModifiers::NONE);
        assert_eq!(*seen.borrow(), vec![true, true]);
    }

    #[test]
    fn test_disabled_never_reports() {
        let mut host = Host::new();
        let body = host.document.body();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let mounted = Checkbox::new("Locked")
            .id("locked")
            .disabled(true)
            .on_checked_change(move |_: &mut Host, next: bool| s.borrow_mut().push(next))
            .mount(&mut host, body);
        host.click(input_of(&host, "locked"));
        let label = host.document.tree.element_children(mounted.root())[0];
        host.click(label);
        assert!(seen.borrow().is_empty());
        assert!(host.document.tree.has_class(mounted.root(), "ally-checkbox--disabled"));
    }
}
