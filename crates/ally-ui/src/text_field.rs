//! Text field

use ally_dom::NodeId;
use ally_runtime::Host;

use crate::component::{Component, Mounted, cn};
use crate::element::El;

/// Labelled text input with helper or error text
#[derive(Debug, Default)]
pub struct TextField {
    label: String,
    id: Option<String>,
    input_type: Option<String>,
    name: Option<String>,
    value: Option<String>,
    placeholder: Option<String>,
    required: bool,
    disabled: bool,
    error: Option<String>,
    helper_text: Option<String>,
    class: Option<String>,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// `type` attribute, `text` when unset
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
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

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
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

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

impl Component for TextField {
    fn name(&self) -> &'static str {
        "TextField"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let id = self.id.clone().unwrap_or_else(|| host.next_id("text-field"));
        let error_id = format!("{id}-error");
        let helper_id = format!("{id}-helper");
        let helper = self.helper_text.as_deref().filter(|_| self.error.is_none());
        let describedby = match (&self.error, helper) {
            (Some(_), _) => Some(error_id.clone()),
            (None, Some(_)) => Some(helper_id.clone()),
            (None, None) => None,
        };

        let input = El::new("input")
            .id(&id)
            .attr("type", self.input_type.as_deref().unwrap_or("text"))
            .class(cn(&[
                Some("ally-text-field__input"),
                self.error.is_some().then_some("ally-text-field__input--error"),
            ]))
            .attr_opt("name", self.name.clone())
            .attr_opt("value", self.value.clone())
            .attr_opt("placeholder", self.placeholder.clone())
            .flag("required", self.required)
            .flag("disabled", self.disabled)
            .attr("aria-invalid", if self.error.is_some() { "true" } else { "false" })
            .attr_opt("aria-describedby", describedby);

        let mut el = El::new("div")
            .class(cn(&[Some("ally-text-field"), self.class.as_deref()]))
            .child(
                El::new("label")
                    .attr("for", id.as_str())
                    .class("ally-text-field__label")
                    .text(self.label.as_str()),
            )
            .child(El::new("div").class("ally-text-field__wrapper").child(input));

        if let Some(error) = &self.error {
            el = el.child(
                El::new("span")
                    .id(&error_id)
                    .class("ally-text-field__error")
                    .attr("role", "alert")
                    .text(error.as_str()),
            );
        } else if let Some(helper) = helper {
            el = el.child(
                El::new("span")
                    .id(&helper_id)
                    .class("ally-text-field__helper")
                    .text(helper),
            );
        }
        el.mount(host, parent)
    }
}
