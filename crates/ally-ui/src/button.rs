//! Button

use ally_dom::{EventKind, NodeId};
use ally_runtime::Host;

use crate::component::{Callback, Component, Mounted, Size, cn};
use crate::element::El;

/// Button visual variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Outline => "outline",
        }
    }
}

/// Native `<button>` with variant and size classes
#[derive(Debug)]
pub struct Button {
    label: String,
    variant: ButtonVariant,
    size: Size,
    button_type: &'static str,
    disabled: bool,
    aria_label: Option<String>,
    class: Option<String>,
    on_click: Option<Callback>,
    children: Vec<Box<dyn Component>>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            size: Size::default(),
            button_type: "button",
            disabled: false,
            aria_label: None,
            class: None,
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// `submit` or `reset`; defaults to `button`
    pub fn button_type(mut self, button_type: &'static str) -> Self {
        self.button_type = button_type;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn on_click(mut self, on_click: impl Into<Callback>) -> Self {
        self.on_click = Some(on_click.into());
        self
    }

    /// Extra content after the label (icons, badges)
    pub fn child(mut self, child: Box<dyn Component>) -> Self {
        self.children.push(child);
        self
    }

    fn classes(&self) -> String {
        let variant = format!("ally-button--{}", self.variant.as_str());
        let size = format!("ally-button--{}", self.size.as_str());
        cn(&[Some("ally-button"), Some(&variant), Some(&size), self.class.as_deref()])
    }
}

impl Component for Button {
    fn name(&self) -> &'static str {
        "Button"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let mut el = El::new("button")
            .attr("type", self.button_type)
            .class(self.classes())
            .flag("disabled", self.disabled)
            .attr_opt("aria-label", self.aria_label.clone());
        if !self.label.is_empty() {
            el = el.text(self.label.as_str());
        }
        let mut mounted = el.mount(host, parent);
        let node = mounted.root();

        for child in &self.children {
            mounted.add_child(child.mount(host, node));
        }
        if let Some(on_click) = self.on_click.clone() {
            mounted.add_guard(host.on_node(node, EventKind::Click, move |host, _| {
                on_click.call(host, ())
            }));
        }
        mounted
    }
}
