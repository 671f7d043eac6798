//! Modal building blocks: overlay, content region, header, title, footer

use ally_a11y::AriaRole;
use ally_dom::{EventKind, NodeId};
use ally_runtime::Host;

use crate::component::{Callback, Component, Mounted, cn};
use crate::config::{ModalConfig, UiConfig};
use crate::element::El;

/// Dimmed backdrop behind the dialog. Hidden from assistive technology;
/// clicks on it reach the outside-click handler of the open modal.
#[derive(Debug, Clone, Default)]
pub struct ModalOverlay {
    class: Option<String>,
}

impl ModalOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

impl Component for ModalOverlay {
    fn name(&self) -> &'static str {
        "ModalOverlay"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        El::new("div")
            .class(cn(&[Some("ally-modal__overlay"), self.class.as_deref()]))
            .attr("aria-hidden", "true")
            .mount(host, parent)
    }
}

#[derive(Debug, Default)]
pub struct ModalHeader {
    class: Option<String>,
    children: Vec<Box<dyn Component>>,
}

impl ModalHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }
}

impl Component for ModalHeader {
    fn name(&self) -> &'static str {
        "ModalHeader"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let mut mounted = El::new("div")
            .class(cn(&[Some("ally-modal__header"), self.class.as_deref()]))
            .mount(host, parent);
        let node = mounted.root();
        for child in &self.children {
            mounted.add_child(child.mount(host, node));
        }
        mounted
    }
}

/// Dialog heading; its id is what the content region is labelled by
#[derive(Debug, Clone)]
pub struct ModalTitle {
    id: String,
    text: String,
    class: Option<String>,
}

impl ModalTitle {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            class: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

impl Component for ModalTitle {
    fn name(&self) -> &'static str {
        "ModalTitle"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        El::new("h2")
            .id(&self.id)
            .class(cn(&[Some("ally-modal__title"), self.class.as_deref()]))
            .text(self.text.as_str())
            .mount(host, parent)
    }
}

/// One of the footer's default controls
#[derive(Debug, Clone)]
pub struct FooterButton {
    pub label: Option<String>,
    pub on_click: Option<Callback>,
    pub show: bool,
}

impl FooterButton {
    pub fn new() -> Self {
        Self {
            label: None,
            on_click: None,
            show: true,
        }
    }

    /// A control that is not rendered
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::new()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn on_click(mut self, on_click: impl Into<Callback>) -> Self {
        self.on_click = Some(on_click.into());
        self
    }
}

impl Default for FooterButton {
    fn default() -> Self {
        Self::new()
    }
}

/// Footer: custom children followed by the Cancel and Confirm controls.
///
/// Cancel runs its own handler and then the modal's close callback;
/// Confirm runs only its own handler.
#[derive(Debug, Default)]
pub struct ModalFooter {
    class: Option<String>,
    children: Vec<Box<dyn Component>>,
    cancel: FooterButton,
    confirm: FooterButton,
    config: ModalConfig,
}

impl ModalFooter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn cancel(mut self, cancel: FooterButton) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn confirm(mut self, confirm: FooterButton) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn with_config(mut self, config: &UiConfig) -> Self {
        self.config = config.modal.clone();
        self
    }

    pub(crate) fn set_config(&mut self, config: &ModalConfig) {
        self.config = config.clone();
    }

    /// Mount with the modal's close callback threaded into Cancel
    pub fn mount_with_close(&self, host: &mut Host, parent: NodeId, on_close: Option<&Callback>) -> Mounted {
        let mut mounted = El::new("div")
            .class(cn(&[Some("ally-modal__footer"), self.class.as_deref()]))
            .mount(host, parent);
        let footer = mounted.root();
        for child in &self.children {
            mounted.add_child(child.mount(host, footer));
        }

        if self.cancel.show {
            let label = self.cancel.label.as_deref().unwrap_or(self.config.cancel_label.as_str());
            let handler = self.cancel.on_click.clone();
            let on_close = on_close.cloned();
            let button = footer_button(label, "ally-modal__footer-button").on_click(move |host, _| {
                if let Some(handler) = &handler {
                    handler.call(host, ());
                }
                if let Some(on_close) = &on_close {
                    on_close.call(host, ());
                }
            });
            mounted.add_child(button.mount(host, footer));
        }

        if self.confirm.show {
            let label = self.confirm.label.as_deref().unwrap_or(self.config.confirm_label.as_str());
            let handler = self.confirm.on_click.clone();
            let button = footer_button(label, "ally-modal__footer-button ally-modal__footer-button--primary")
                .on_click(move |host, _| {
                    if let Some(handler) = &handler {
                        handler.call(host, ());
                    }
                });
            mounted.add_child(button.mount(host, footer));
        }
        mounted
    }
}

fn footer_button(label: &str, class: &str) -> El {
    El::new("button")
        .attr("type", "button")
        .class(class)
        .attr("aria-label", label)
        .attr("title", label)
        .text(label)
}

impl Component for ModalFooter {
    fn name(&self) -> &'static str {
        "ModalFooter"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        self.mount_with_close(host, parent, None)
    }
}

/// The dialog region itself
#[derive(Debug)]
pub struct ModalContent {
    title_id: String,
    description_id: Option<String>,
    show_close_button: bool,
    class: Option<String>,
    children: Vec<Box<dyn Component>>,
    footer: Option<ModalFooter>,
    config: ModalConfig,
    sr_only_class: String,
}

impl ModalContent {
    /// `title_id` must be the id of the element naming the dialog
    pub fn new(title_id: impl Into<String>) -> Self {
        Self {
            title_id: title_id.into(),
            description_id: None,
            show_close_button: true,
            class: None,
            children: Vec::new(),
            footer: None,
            config: ModalConfig::default(),
            sr_only_class: "sr-only".to_string(),
        }
    }

    pub fn description_id(mut self, id: impl Into<String>) -> Self {
        self.description_id = Some(id.into());
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = show;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Footer slot; rendered after the children with the close callback
    pub fn footer(mut self, footer: ModalFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn with_config(mut self, config: &UiConfig) -> Self {
        self.set_config(config);
        self
    }

    pub(crate) fn set_config(&mut self, config: &UiConfig) {
        self.config = config.modal.clone();
        self.sr_only_class = config.sr_only_class.clone();
        if let Some(footer) = &mut self.footer {
            footer.set_config(&config.modal);
        }
    }

    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Mount with the modal's close callback. The close control only
    /// renders when enabled and a callback is available.
    pub fn mount_with_close(&self, host: &mut Host, parent: NodeId, on_close: Option<&Callback>) -> Mounted {
        let mut mounted = El::new("div")
            .attr("role", AriaRole::Dialog.as_str())
            .attr("aria-modal", "true")
            .attr("aria-labelledby", self.title_id.as_str())
            .attr_opt("aria-describedby", self.description_id.clone())
            .attr("tabindex", "-1")
            .class(cn(&[Some("ally-modal__content"), self.class.as_deref()]))
            .mount(host, parent);
        let content = mounted.root();

        for child in &self.children {
            mounted.add_child(child.mount(host, content));
        }
        if let Some(footer) = &self.footer {
            mounted.add_child(footer.mount_with_close(host, content, on_close));
        }
        if let (true, Some(on_close)) = (self.show_close_button, on_close) {
            let on_close = on_close.clone();
            let close = El::new("button")
                .attr("type", "button")
                .class("ally-modal__close")
                .attr("aria-label", self.config.close_label.as_str())
                .child(El::new("span").attr("aria-hidden", "true").text("×"))
                .child(
                    El::new("span")
                        .class(self.sr_only_class.as_str())
                        .text(self.config.close_sr_text.as_str()),
                )
                .on(EventKind::Click, move |host, _| on_close.call(host, ()));
            mounted.add_child(close.mount(host, content));
        }
        mounted
    }
}

impl Component for ModalContent {
    fn name(&self) -> &'static str {
        "ModalContent"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        self.mount_with_close(host, parent, None)
    }
}
