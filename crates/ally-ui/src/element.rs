//! Element builder
//!
//! Fluent construction of element subtrees, used by every component to
//! describe its markup. Building is pure; nodes and listeners only come
//! into existence when the builder is mounted.

use std::rc::Rc;

use ally_a11y::AriaState;
use ally_dom::{EventKind, NodeId, UiEvent};
use ally_runtime::{Handler, Host};

use crate::component::{Component, Mounted};

enum Child {
    Element(El),
    Text(String),
    Component(Box<dyn Component>),
}

/// Element builder
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
    listeners: Vec<(EventKind, Handler)>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Set an attribute (last write wins)
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    /// Set an attribute when a value is present
    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set a boolean attribute (present with an empty value) when `on`
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on { self.attr(name, "") } else { self }
    }

    /// Set an ARIA state or property
    pub fn aria(self, state: AriaState) -> Self {
        let value = state.attr_value();
        self.attr(state.attr_name(), value)
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Set the class attribute; empty strings are skipped
    pub fn class(self, class: impl Into<String>) -> Self {
        let class = class.into();
        if class.is_empty() { self } else { self.attr("class", class) }
    }

    pub fn style(self, style: &str) -> Self {
        self.attr("style", style)
    }

    /// Append a text child
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    /// Append an element child
    pub fn child(mut self, child: El) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    /// Append an element child when present
    pub fn child_opt(self, child: Option<El>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append a component child
    pub fn component(mut self, child: Box<dyn Component>) -> Self {
        self.children.push(Child::Component(child));
        self
    }

    /// Attach an event listener, live while mounted
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&mut Host, &mut UiEvent) + 'static,
    {
        let handler: Handler = Rc::new(handler);
        self.listeners.push((kind, handler));
        self
    }

    /// Attach a click listener
    pub fn on_click<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Host, &mut UiEvent) + 'static,
    {
        self.on(EventKind::Click, handler)
    }
}

impl Component for El {
    fn name(&self) -> &'static str {
        "El"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let tree = &mut host.document.tree;
        let node = tree.create_element(&self.tag);
        if let Some(el) = tree.element_mut(node) {
            for (name, value) in &self.attrs {
                el.set_attr(name, value);
            }
        }
        if let Err(err) = tree.append_child(parent, node) {
            tracing::debug!(%err, tag = %self.tag, "mounting detached element");
        }

        let mut mounted = Mounted::new(node);
        for child in &self.children {
            match child {
                Child::Element(el) => mounted.add_child(el.mount(host, node)),
                Child::Text(text) => mounted.add_child(Text::new(text.as_str()).mount(host, node)),
                Child::Component(component) => mounted.add_child(component.mount(host, node)),
            }
        }
        for (kind, handler) in &self.listeners {
            let handler = Rc::clone(handler);
            mounted.add_guard(host.on_node(node, *kind, move |host, ev| handler(host, ev)));
        }
        mounted
    }
}

/// Text node component
#[derive(Debug, Clone)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

impl Component for Text {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let node = host.document.tree.create_text(&self.content);
        if let Err(err) = host.document.tree.append_child(parent, node) {
            tracing::debug!(%err, "mounting detached text");
        }
        Mounted::new(node)
    }
}
