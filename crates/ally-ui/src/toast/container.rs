//! Caller-owned toast list

use ally_dom::NodeId;
use ally_runtime::Host;

use super::{Toast, ToastData, ToastPosition};
use crate::component::{Callback, Component, Mounted};
use crate::config::ToastConfig;
use crate::element::El;

/// Renders a list of toasts the caller keeps track of. Each toast reports
/// its id through `on_close` when it wants to go; removing it from the list
/// and re-rendering is up to the caller.
#[derive(Debug, Clone)]
pub struct ToastContainer {
    toasts: Vec<ToastData>,
    position: ToastPosition,
    config: ToastConfig,
    on_close: Callback<String>,
}

impl ToastContainer {
    pub fn new(toasts: Vec<ToastData>, on_close: impl Into<Callback<String>>) -> Self {
        let config = ToastConfig::default();
        Self {
            toasts,
            position: config.default_position,
            config,
            on_close: on_close.into(),
        }
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_config(mut self, config: &ToastConfig) -> Self {
        self.config = config.clone();
        self
    }
}

impl Component for ToastContainer {
    fn name(&self) -> &'static str {
        "ToastContainer"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let class = format!("ally-toast-list ally-toast-list--{}", self.position.as_str());
        let mut mounted = El::new("div").class(class).mount(host, parent);
        let list = mounted.root();
        for data in &self.toasts {
            let toast = Toast::new(data.clone(), self.on_close.clone())
                .position(self.position)
                .with_config(&self.config);
            mounted.add_child(toast.mount(host, list));
        }
        mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_renders_each_toast_and_reports_ids() {
        let mut host = Host::new();
        let body = host.document.body();
        let toasts = vec![
            ToastData::from_options(ToastOptions::default().duration(100), "a".into(), 5000),
            ToastData::from_options(ToastOptions::default().persistent(), "b".into(), 5000),
        ];
        let closed = Rc::new(RefCell::new(Vec::new()));
        let c = Rc::clone(&closed);
        let container = ToastContainer::new(toasts, move |_: &mut Host, id: String| c.borrow_mut().push(id))
            .position(ToastPosition::BottomRight)
            .mount(&mut host, body);

        let items = host.document.tree.element_children(container.root());
        assert_eq!(items.len(), 2);
        assert!(host.document.tree.has_class(items[1], "ally-toast-container--bottom-right"));

        host.advance(300);
        assert_eq!(*closed.borrow(), vec!["a".to_string()]);

        drop(container);
        host.run_until_idle();
        assert_eq!(closed.borrow().len(), 1);
    }
}
