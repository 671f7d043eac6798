//! Single toast view

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ally_a11y::LiveRegionConfig;
use ally_dom::{EventKind, NodeId};
use ally_runtime::{Host, TaskHandle};

use super::{ToastData, ToastPosition};
use crate::component::{Callback, Component, Mounted, cn};
use crate::config::ToastConfig;
use crate::element::El;

const VISIBLE: &str = "ally-toast-container--visible";
const EXITING: &str = "ally-toast-container--exiting";

/// One notification. `on_close` receives the toast id once the exit
/// delay has passed; the owner is expected to unmount it then.
#[derive(Debug, Clone)]
pub struct Toast {
    data: ToastData,
    position: ToastPosition,
    config: ToastConfig,
    sr_only_class: String,
    on_close: Callback<String>,
}

impl Toast {
    pub fn new(data: ToastData, on_close: impl Into<Callback<String>>) -> Self {
        let config = ToastConfig::default();
        Self {
            data,
            position: config.default_position,
            config,
            sr_only_class: "sr-only".to_string(),
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

    pub fn sr_only_class(mut self, class: impl Into<String>) -> Self {
        self.sr_only_class = class.into();
        self
    }

    pub fn data(&self) -> &ToastData {
        &self.data
    }

    fn content(&self) -> El {
        let title = self.data.title.as_deref().map(|title| {
            El::new("div")
                .class("ally-toast__title")
                .id(&self.data.title_id())
                .text(title)
        });
        let description = self.data.description.as_deref().map(|description| {
            El::new("div")
                .class("ally-toast__description")
                .id(&self.data.description_id())
                .attr_opt("aria-labelledby", self.data.title.as_ref().map(|_| self.data.title_id()))
                .text(description)
        });
        El::new("div")
            .class("ally-toast__content")
            .child_opt(title)
            .child_opt(description)
    }
}

/// Shared between the mounted view and its handlers; handlers only hold
/// `Weak` references so dropping the view releases everything.
struct ToastState {
    id: String,
    root: NodeId,
    exit_delay_ms: u64,
    on_close: Callback<String>,
    timers: RefCell<Timers>,
}

#[derive(Default)]
struct Timers {
    show: Option<TaskHandle>,
    dismiss: Option<TaskHandle>,
    exit: Option<TaskHandle>,
}

/// Start the exit animation; removal is requested after the exit delay.
/// Closing again restarts the delay. A pending show is cancelled so the
/// toast never ends up both visible and exiting.
fn close(state: &Rc<ToastState>, host: &mut Host) {
    let tree = &mut host.document.tree;
    let _ = tree.toggle_class(state.root, VISIBLE, Some(false));
    let _ = tree.toggle_class(state.root, EXITING, Some(true));

    let weak = Rc::downgrade(state);
    let exit = host.set_timeout(state.exit_delay_ms, move |host| {
        if let Some(state) = weak.upgrade() {
            tracing::debug!(id = %state.id, "toast exit finished");
            state.on_close.call(host, state.id.clone());
        }
    });

    let mut timers = state.timers.borrow_mut();
    timers.show = None;
    timers.dismiss = None;
    timers.exit = Some(exit);
}

fn close_handler(weak: Weak<ToastState>) -> impl Fn(&mut Host) {
    move |host| {
        if let Some(state) = weak.upgrade() {
            close(&state, host);
        }
    }
}

impl Component for Toast {
    fn name(&self) -> &'static str {
        "Toast"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let container_class = format!("ally-toast-container--{}", self.position.as_str());
        let type_class = format!("ally-toast--{}", self.data.toast_type.as_str());

        let mut actions = El::new("div").class("ally-toast__actions");
        if let Some(action) = &self.data.action {
            actions = actions.child(
                El::new("button")
                    .attr("type", "button")
                    .class("ally-toast__action")
                    .attr("aria-label", action.label.as_str())
                    .text(action.label.as_str()),
            );
        }
        actions = actions.child(
            El::new("button")
                .attr("type", "button")
                .class("ally-toast__close")
                .attr("aria-label", self.config.close_label.as_str())
                .child(El::new("span").attr("aria-hidden", "true").text("×"))
                .child(
                    El::new("span")
                        .class(self.sr_only_class.as_str())
                        .text(self.config.close_sr_text.as_str()),
                ),
        );

        let el = El::new("div")
            .class(cn(&[Some("ally-toast-container"), Some(&container_class)]))
            .child(
                El::new("div")
                    .class(cn(&[Some("ally-toast"), Some(&type_class)]))
                    .child(self.content())
                    .child(actions),
            );
        let mut mounted = el.mount(host, parent);
        let root = mounted.root();

        let live = if self.data.toast_type.is_assertive() {
            LiveRegionConfig::assertive()
        } else {
            LiveRegionConfig::polite()
        };
        if let Err(err) = live.with_atomic(true).apply(&mut host.document.tree, root) {
            tracing::debug!(%err, "toast live region not applied");
        }

        let state = Rc::new(ToastState {
            id: self.data.id.clone(),
            root,
            exit_delay_ms: self.config.exit_delay_ms,
            on_close: self.on_close.clone(),
            timers: RefCell::new(Timers::default()),
        });

        let weak = Rc::downgrade(&state);
        let show = host.defer(move |host| {
            if weak.upgrade().is_some() && !host.document.tree.has_class(root, EXITING) {
                let _ = host.document.tree.toggle_class(root, VISIBLE, Some(true));
            }
        });
        let dismiss = (self.data.duration > 0)
            .then(|| host.set_timeout(self.data.duration, close_handler(Rc::downgrade(&state))));
        {
            let mut timers = state.timers.borrow_mut();
            timers.show = Some(show);
            timers.dismiss = dismiss;
        }
        mounted.hold(Rc::clone(&state));

        let buttons: Vec<NodeId> = host
            .document
            .tree
            .descendants(root)
            .into_iter()
            .filter(|&n| host.document.tree.tag_name(n) == Some("button"))
            .collect();
        let (action_button, close_button) = match buttons.as_slice() {
            [action, close] => (Some(*action), *close),
            [close] => (None, *close),
            _ => return mounted,
        };

        if let (Some(button), Some(action)) = (action_button, self.data.action.clone()) {
            let close = close_handler(Rc::downgrade(&state));
            mounted.add_guard(host.on_node(button, EventKind::Click, move |host, _| {
                action.on_click.call(host, ());
                close(host);
            }));
        }
        let close = close_handler(Rc::downgrade(&state));
        mounted.add_guard(host.on_node(close_button, EventKind::Click, move |host, _| close(host)));

        tracing::debug!(id = %self.data.id, duration = self.data.duration, "toast mounted");
        mounted
    }
}
