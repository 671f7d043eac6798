//! Outside-click dismissal

use ally_dom::{EventKind, NodeId};
use ally_runtime::{Host, LayerId, ListenerGuard};

use crate::component::Callback;

/// Call `on_close` for every pointer press that lands outside `content`.
/// With a layer, presses are ignored while another overlay is on top.
/// The listener lives as long as the returned guard.
pub fn on_outside_click(
    host: &mut Host,
    content: NodeId,
    layer: Option<LayerId>,
    on_close: Callback,
) -> ListenerGuard {
    host.on_document(EventKind::PointerDown, move |host, ev| {
        if layer.is_some_and(|layer| !host.layers.is_top(layer)) {
            return;
        }
        let target = ev.target();
        if host.document.tree.contains(content, target) {
            return;
        }
        tracing::trace!(%target, %content, "pointer down outside content");
        on_close.call(host, ());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_inside_and_outside() {
        let mut host = Host::new();
        let body = host.document.body();
        let outside = host.document.tree.create_element("p");
        host.document.tree.append_child(body, outside).unwrap();
        let content = host.document.tree.create_element("div");
        host.document.tree.append_child(body, content).unwrap();
        let inside = host.document.tree.create_element("span");
        host.document.tree.append_child(content, inside).unwrap();

        let closes = Rc::new(Cell::new(0));
        let c = Rc::clone(&closes);
        let guard = on_outside_click(&mut host, content, None, Callback::new(move |_, _| c.set(c.get() + 1)));

        host.click(inside);
        host.click(content);
        assert_eq!(closes.get(), 0);
        host.click(outside);
        assert_eq!(closes.get(), 1);

        drop(guard);
        host.click(outside);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_only_top_layer_reacts() {
        let mut host = Host::new();
        let body = host.document.body();
        let content = host.document.tree.create_element("div");
        host.document.tree.append_child(body, content).unwrap();

        let closes = Rc::new(Cell::new(0));
        let c = Rc::clone(&closes);
        let lower = host.layers.push_layer();
        let _guard = on_outside_click(&mut host, content, Some(lower), Callback::new(move |_, _| c.set(c.get() + 1)));
        let upper = host.layers.push_layer();

        host.click(body);
        assert_eq!(closes.get(), 0);
        host.layers.remove_layer(upper);
        host.click(body);
        assert_eq!(closes.get(), 1);
    }
}
