//! Overlay layer stack
//!
//! Every open overlay pushes a layer; only the topmost layer reacts to
//! global keyboard and pointer input. Per-overlay bookkeeping (focus
//! restore, hidden siblings, scroll lock) restores exactly only when
//! layers are removed in LIFO order.

/// Layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

/// Stack of open overlay layers
#[derive(Debug, Default)]
pub struct LayerStack {
    layers: Vec<LayerId>,
    next_id: u64,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new top layer
    pub fn push_layer(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(id);
        tracing::debug!(layer = id.0, depth = self.layers.len(), "overlay layer pushed");
        id
    }

    /// Remove a layer. Returns false if it was not on the stack.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(pos) = self.layers.iter().position(|&l| l == id) else {
            return false;
        };
        if pos + 1 != self.layers.len() {
            tracing::warn!(
                layer = id.0,
                depth = self.layers.len(),
                "overlay closed out of order; background state may not restore exactly"
            );
        }
        self.layers.remove(pos);
        tracing::debug!(layer = id.0, depth = self.layers.len(), "overlay layer removed");
        true
    }

    /// Whether `id` is the topmost layer
    pub fn is_top(&self, id: LayerId) -> bool {
        self.layers.last() == Some(&id)
    }

    pub fn top(&self) -> Option<LayerId> {
        self.layers.last().copied()
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains(&id)
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
