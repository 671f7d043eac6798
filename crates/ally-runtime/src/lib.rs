//! Ally Runtime
//!
//! Single-threaded host environment for Ally widgets: a document, a
//! virtual-time event loop, RAII-scoped listeners and timers, an overlay
//! layer stack, and synthetic keyboard/pointer input with the default
//! actions a browser would perform.

pub mod event_loop;
pub mod host;
pub mod layers;
pub mod listeners;

pub use event_loop::{EventLoop, TaskHandle, TaskState, TimerId};
pub use host::{Host, MAX_TASKS_PER_TURN, Task, TeardownQueue};
pub use layers::{LayerId, LayerStack};
pub use listeners::{Handler, ListenerGuard, ListenerRegistry, ListenerTarget};
