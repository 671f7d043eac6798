//! UI Events
//!
//! Keyboard and pointer events dispatched by the host runtime. Both carry
//! the usual `preventDefault` / `stopPropagation` flags; the host checks
//! them after each listener.

use crate::NodeId;

/// Event kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    PointerDown,
    Click,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::PointerDown => "pointerdown",
            Self::Click => "click",
        }
    }
}

/// Key value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Character(char),

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,

    // Editing
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    Unidentified(String),
}

impl Key {
    /// Parse from a `KeyboardEvent.key` string
    pub fn parse(s: &str) -> Self {
        match s {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            " " | "Spacebar" => Self::Space,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Unidentified(s.to_string()),
                }
            }
        }
    }

    /// Key value string
    pub fn as_key_string(&self) -> String {
        match self {
            Self::Character(c) => c.to_string(),
            Self::ArrowUp => "ArrowUp".into(),
            Self::ArrowDown => "ArrowDown".into(),
            Self::ArrowLeft => "ArrowLeft".into(),
            Self::ArrowRight => "ArrowRight".into(),
            Self::Home => "Home".into(),
            Self::End => "End".into(),
            Self::Backspace => "Backspace".into(),
            Self::Delete => "Delete".into(),
            Self::Enter => "Enter".into(),
            Self::Tab => "Tab".into(),
            Self::Escape => "Escape".into(),
            Self::Space => " ".into(),
            Self::Unidentified(s) => s.clone(),
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers held
    pub const NONE: KeyModifiers = KeyModifiers { shift: false, ctrl: false, alt: false, meta: false };

    /// Shift only
    pub const SHIFT: KeyModifiers = KeyModifiers { shift: true, ctrl: false, alt: false, meta: false };

    /// Check if any modifier is pressed
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Keyboard event
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
    /// Element that had focus when the key was pressed
    pub target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyboardEvent {
    pub fn new(key: Key, modifiers: KeyModifiers, target: NodeId) -> Self {
        Self {
            key,
            modifiers,
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }
}

/// Pointer event (pointerdown and click)
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }
}

/// Event delivered to listeners
#[derive(Debug, Clone)]
pub enum UiEvent {
    Key(KeyboardEvent),
    Pointer(EventKind, PointerEvent),
}

impl UiEvent {
    /// Event kind
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Key(_) => EventKind::KeyDown,
            Self::Pointer(kind, _) => *kind,
        }
    }

    /// Event target
    pub fn target(&self) -> NodeId {
        match self {
            Self::Key(e) => e.target,
            Self::Pointer(_, e) => e.target,
        }
    }

    /// Keyboard payload, if any
    pub fn as_key(&self) -> Option<&KeyboardEvent> {
        match self {
            Self::Key(e) => Some(e),
            Self::Pointer(..) => None,
        }
    }

    /// Prevent the host's default action
    pub fn prevent_default(&mut self) {
        match self {
            Self::Key(e) => e.default_prevented = true,
            Self::Pointer(_, e) => e.default_prevented = true,
        }
    }

    /// Stop bubbling to further targets
    pub fn stop_propagation(&mut self) {
        match self {
            Self::Key(e) => e.propagation_stopped = true,
            Self::Pointer(_, e) => e.propagation_stopped = true,
        }
    }

    pub fn default_prevented(&self) -> bool {
        match self {
            Self::Key(e) => e.default_prevented,
            Self::Pointer(_, e) => e.default_prevented,
        }
    }

    pub fn propagation_stopped(&self) -> bool {
        match self {
            Self::Key(e) => e.propagation_stopped,
            Self::Pointer(_, e) => e.propagation_stopped,
        }
    }

    /// True for a keydown of `key` with exactly `modifiers`
    pub fn is_key(&self, key: &Key, modifiers: KeyModifiers) -> bool {
        self.as_key().is_some_and(|e| &e.key == key && e.modifiers == modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse("Escape"), Key::Escape);
        assert_eq!(Key::parse("Esc"), Key::Escape);
        assert_eq!(Key::parse("a"), Key::Character('a'));
        assert_eq!(Key::parse(" "), Key::Space);
        assert_eq!(Key::parse("F13"), Key::Unidentified("F13".to_string()));
        assert_eq!(Key::Tab.as_key_string(), "Tab");
    }

    #[test]
    fn test_modifiers() {
        assert!(KeyModifiers::SHIFT.any());
        assert!(!KeyModifiers::NONE.any());
        assert_eq!(KeyModifiers::default(), KeyModifiers::NONE);
    }

    #[test]
    fn test_event_flags() {
        let mut ev = UiEvent::Key(KeyboardEvent::new(Key::Tab, KeyModifiers::SHIFT, NodeId::ROOT));
        assert_eq!(ev.kind(), EventKind::KeyDown);
        assert!(ev.is_key(&Key::Tab, KeyModifiers::SHIFT));
        assert!(!ev.is_key(&Key::Tab, KeyModifiers::NONE));
        assert!(!ev.default_prevented());
        ev.prevent_default();
        ev.stop_propagation();
        assert!(ev.default_prevented());
        assert!(ev.propagation_stopped());

        let click = UiEvent::Pointer(EventKind::Click, PointerEvent::new(NodeId::ROOT));
        assert_eq!(click.kind(), EventKind::Click);
        assert!(click.as_key().is_none());
    }
}
