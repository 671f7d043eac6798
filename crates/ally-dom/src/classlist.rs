//! Class lists
//!
//! The parsed form of a `class` attribute. Components compose their
//! modifier classes (`--checked`, `--visible`, ...) through it.

use std::fmt;

/// Ordered, duplicate-free set of class names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    /// Parse a `class` attribute value
    pub fn parse(value: &str) -> Self {
        let mut list = Self::default();
        for class in value.split_ascii_whitespace() {
            list.insert(class);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns false when already present (or empty)
    pub fn insert(&mut self, class: &str) -> bool {
        if class.is_empty() || self.contains(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Returns false when absent
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// `classList.toggle`: flip, or pin with `force`. Returns presence.
    pub fn toggle(&mut self, class: &str, force: Option<bool>) -> bool {
        if force.unwrap_or(!self.contains(class)) {
            self.insert(class);
            true
        } else {
            self.remove(class);
            false
        }
    }

    /// Attribute value to write back; `None` means drop the attribute
    pub fn to_attribute(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.classes.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_duplicates() {
        let list = ClassList::parse(" ally-toast  ally-toast--info ally-toast ");
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "ally-toast ally-toast--info");
    }

    #[test]
    fn test_insert_remove() {
        let mut list = ClassList::default();
        assert!(list.insert("ally-switch"));
        assert!(!list.insert("ally-switch"));
        assert!(!list.insert(""));
        assert!(list.remove("ally-switch"));
        assert!(!list.remove("ally-switch"));
        assert_eq!(list.to_attribute(), None);
    }

    #[test]
    fn test_toggle_with_force() {
        let mut list = ClassList::parse("ally-toast-container");
        assert!(list.toggle("ally-toast-container--visible", None));
        assert!(list.toggle("ally-toast-container--visible", Some(true)));
        assert!(!list.toggle("ally-toast-container--visible", None));
        assert!(!list.toggle("missing", Some(false)));
        assert_eq!(list.to_attribute().as_deref(), Some("ally-toast-container"));
    }
}
