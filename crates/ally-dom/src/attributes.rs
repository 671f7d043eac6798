//! Element attributes
//!
//! Attributes keep insertion order so serialized markup is stable. Names
//! are ASCII-lowercased on the way in; widgets carry a handful of
//! attributes each, so lookups are a linear scan.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Ordered attribute list of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<Attr>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set a value in place, or append a new attribute. Returns the
    /// replaced value.
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        match self.position(name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].value, value.to_string())),
            None => {
                self.entries.push(Attr {
                    name: name.to_ascii_lowercase(),
                    value: value.to_string(),
                });
                None
            }
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).value)
    }

    /// Boolean attribute presence; `force` pins the outcome
    pub fn toggle(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = self.contains(name);
        match force.unwrap_or(!present) {
            true if !present => {
                self.set(name, "");
                true
            }
            false if present => {
                self.remove(name);
                false
            }
            keep => keep,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attr> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.set("type", "button"), None);
        attrs.set("class", "ally-button");
        assert_eq!(attrs.set("type", "submit"), Some("button".to_string()));
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["type", "class"]);
        assert_eq!(attrs.get("type"), Some("submit"));
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let mut attrs = AttributeMap::new();
        attrs.set("ARIA-Hidden", "true");
        assert_eq!(attrs.get("aria-hidden"), Some("true"));
        assert!(attrs.contains("Aria-Hidden"));
        assert_eq!(attrs.names().next(), Some("aria-hidden"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut attrs = AttributeMap::new();
        attrs.set("id", "a");
        attrs.set("role", "dialog");
        attrs.set("tabindex", "-1");

        assert_eq!(attrs.remove("id"), Some("a".to_string()));
        assert_eq!(attrs.remove("id"), None);
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["role", "tabindex"]);
    }

    #[test]
    fn test_toggle() {
        let mut attrs = AttributeMap::new();
        assert!(attrs.toggle("disabled", None));
        assert_eq!(attrs.get("disabled"), Some(""));
        assert!(!attrs.toggle("disabled", None));
        assert!(attrs.is_empty());

        attrs.set("hidden", "until-found");
        assert!(attrs.toggle("hidden", Some(true)));
        assert_eq!(attrs.get("hidden"), Some("until-found"));
        assert_eq!(attrs.len(), 1);
    }
}
