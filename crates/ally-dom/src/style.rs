//! Inline Style Declarations
//!
//! A minimal `CSSStyleDeclaration` over the `style` attribute. Only
//! `property: value` pairs are understood; there is no cascade.

/// Parsed inline style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if !name.is_empty() && !value.is_empty() {
                style.set_property(name, value);
            }
        }
        style
    }

    /// Get a property value
    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        if value.trim().is_empty() {
            self.remove_property(&name);
            return;
        }
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.trim().to_string(),
            None => self.declarations.push((name, value.trim().to_string())),
        }
    }

    /// Remove a property, returning its value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let pos = self.declarations.iter().position(|(n, _)| *n == name)?;
        Some(self.declarations.remove(pos).1)
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to attribute form
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = StyleDeclaration::parse("color: red;  PADDING-RIGHT : 15px;;broken");
        assert_eq!(style.len(), 2);
        assert_eq!(style.get_property_value("padding-right"), Some("15px"));
        assert_eq!(style.css_text(), "color: red; padding-right: 15px;");
    }

    #[test]
    fn test_set_empty_removes() {
        let mut style = StyleDeclaration::parse("overflow: hidden");
        style.set_property("overflow", "");
        assert!(style.is_empty());
        assert_eq!(style.css_text(), "");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut style = StyleDeclaration::parse("a: 1; b: 2");
        style.set_property("a", "3");
        assert_eq!(style.css_text(), "a: 3; b: 2;");
        assert_eq!(style.remove_property("b"), Some("2".to_string()));
    }
}
