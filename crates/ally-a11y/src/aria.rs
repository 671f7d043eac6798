//! ARIA Support
//!
//! ARIA roles, states, and properties.

use std::str::FromStr;

use ally_dom::{Document, NodeId};

use crate::A11yError;

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Main,
    Navigation,
    Region,

    // Widget roles
    Button,
    Checkbox,
    Link,
    Switch,
    TextBox,

    // Window roles
    Dialog,
    AlertDialog,

    // Live region roles
    Alert,
    Status,
    Log,

    // Document structure
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Presentation,
    Generic,
}

impl AriaRole {
    /// Parse from a `role` attribute value
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "link" => Self::Link,
            "switch" => Self::Switch,
            "textbox" => Self::TextBox,
            "dialog" => Self::Dialog,
            "alertdialog" => Self::AlertDialog,
            "alert" => Self::Alert,
            "status" => Self::Status,
            "log" => Self::Log,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "none" | "presentation" => Self::Presentation,
            "generic" => Self::Generic,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::Link => "link",
            Self::Switch => "switch",
            Self::TextBox => "textbox",
            Self::Dialog => "dialog",
            Self::AlertDialog => "alertdialog",
            Self::Alert => "alert",
            Self::Status => "status",
            Self::Log => "log",
            Self::Group => "group",
            Self::Heading => "heading",
            Self::Img => "img",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Presentation => "presentation",
            Self::Generic => "generic",
        }
    }

    /// Check if role is widget
    pub fn is_widget(&self) -> bool {
        matches!(
            self,
            Self::Button | Self::Checkbox | Self::Link | Self::Switch | Self::TextBox
        )
    }

    /// Check if role is a dialog window
    pub fn is_dialog(&self) -> bool {
        matches!(self, Self::Dialog | Self::AlertDialog)
    }

    /// Roles that must carry an accessible name
    pub fn requires_name(&self) -> bool {
        self.is_widget() || self.is_dialog() || matches!(self, Self::Img | Self::Region)
    }

    /// Roles whose name may come from their content
    pub fn name_from_content(&self) -> bool {
        matches!(
            self,
            Self::Button | Self::Checkbox | Self::Link | Self::Switch | Self::Heading
        )
    }

    /// Whether `aria-checked` applies
    pub fn supports_checked(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Switch)
    }
}

impl FromStr for AriaRole {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| A11yError::InvalidRole(s.to_string()))
    }
}

/// Implicit role from the element's tag and attributes
pub fn implicit_role(doc: &Document, node: NodeId) -> Option<AriaRole> {
    let el = doc.tree.element(node)?;
    Some(match el.tag_name.as_str() {
        "button" => AriaRole::Button,
        "a" if el.has_attr("href") => AriaRole::Link,
        "input" => match el.get_attr("type").unwrap_or("text") {
            "checkbox" => AriaRole::Checkbox,
            "button" | "submit" | "reset" => AriaRole::Button,
            "hidden" => return None,
            _ => AriaRole::TextBox,
        },
        "textarea" => AriaRole::TextBox,
        "dialog" => AriaRole::Dialog,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => AriaRole::Heading,
        "img" => AriaRole::Img,
        "main" => AriaRole::Main,
        "nav" => AriaRole::Navigation,
        "ul" | "ol" => AriaRole::List,
        "li" => AriaRole::ListItem,
        "div" | "span" => AriaRole::Generic,
        _ => return None,
    })
}

/// Explicit `role` when valid, else the implicit role
pub fn role_of(doc: &Document, node: NodeId) -> Option<AriaRole> {
    doc.tree
        .get_attribute(node, "role")
        .and_then(|r| r.split_whitespace().find_map(AriaRole::parse))
        .or_else(|| implicit_role(doc, node))
}

/// true / false / mixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    #[default]
    False,
    True,
    Mixed,
}

impl TriState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::False => "false",
            Self::True => "true",
            Self::Mixed => "mixed",
        }
    }

    /// `mixed` wins over `checked`
    pub fn from_checked(checked: bool, indeterminate: bool) -> Self {
        match (checked, indeterminate) {
            (_, true) => Self::Mixed,
            (true, false) => Self::True,
            (false, false) => Self::False,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl FromStr for TriState {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            "mixed" => Ok(Self::Mixed),
            _ => Err(A11yError::InvalidState {
                attribute: "aria-checked".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Live region mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRegionMode {
    #[default]
    Off,
    Polite,
    Assertive,
}

impl LiveRegionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// ARIA state/property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AriaState {
    Checked(TriState),
    Disabled(bool),
    Hidden(bool),
    Invalid(bool),
    Modal(bool),
    Atomic(bool),
    Live(LiveRegionMode),
    Label(String),
    LabelledBy(Vec<String>),
    DescribedBy(Vec<String>),
    ErrorMessage(String),
}

impl AriaState {
    /// Parse an `aria-*` attribute (name without the prefix)
    pub fn parse(name: &str, value: &str) -> Result<Self, A11yError> {
        let boolean = |value: &str| match value {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(A11yError::InvalidState {
                attribute: format!("aria-{name}"),
                value: value.to_string(),
            }),
        };
        let ids = |value: &str| value.split_whitespace().map(String::from).collect();

        Ok(match name {
            "checked" => Self::Checked(value.parse()?),
            "disabled" => Self::Disabled(boolean(value)?),
            "hidden" => Self::Hidden(boolean(value)?),
            "invalid" => Self::Invalid(value != "false"),
            "modal" => Self::Modal(boolean(value)?),
            "atomic" => Self::Atomic(boolean(value)?),
            "live" => Self::Live(match value {
                "polite" => LiveRegionMode::Polite,
                "assertive" => LiveRegionMode::Assertive,
                "off" => LiveRegionMode::Off,
                _ => {
                    return Err(A11yError::InvalidState {
                        attribute: "aria-live".to_string(),
                        value: value.to_string(),
                    });
                }
            }),
            "label" => Self::Label(value.to_string()),
            "labelledby" => Self::LabelledBy(ids(value)),
            "describedby" => Self::DescribedBy(ids(value)),
            "errormessage" => Self::ErrorMessage(value.to_string()),
            _ => {
                return Err(A11yError::InvalidState {
                    attribute: format!("aria-{name}"),
                    value: value.to_string(),
                });
            }
        })
    }

    /// Full attribute name
    pub fn attr_name(&self) -> &'static str {
        match self {
            Self::Checked(_) => "aria-checked",
            Self::Disabled(_) => "aria-disabled",
            Self::Hidden(_) => "aria-hidden",
            Self::Invalid(_) => "aria-invalid",
            Self::Modal(_) => "aria-modal",
            Self::Atomic(_) => "aria-atomic",
            Self::Live(_) => "aria-live",
            Self::Label(_) => "aria-label",
            Self::LabelledBy(_) => "aria-labelledby",
            Self::DescribedBy(_) => "aria-describedby",
            Self::ErrorMessage(_) => "aria-errormessage",
        }
    }

    /// Serialized attribute value
    pub fn attr_value(&self) -> String {
        let flag = |b: &bool| if *b { "true" } else { "false" }.to_string();
        match self {
            Self::Checked(t) => t.as_str().to_string(),
            Self::Disabled(b) | Self::Hidden(b) | Self::Invalid(b) | Self::Modal(b) | Self::Atomic(b) => {
                flag(b)
            }
            Self::Live(mode) => mode.as_str().to_string(),
            Self::Label(s) | Self::ErrorMessage(s) => s.clone(),
            Self::LabelledBy(ids) | Self::DescribedBy(ids) => ids.join(" "),
        }
    }
}
