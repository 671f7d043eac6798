//! Link
//!
//! Anchor with variant classes. External destinations open in a new tab
//! with a safe `rel` and announce that to screen readers.

use ally_dom::{EventKind, NodeId};
use ally_runtime::Host;
use url::Url;

use crate::component::{Callback, Component, Mounted, Size, cn};
use crate::element::El;

const DEFAULT_EXTERNAL_REL: &str = "noopener noreferrer";
const DEFAULT_EXTERNAL_TARGET: &str = "_blank";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkVariant {
    #[default]
    Primary,
    Secondary,
}

impl LinkVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Side of the text the icon sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconPosition {
    Before,
    #[default]
    After,
}

/// Absolute `http(s)` URLs and protocol-relative references
pub fn looks_external(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }
    Url::parse(href).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[derive(Debug)]
pub struct Link {
    href: String,
    text: Option<String>,
    variant: LinkVariant,
    size: Size,
    external: bool,
    target: Option<String>,
    rel: Option<String>,
    icon: Option<String>,
    icon_position: IconPosition,
    aria_label: Option<String>,
    external_sr_text: String,
    sr_only_class: String,
    class: Option<String>,
    on_click: Option<Callback>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: None,
            variant: LinkVariant::default(),
            size: Size::default(),
            external: false,
            target: None,
            rel: None,
            icon: None,
            icon_position: IconPosition::default(),
            aria_label: None,
            external_sr_text: "(opens in a new tab)".to_string(),
            sr_only_class: "sr-only".to_string(),
            class: None,
            on_click: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn variant(mut self, variant: LinkVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Force external treatment for hrefs that do not look external
    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Decorative icon glyph; only rendered for external links
    pub fn icon(mut self, icon: impl Into<String>, position: IconPosition) -> Self {
        self.icon = Some(icon.into());
        self.icon_position = position;
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn external_sr_text(mut self, text: impl Into<String>) -> Self {
        self.external_sr_text = text.into();
        self
    }

    pub fn sr_only_class(mut self, class: impl Into<String>) -> Self {
        self.sr_only_class = class.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn on_click(mut self, on_click: impl Into<Callback>) -> Self {
        self.on_click = Some(on_click.into());
        self
    }

    pub fn is_external(&self) -> bool {
        self.external || looks_external(&self.href)
    }

    fn icon_span(&self, icon: &str) -> El {
        let class = match self.icon_position {
            IconPosition::Before => "ally-link__icon ally-link__icon--before",
            IconPosition::After => "ally-link__icon ally-link__icon--after",
        };
        El::new("span").class(class).attr("aria-hidden", "true").text(icon)
    }
}

impl Component for Link {
    fn name(&self) -> &'static str {
        "Link"
    }

    fn mount(&self, host: &mut Host, parent: NodeId) -> Mounted {
        let external = self.is_external();
        let target = match (&self.target, external) {
            (Some(target), _) => Some(target.as_str()),
            (None, true) => Some(DEFAULT_EXTERNAL_TARGET),
            (None, false) => None,
        };
        let rel = match (&self.rel, external) {
            (Some(rel), _) => Some(rel.as_str()),
            (None, true) => Some(DEFAULT_EXTERNAL_REL),
            (None, false) => None,
        };

        let variant = format!("ally-link--{}", self.variant.as_str());
        let size = format!("ally-link--{}", self.size.as_str());
        let class = cn(&[
            Some("ally-link"),
            Some(&variant),
            Some(&size),
            external.then_some("ally-link--external"),
            self.class.as_deref(),
        ]);

        let icon = self.icon.as_deref().filter(|_| external);
        let announce_new_tab =
            external && target == Some(DEFAULT_EXTERNAL_TARGET) && self.aria_label.is_none();

        let mut el = El::new("a")
            .attr("href", self.href.as_str())
            .class(class)
            .attr_opt("target", target)
            .attr_opt("rel", rel)
            .attr_opt("aria-label", self.aria_label.clone());
        if self.icon_position == IconPosition::Before {
            el = el.child_opt(icon.map(|i| self.icon_span(i)));
        }
        if let Some(text) = &self.text {
            el = el.child(El::new("span").class("ally-link__text").text(text.as_str()));
            if announce_new_tab {
                el = el.child(
                    El::new("span")
                        .class(self.sr_only_class.as_str())
                        .text(format!(" {}", self.external_sr_text)),
                );
            }
        }
        if self.icon_position == IconPosition::After {
            el = el.child_opt(icon.map(|i| self.icon_span(i)));
        }

        let mut mounted = el.mount(host, parent);
        if let Some(on_click) = self.on_click.clone() {
            let node = mounted.root();
            mounted.add_guard(host.on_node(node, EventKind::Click, move |host, _| on_click.call(host, ())));
        }
        mounted
    }
}
