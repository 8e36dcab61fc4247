//! Content importer.
//!
//! Lifts the content region of a foreign report document into a host
//! document, together with the foreign document's named meta tags.

use std::fmt;
use std::str::FromStr;

use markup5ever_rcdom::{Handle, RcDom};
use tracing::{debug, info};

use super::dom;
use crate::error::ImportError;

/// Selector for the content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    pub fn matches(&self, node: &Handle) -> bool {
        match self {
            Selector::Tag(tag) => dom::tag_name(node).is_some_and(|t| t.eq_ignore_ascii_case(tag)),
            Selector::Id(id) => dom::attr(node, "id").as_deref() == Some(id.as_str()),
            Selector::Class(class) => dom::attr(node, "class")
                .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class)),
        }
    }
}

impl FromStr for Selector {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ImportError::InvalidSelector {
            selector: s.to_string(),
        };
        let valid_name = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        let selector = if let Some(id) = s.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some(class) = s.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else {
            Selector::Tag(s.to_ascii_lowercase())
        };

        let name = match &selector {
            Selector::Id(n) | Selector::Class(n) | Selector::Tag(n) => n,
        };
        if valid_name(name) {
            Ok(selector)
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// The document the viewer shows, which imported content is merged into.
pub struct HostDocument {
    dom: RcDom,
}

impl HostDocument {
    /// An empty HTML document.
    pub fn blank() -> Result<Self, ImportError> {
        Self::parse("<!DOCTYPE html><html><head></head><body></body></html>")
    }

    pub fn parse(html: &str) -> Result<Self, ImportError> {
        Ok(Self {
            dom: dom::parse_html(html)?,
        })
    }

    pub fn head(&self) -> Result<Handle, ImportError> {
        dom::find_tag(&self.dom.document, "head")
            .ok_or(ImportError::MissingElement { element: "head" })
    }

    pub fn body(&self) -> Result<Handle, ImportError> {
        dom::find_tag(&self.dom.document, "body")
            .ok_or(ImportError::MissingElement { element: "body" })
    }

    /// `name` attributes of the meta tags in the head, in order.
    pub fn meta_names(&self) -> Vec<String> {
        let Ok(head) = self.head() else {
            return Vec::new();
        };
        dom::descendants(&head)
            .iter()
            .filter(|n| dom::tag_name(n) == Some("meta"))
            .filter_map(|n| dom::attr(n, "name"))
            .collect()
    }

    pub fn find(&self, selector: &Selector) -> Option<Handle> {
        dom::find_first(&self.dom.document, |n| selector.matches(n))
    }

    pub fn to_html(&self) -> Result<String, ImportError> {
        Ok(dom::to_html(&self.dom.document)?)
    }
}

/// What an import moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Names of the meta tags moved to the host head.
    pub moved_meta: Vec<String>,
    /// Number of links retargeted to a new browsing context.
    pub retargeted_links: usize,
}

#[derive(Debug, Clone)]
pub struct ContentImporter {
    selector: Selector,
}

impl ContentImporter {
    pub fn new(selector: Selector) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Merge `foreign_html` into `host`.
    ///
    /// The host is left untouched when the content region is missing.
    pub fn import(
        &self,
        foreign_html: &str,
        host: &mut HostDocument,
    ) -> Result<ImportSummary, ImportError> {
        let foreign = dom::parse_html(foreign_html)?;
        let content = dom::find_first(&foreign.document, |n| self.selector.matches(n)).ok_or_else(
            || ImportError::MissingContent {
                selector: self.selector.to_string(),
            },
        )?;
        let host_head = host.head()?;
        let host_body = host.body()?;

        let mut summary = ImportSummary::default();
        if let Some(head) = dom::find_tag(&foreign.document, "head") {
            for meta in dom::descendants(&head) {
                if dom::tag_name(&meta) != Some("meta") {
                    continue;
                }
                let Some(name) = dom::attr(&meta, "name").filter(|n| !n.is_empty()) else {
                    continue;
                };
                if name.eq_ignore_ascii_case("viewport") {
                    continue;
                }
                debug!("Moving meta '{}' to host head", name);
                dom::append(&host_head, meta);
                summary.moved_meta.push(name);
            }
        }

        for anchor in dom::descendants(&content) {
            if dom::tag_name(&anchor) == Some("a") && dom::has_attr(&anchor, "href") {
                dom::set_attr(&anchor, "target", "_blank");
                summary.retargeted_links += 1;
            }
        }

        dom::append(&host_body, content);
        info!(
            "Imported {} ({} meta, {} links)",
            self.selector,
            summary.moved_meta.len(),
            summary.retargeted_links
        );
        Ok(summary)
    }
}

impl Default for ContentImporter {
    fn default() -> Self {
        Self::new(Selector::Id(DEFAULT_CONTENT_ID.to_string()))
    }
}

const DEFAULT_CONTENT_ID: &str = "content";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parse() {
        assert_eq!("#content".parse::<Selector>().unwrap(), Selector::Id("content".into()));
        assert_eq!(".report".parse::<Selector>().unwrap(), Selector::Class("report".into()));
        assert_eq!("MAIN".parse::<Selector>().unwrap(), Selector::Tag("main".into()));
        assert!("#".parse::<Selector>().is_err());
        assert!("div > p".parse::<Selector>().is_err());
    }

    #[test]
    fn test_selector_display_roundtrip() {
        for text in ["#content", ".report", "main"] {
            assert_eq!(text.parse::<Selector>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_class_selector_matches_token() {
        let host = HostDocument::parse("<div class=\"wide report\">x</div>").unwrap();
        assert!(host.find(&Selector::Class("report".into())).is_some());
        assert!(host.find(&Selector::Class("rep".into())).is_none());
    }

    #[test]
    fn test_missing_content_leaves_host_untouched() {
        let mut host = HostDocument::blank().unwrap();
        let before = host.to_html().unwrap();

        let err = ContentImporter::default()
            .import(
                "<head><meta name=description content=x></head><body><p>no region</p></body>",
                &mut host,
            )
            .unwrap_err();

        assert!(matches!(err, ImportError::MissingContent { .. }));
        assert_eq!(host.to_html().unwrap(), before);
    }
}
