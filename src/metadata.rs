//! Page metadata extraction.
//!
//! Pulls title, author, and description from Open Graph tags, falling back
//! to `<title>` and the standard meta tags.

use crate::dom::{Dom, NodeId};
use crate::text;

/// Metadata attached to every successful analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl PageMetadata {
    /// Extract metadata from a parsed document.
    pub fn extract(dom: &Dom) -> Self {
        Self {
            title: meta_property(dom, "og:title").or_else(|| title_text(dom)),
            author: meta_name(dom, "author"),
            description: meta_property(dom, "og:description")
                .or_else(|| meta_name(dom, "description")),
        }
    }
}

/// First `<meta property=...>` content value.
fn meta_property(dom: &Dom, property: &str) -> Option<String> {
    meta_content(dom, "property", property)
}

/// First `<meta name=...>` content value.
fn meta_name(dom: &Dom, name: &str) -> Option<String> {
    meta_content(dom, "name", name)
}

fn meta_content(dom: &Dom, key_attr: &str, key: &str) -> Option<String> {
    dom.elements_by_tag("meta")
        .find(|&id| {
            dom.attr(id, key_attr)
                .is_some_and(|v| v.eq_ignore_ascii_case(key))
        })
        .and_then(|id| dom.attr(id, "content"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn title_text(dom: &Dom) -> Option<String> {
    let title: NodeId = dom.find_by_tag("title")?;
    let text = text::clean_text(dom, title);
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_open_graph_wins_over_title() {
        let dom = parse_html(
            r#"<head>
                <title>Fallback Title</title>
                <meta property="og:title" content="OG Title">
                <meta property="og:description" content="OG Desc">
            </head><body></body>"#,
        );
        let meta = PageMetadata::extract(&dom);
        assert_eq!(meta.title.as_deref(), Some("OG Title"));
        assert_eq!(meta.description.as_deref(), Some("OG Desc"));
    }

    #[test]
    fn test_title_fallback() {
        let dom = parse_html("<head><title>Plain Title</title></head><body></body>");
        let meta = PageMetadata::extract(&dom);
        assert_eq!(meta.title.as_deref(), Some("Plain Title"));
    }

    #[test]
    fn test_author_and_description() {
        let dom = parse_html(
            r#"<head>
                <meta name="author" content="Jane Doe">
                <meta name="description" content="A page.">
            </head><body></body>"#,
        );
        let meta = PageMetadata::extract(&dom);
        assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
        assert_eq!(meta.description.as_deref(), Some("A page."));
    }

    #[test]
    fn test_empty_document() {
        let dom = parse_html("<div></div>");
        let meta = PageMetadata::extract(&dom);
        assert_eq!(meta, PageMetadata::default());
    }
}
