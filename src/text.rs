//! Text extraction and measurement over the arena DOM.
//!
//! `clean_text` is the canonical text view used by every analyzer: a pure
//! read-only walk that skips script/style/noscript subtrees and collapses
//! whitespace. Nothing here mutates the document.

use crate::dom::{Dom, NodeData, NodeId};

/// Tags whose text content is never user-visible.
const NOISE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

fn is_noise_element(dom: &Dom, id: NodeId) -> bool {
    dom.tag_name(id)
        .is_some_and(|tag| NOISE_TAGS.contains(&tag))
}

/// Extract the visible text of a subtree with whitespace collapsed.
pub fn clean_text(dom: &Dom, root: NodeId) -> String {
    let mut out = String::new();
    collect_text(dom, root, &mut out);
    collapse_whitespace(&out)
}

fn collect_text(dom: &Dom, id: NodeId, out: &mut String) {
    for child in dom.children(id) {
        match dom.get(child).map(|n| &n.data) {
            Some(NodeData::Text(t)) => out.push_str(t),
            Some(NodeData::Element { .. }) => {
                if !is_noise_element(dom, child) {
                    // Block boundaries become a single space after collapsing
                    out.push(' ');
                    collect_text(dom, child, out);
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = true;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Length in characters of the visible text of a subtree.
pub fn text_len(dom: &Dom, root: NodeId) -> usize {
    clean_text(dom, root).chars().count()
}

/// Number of whitespace-separated words in the visible text of a subtree.
pub fn word_count(dom: &Dom, root: NodeId) -> usize {
    clean_text(dom, root).split_whitespace().count()
}

/// Character length of a subtree's text, summed per text node with no
/// inter-element boundary spaces.
///
/// This is the measurement basis for [`link_density`]: both the anchor text
/// and the total must count the same characters, or the boundary spaces
/// [`clean_text`] inserts between elements would dilute the ratio.
pub fn raw_text_len(dom: &Dom, root: NodeId) -> usize {
    let mut total = 0;
    for child in dom.children(root) {
        match dom.get(child).map(|n| &n.data) {
            Some(NodeData::Text(t)) => total += collapse_whitespace(t).chars().count(),
            Some(NodeData::Element { .. }) => {
                if !is_noise_element(dom, child) {
                    total += raw_text_len(dom, child);
                }
            }
            _ => {}
        }
    }
    total
}

/// Total character length of text contained in anchor descendants, measured
/// on the same basis as [`raw_text_len`].
///
/// The subtree root itself counts if it is an anchor.
pub fn link_text_len(dom: &Dom, root: NodeId) -> usize {
    if dom.tag_name(root) == Some("a") {
        return raw_text_len(dom, root);
    }
    let mut total = 0;
    let mut skip_below: Option<NodeId> = None;
    for id in dom.descendants(root) {
        if let Some(ancestor) = skip_below {
            if dom.is_ancestor(ancestor, id) {
                continue;
            }
            skip_below = None;
        }
        if dom.tag_name(id) == Some("a") {
            total += raw_text_len(dom, id);
            // Nested anchors are invalid HTML; count the outermost only
            skip_below = Some(id);
        }
    }
    total
}

/// Count descendant elements with the given tag.
pub fn count_tag(dom: &Dom, root: NodeId, tag: &str) -> usize {
    dom.descendants(root)
        .filter(|&id| dom.tag_name(id) == Some(tag))
        .count()
}

/// Count descendant headings (h1 through h6).
pub fn heading_count(dom: &Dom, root: NodeId) -> usize {
    dom.descendants(root)
        .filter(|&id| {
            matches!(
                dom.tag_name(id),
                Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6")
            )
        })
        .count()
}

/// Serialize the inner HTML of a subtree.
///
/// Approximate but deterministic; used for text-to-markup ratios and for the
/// CLI's region dump. Attribute values are not escaped beyond quotes.
pub fn inner_html(dom: &Dom, root: NodeId) -> String {
    let mut out = String::new();
    for child in dom.children(root) {
        serialize_node(dom, child, &mut out);
    }
    out
}

/// Length of the serialized inner HTML of a subtree.
pub fn inner_html_len(dom: &Dom, root: NodeId) -> usize {
    inner_html(dom, root).chars().count()
}

fn serialize_node(dom: &Dom, id: NodeId, out: &mut String) {
    match dom.get(id).map(|n| &n.data) {
        Some(NodeData::Text(t)) => out.push_str(t),
        Some(NodeData::Element { name, attrs, .. }) => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                out.push_str(&attr.value.replace('"', "&quot;"));
                out.push('"');
            }
            out.push('>');
            for child in dom.children(id) {
                serialize_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        _ => {}
    }
}

/// Fraction of a subtree's text contained in anchors, in [0,1].
///
/// Numerator and denominator both use the per-text-node measure, so a block
/// whose every character sits inside an anchor scores exactly 1.0.
pub fn link_density(dom: &Dom, root: NodeId) -> f32 {
    let total = raw_text_len(dom, root);
    if total == 0 {
        return 0.0;
    }
    let linked = link_text_len(dom, root);
    (linked as f32 / total as f32).clamp(0.0, 1.0)
}

/// Truncate a string to at most `max` characters on a char boundary.
pub fn preview(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_clean_text_skips_script_and_style() {
        let dom = parse_html(
            "<div><p>Visible</p><script>var x = 1;</script><style>p{}</style>text</div>",
        );
        let div = dom.find_by_tag("div").unwrap();
        let text = clean_text(&dom, div);
        assert!(text.contains("Visible"));
        assert!(text.contains("text"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("p{}"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_word_count() {
        let dom = parse_html("<p>one two   three</p>");
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(word_count(&dom, p), 3);
    }

    #[test]
    fn test_link_density() {
        let dom = parse_html(r#"<div><a href="/x">linked</a> plain</div>"#);
        let div = dom.find_by_tag("div").unwrap();
        let density = link_density(&dom, div);
        assert!(density > 0.0 && density < 1.0);

        // Element boundaries must not dilute an all-links block below 1.0
        let nav = parse_html(r#"<div><a href="/a">one</a><a href="/b">two</a></div>"#);
        let d = nav.find_by_tag("div").unwrap();
        assert_eq!(link_density(&nav, d), 1.0);
    }

    #[test]
    fn test_raw_text_len_counts_no_boundary_spaces() {
        let dom = parse_html("<div><a>one</a><a>two</a></div>");
        let div = dom.find_by_tag("div").unwrap();
        assert_eq!(raw_text_len(&dom, div), 6);
        assert_eq!(link_text_len(&dom, div), 6);
        // clean_text still separates the anchors for readability
        assert_eq!(clean_text(&dom, div), "one two");
    }

    #[test]
    fn test_inner_html_round_trips_structure() {
        let dom = parse_html(r#"<div><p class="x">hi</p></div>"#);
        let div = dom.find_by_tag("div").unwrap();
        let html = inner_html(&dom, div);
        assert!(html.contains("<p class=\"x\">hi</p>"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 5), "héllo");
        assert_eq!(preview("short", 200), "short");
    }

    #[test]
    fn test_heading_count() {
        let dom = parse_html("<div><h1>a</h1><h2>b</h2><p>c</p></div>");
        let div = dom.find_by_tag("div").unwrap();
        assert_eq!(heading_count(&dom, div), 2);
    }
}
