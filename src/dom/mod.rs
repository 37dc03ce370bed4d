//! HTML parsing into an arena DOM.
//!
//! The analyzers in [`crate::analyze`] operate on the [`Dom`] produced here.
//! Parsing is lenient (html5ever recovers like a browser does) and the
//! resulting tree is never mutated by analysis.

mod arena;
mod element_ref;
mod tree_sink;

pub use arena::{Attribute, Children, Descendants, Dom, Node, NodeData, NodeId};
pub use element_ref::{
    ElementRef, PithSelectors, Selector, matches_selector, parse_selector, select_first,
};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse an HTML document into a [`Dom`].
///
/// This is the entry point for analysis: parse once, then hand the tree to
/// [`crate::analyze::DomAnalyzer`].
///
/// # Example
///
/// ```
/// use pith::dom::parse_html;
///
/// let dom = parse_html("<main><p>Hello</p></main>");
/// assert!(dom.find_by_tag("main").is_some());
/// ```
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}
