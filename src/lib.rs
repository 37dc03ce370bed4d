//! # pith
//!
//! A fast, dependency-light library for finding the main content region of
//! an HTML document.
//!
//! No single signal (tag name, ARIA role, text density, visual styling) is
//! reliable across real-world sites, so pith layers independent heuristics:
//! a semantic analyzer, a content-density analyzer, and a visual-hierarchy
//! analyzer, composed by an orchestrator that ranks their candidates, breaks
//! ties deterministically, and degrades gracefully when signals disagree.
//!
//! ## Quick Start
//!
//! ```
//! use pith::{analyze, Method};
//!
//! let html = r#"<main><article>
//!     <h1>Title</h1>
//!     <p>The article body goes here.</p>
//! </article></main>"#;
//!
//! let result = analyze(html);
//! assert!(result.main_content.is_some());
//! assert_eq!(result.method, Method::SemanticHtml5);
//! ```
//!
//! ## Working with the DOM
//!
//! Analysis runs over an arena-allocated DOM; parse once and reuse the tree:
//!
//! ```
//! use pith::dom::parse_html;
//! use pith::analyze::DomAnalyzer;
//!
//! let dom = parse_html("<main><p>Hello</p></main>");
//! let analyzer = DomAnalyzer::new();
//!
//! let result = analyzer.analyze_content(&dom);
//! let exhaustive = analyzer.extract_with_fallback(&dom);
//! # let _ = (result, exhaustive);
//! ```
//!
//! Everything is synchronous and read-only: the document tree is never
//! mutated, and the same analyzer can serve any number of documents.

pub mod analyze;
pub mod dom;
pub mod layout;
pub mod metadata;
pub mod style;
pub mod text;

mod error;

pub use analyze::{
    AnalyzeOptions, ContentAnalysis, DomAnalyzer, FallbackExtraction, Method,
};
pub use error::{Error, Result};
pub use metadata::PageMetadata;

/// Parse an HTML string and identify its main content region with default
/// options.
pub fn analyze(html: &str) -> ContentAnalysis {
    let dom = dom::parse_html(html);
    DomAnalyzer::new().analyze_content(&dom)
}
