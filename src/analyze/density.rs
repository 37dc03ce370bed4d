//! Content density analysis: text-to-markup ratios and block structure.
//!
//! Two scoring formulas live here on purpose. `calculate_density` is the
//! general per-element density measure exposed to callers and attached to
//! final results; `analyze_block` is the internal heuristic used to rank
//! candidate blocks against each other. They weight different signals and
//! are not interchangeable.

use crate::dom::{Dom, NodeId};
use crate::style;
use crate::text;

/// Clean text shorter than this scores zero density.
pub const MIN_TEXT_LENGTH: usize = 25;

/// Blocks with fewer words than this are discarded.
pub const MIN_WORD_COUNT: usize = 5;

/// Tags that can hold a content block.
pub(crate) const CANDIDATE_TAGS: &[&str] = &[
    "div",
    "section",
    "article",
    "main",
    "aside",
    "blockquote",
    "figure",
    "pre",
];

/// Class/id substrings that mark page chrome rather than content.
const NON_CONTENT_PATTERNS: &[&str] = &[
    "nav",
    "menu",
    "sidebar",
    "footer",
    "header",
    "banner",
    "advertisement",
    "popup",
    "modal",
    "overlay",
    "tooltip",
    "dropdown",
];

/// A scored candidate block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBlock {
    pub node: NodeId,
    pub score: f32,
    pub text_length: usize,
    pub link_density: f32,
    pub paragraph_count: usize,
    pub word_count: usize,
}

/// Result of density analysis.
#[derive(Debug, Default)]
pub struct DensityAnalysis {
    /// Kept blocks, sorted by score descending, pairwise non-nested.
    pub blocks: Vec<ContentBlock>,
    pub primary_block: Option<ContentBlock>,
    pub average_density: f32,
}

/// Rank candidate blocks under `<body>` by how article-like their text is.
pub fn analyze(dom: &Dom) -> DensityAnalysis {
    let Some(body) = dom.body() else {
        return DensityAnalysis::default();
    };

    let blocks = identify_content_blocks(dom, body);
    let average_density = if blocks.is_empty() {
        0.0
    } else {
        blocks.iter().map(|b| b.score).sum::<f32>() / blocks.len() as f32
    };
    let primary_block = blocks.first().copied();

    DensityAnalysis {
        blocks,
        primary_block,
        average_density,
    }
}

/// General text-density score for a single element, in [0,1].
pub fn calculate_density(dom: &Dom, el: NodeId) -> f32 {
    let clean = text::clean_text(dom, el);
    let clean_len = clean.chars().count();
    if clean_len < MIN_TEXT_LENGTH {
        return 0.0;
    }

    let markup_len = text::inner_html_len(dom, el);
    let text_ratio = if markup_len == 0 {
        0.0
    } else {
        (clean_len as f32 / markup_len as f32).min(1.0)
    };

    let link_density = text::link_density(dom, el);
    let word_density = (clean.split_whitespace().count() as f32 / 100.0).min(1.0);
    let paragraph_bonus = (text::count_tag(dom, el, "p") as f32 * 0.1).min(0.3);
    let list_count = text::count_tag(dom, el, "ul") + text::count_tag(dom, el, "ol");
    let list_bonus = (list_count as f32 * 0.05).min(0.15);

    let score = text_ratio * 0.3
        + word_density * 0.3
        + paragraph_bonus * 0.2
        + list_bonus * 0.1
        + (1.0 - link_density) * 0.1;
    score.clamp(0.0, 1.0)
}

/// Find, score, and rank candidate blocks under `root`.
///
/// The returned set is sorted descending and strictly disjoint: no kept
/// block is an ancestor or descendant of another.
pub fn identify_content_blocks(dom: &Dom, root: NodeId) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = candidate_elements(dom, root)
        .into_iter()
        .map(|el| analyze_block(dom, el))
        .filter(|b| b.score > 0.1 && b.word_count >= MIN_WORD_COUNT)
        .collect();

    // Stable sort keeps document order among equal scores
    blocks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    filter_nested_blocks(dom, blocks)
}

/// Candidate elements under `root` in document order: candidate tags minus
/// chrome (by class/id pattern) and hidden elements.
pub(crate) fn candidate_elements(dom: &Dom, root: NodeId) -> Vec<NodeId> {
    dom.descendants(root)
        .filter(|&el| {
            dom.tag_name(el)
                .is_some_and(|tag| CANDIDATE_TAGS.contains(&tag))
        })
        .filter(|&el| !is_non_content(dom, el))
        .filter(|&el| !style::computed_style(dom, el).is_hidden())
        .collect()
}

/// Internal ranking heuristic, independently weighted from
/// [`calculate_density`].
fn analyze_block(dom: &Dom, el: NodeId) -> ContentBlock {
    let text_length = text::text_len(dom, el);
    let word_count = text::word_count(dom, el);
    let paragraph_count = text::count_tag(dom, el, "p");
    let link_density = text::link_density(dom, el);

    let length_score = (text_length as f32 / 1000.0).min(1.0);
    let word_score = (word_count as f32 / 100.0).min(1.0);
    let paragraph_score = (paragraph_count as f32 / 5.0).min(1.0);

    let mut content_bonus = 0.0;
    if text::heading_count(dom, el) > 0 {
        content_bonus += 0.1;
    }
    if paragraph_count > 0 {
        content_bonus += 0.1;
    }
    if text::count_tag(dom, el, "ul") + text::count_tag(dom, el, "ol") > 0 {
        content_bonus += 0.05;
    }

    // Link-heavy blocks are usually navigation
    let density_penalty = if link_density > 0.3 { 0.5 } else { 1.0 };

    let score = (length_score * 0.3 + word_score * 0.3 + paragraph_score * 0.2 + content_bonus)
        * density_penalty;

    ContentBlock {
        node: el,
        score: score.clamp(0.0, 1.0),
        text_length,
        link_density,
        paragraph_count,
        word_count,
    }
}

/// Check class and id against the chrome patterns, case-insensitively.
fn is_non_content(dom: &Dom, el: NodeId) -> bool {
    let mut haystack = String::new();
    if let Some(id) = dom.element_id(el) {
        haystack.push_str(&id.to_lowercase());
        haystack.push(' ');
    }
    for class in dom.element_classes(el) {
        haystack.push_str(&class.to_lowercase());
        haystack.push(' ');
    }
    if haystack.is_empty() {
        return false;
    }
    NON_CONTENT_PATTERNS
        .iter()
        .any(|pattern| haystack.contains(pattern))
}

/// Drop any block nested with an already-kept higher-ranked block.
///
/// Input must be sorted by rank; output preserves that order and contains no
/// ancestor/descendant pair.
fn filter_nested_blocks(dom: &Dom, ranked: Vec<ContentBlock>) -> Vec<ContentBlock> {
    let mut kept: Vec<ContentBlock> = Vec::with_capacity(ranked.len());
    for block in ranked {
        let nested = kept.iter().any(|k| {
            dom.is_ancestor(k.node, block.node) || dom.is_ancestor(block.node, k.node)
        });
        if !nested {
            kept.push(block);
        }
    }
    kept
}
