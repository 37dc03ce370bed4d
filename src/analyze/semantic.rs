//! Semantic analysis: HTML5 tags and ARIA roles.
//!
//! Scores elements from what the markup *claims* they are. This is the most
//! reliable signal when present, and the orchestrator tries it first.

use crate::dom::{Dom, NodeId};
use crate::text;

use super::ScoreMap;

/// Base weight per semantic tag, in processing order.
///
/// Order matters twice: earlier tags win score ties (argmax keeps the first
/// maximum), and `<main>` must be recorded before anything that could tie
/// with it.
const TAG_WEIGHTS: &[(&str, f32)] = &[
    ("main", 1.0),
    ("article", 0.95),
    ("section", 0.7),
    ("div", 0.3),
    ("aside", 0.2),
    ("header", 0.15),
    ("nav", 0.1),
    ("footer", 0.1),
];

/// ARIA roles that mark content containers.
const CONTENT_ROLES: &[(&str, f32)] = &[
    ("main", 0.9),
    ("article", 0.8),
    ("document", 0.8),
    ("application", 0.8),
];

/// Landmark regions recognized from tags or ARIA roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Landmarks {
    pub header: Option<NodeId>,
    pub navigation: Option<NodeId>,
    pub main: Option<NodeId>,
    pub complementary: Option<NodeId>,
    pub footer: Option<NodeId>,
    pub search: Option<NodeId>,
    pub region: Option<NodeId>,
}

/// Result of semantic analysis.
#[derive(Debug)]
pub struct SemanticAnalysis {
    pub scores: ScoreMap,
    pub primary: Option<NodeId>,
    pub landmarks: Landmarks,
    pub confidence: f32,
}

/// Score elements by tag semantics and ARIA roles, build the landmark map,
/// and propose a primary content element.
pub fn analyze(dom: &Dom) -> SemanticAnalysis {
    let mut scores = ScoreMap::new();

    // Tag pass: recorded before ARIA so insertion order favors native tags.
    for &(tag, base) in TAG_WEIGHTS {
        for el in dom.elements_by_tag(tag) {
            scores.record_max(el, element_score(dom, el, base));
        }
    }

    // ARIA pass: never lowers a score the tag pass already assigned.
    for el in dom.descendants(dom.document()) {
        let Some(role) = dom.attr(el, "role") else {
            continue;
        };
        if let Some(&(_, base)) = CONTENT_ROLES
            .iter()
            .find(|(name, _)| role.eq_ignore_ascii_case(name))
        {
            let text_bonus = (text::text_len(dom, el) as f32 / 1000.0).min(1.0) * 0.2;
            scores.record_max(el, (base + text_bonus).clamp(0.0, 1.0));
        }
    }

    let landmarks = collect_landmarks(dom);
    let primary = select_primary(dom, &scores);
    let confidence = document_confidence(dom, primary);

    SemanticAnalysis {
        scores,
        primary,
        landmarks,
        confidence,
    }
}

/// Tag base weight plus text, heading, and paragraph bonuses, clamped.
fn element_score(dom: &Dom, el: NodeId, base: f32) -> f32 {
    let text_bonus = (text::text_len(dom, el) as f32 / 1000.0).min(1.0) * 0.3;
    let heading_bonus = (text::heading_count(dom, el) as f32 * 0.1).min(0.3);
    let paragraph_bonus = (text::count_tag(dom, el, "p") as f32 * 0.05).min(0.2);
    (base + text_bonus + heading_bonus + paragraph_bonus).clamp(0.0, 1.0)
}

/// Two-pass landmark fill.
///
/// HTML5 tags populate first; ARIA landmark roles run second and
/// unconditionally overwrite, because an explicit role is a stronger claim
/// than tag semantics. This must stay a two-pass overwrite, not a
/// fill-if-absent merge.
fn collect_landmarks(dom: &Dom) -> Landmarks {
    let mut landmarks = Landmarks::default();

    landmarks.header = dom.find_by_tag("header");
    landmarks.navigation = dom.find_by_tag("nav");
    landmarks.main = dom.find_by_tag("main");
    landmarks.complementary = dom.find_by_tag("aside");
    landmarks.footer = dom.find_by_tag("footer");

    for el in dom.descendants(dom.document()) {
        let Some(role) = dom.attr(el, "role") else {
            continue;
        };
        let slot = match role.to_ascii_lowercase().as_str() {
            "banner" => &mut landmarks.header,
            "navigation" => &mut landmarks.navigation,
            "main" => &mut landmarks.main,
            "complementary" => &mut landmarks.complementary,
            "contentinfo" => &mut landmarks.footer,
            "search" => &mut landmarks.search,
            "region" => &mut landmarks.region,
            _ => continue,
        };
        // Overwrite HTML5-sourced entries; keep the first element per role
        if !landmark_role_seen(dom, *slot, role) {
            *slot = Some(el);
        }
    }

    landmarks
}

/// True if `slot` was already claimed by an earlier element carrying the
/// same ARIA role (as opposed to an HTML5 tag, which ARIA overwrites).
fn landmark_role_seen(dom: &Dom, slot: Option<NodeId>, role: &str) -> bool {
    slot.is_some_and(|id| {
        dom.attr(id, "role")
            .is_some_and(|r| r.eq_ignore_ascii_case(role))
    })
}

/// Prefer a `<main>` that scored above 0.5; otherwise the global argmax.
fn select_primary(dom: &Dom, scores: &ScoreMap) -> Option<NodeId> {
    if let Some(main) = dom.find_by_tag("main")
        && scores.get(main).unwrap_or(0.0) > 0.5
    {
        return Some(main);
    }
    scores.argmax()
}

/// Document-level confidence, independent of per-element scores.
fn document_confidence(dom: &Dom, primary: Option<NodeId>) -> f32 {
    let mut confidence: f32 = 0.0;

    if dom.find_by_tag("main").is_some()
        || dom.find_by_tag("article").is_some()
        || dom.find_by_tag("section").is_some()
    {
        confidence += 0.3;
    }

    let has_content_role = dom.descendants(dom.document()).any(|el| {
        dom.attr(el, "role")
            .is_some_and(|r| r.eq_ignore_ascii_case("main") || r.eq_ignore_ascii_case("article"))
    });
    if has_content_role {
        confidence += 0.2;
    }

    if dom.find_by_tag("h1").is_some() && dom.find_by_tag("h2").is_some() {
        confidence += 0.1;
    }

    if let Some(primary) = primary {
        confidence += 0.2;
        if matches!(dom.tag_name(primary), Some("main" | "article" | "section")) {
            confidence += 0.2;
        }
    }

    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_main_tag_is_primary() {
        let dom = parse_html(
            "<main><h1>Title</h1><p>Body paragraph with some words in it.</p></main>",
        );
        let result = analyze(&dom);
        let main = dom.find_by_tag("main").unwrap();
        assert_eq!(result.primary, Some(main));
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_main_beats_sibling_section() {
        let filler = "<p>".to_string() + &"text ".repeat(300) + "</p>";
        let html = format!("<section><h1>s</h1><h2>t</h2>{filler}</section><main>{filler}</main>");
        let dom = parse_html(&html);
        let result = analyze(&dom);
        let main = dom.find_by_tag("main").unwrap();
        assert_eq!(result.primary, Some(main));
    }

    #[test]
    fn test_aria_never_lowers_score() {
        // role=article base 0.8 must not reduce an article tag's 0.95+
        let dom = parse_html(r#"<article role="article"><p>words here now</p></article>"#);
        let result = analyze(&dom);
        let article = dom.find_by_tag("article").unwrap();
        assert!(result.scores.get(article).unwrap() >= 0.95);
    }

    #[test]
    fn test_aria_landmark_overwrites_html5() {
        let dom = parse_html(
            r#"<main>tag main</main><div role="main">aria main</div>"#,
        );
        let result = analyze(&dom);
        let div = dom
            .descendants(dom.document())
            .find(|&id| dom.attr(id, "role") == Some("main"))
            .unwrap();
        assert_eq!(result.landmarks.main, Some(div));
    }

    #[test]
    fn test_first_aria_landmark_wins_over_later_duplicate() {
        let dom = parse_html(
            r#"<div role="navigation" id="first">a</div><div role="navigation" id="second">b</div>"#,
        );
        let result = analyze(&dom);
        let first = dom
            .descendants(dom.document())
            .find(|&id| dom.element_id(id) == Some("first"))
            .unwrap();
        assert_eq!(result.landmarks.navigation, Some(first));
    }

    #[test]
    fn test_confidence_components() {
        let dom = parse_html("<div>nothing semantic</div>");
        let result = analyze(&dom);
        assert!(result.confidence <= 0.2 + f32::EPSILON);

        let rich = parse_html(
            "<main><h1>a</h1><h2>b</h2><p>text</p></main>",
        );
        let result = analyze(&rich);
        // main exists (+0.3), h1+h2 (+0.1), primary found (+0.2), primary is main (+0.2)
        assert!(result.confidence >= 0.8 - f32::EPSILON);
    }

    #[test]
    fn test_monotonic_in_headings_and_paragraphs() {
        let before = parse_html("<article><p>one paragraph of text</p></article>");
        let after = parse_html(
            "<article><h2>head</h2><p>one paragraph of text</p><p>two</p></article>",
        );
        let s1 = analyze(&before)
            .scores
            .get(before.find_by_tag("article").unwrap())
            .unwrap();
        let s2 = analyze(&after)
            .scores
            .get(after.find_by_tag("article").unwrap())
            .unwrap();
        assert!(s2 >= s1);
    }

    #[test]
    fn test_no_semantic_markup_still_scores_divs() {
        let dom = parse_html("<div><p>some text content here</p></div>");
        let result = analyze(&dom);
        assert!(result.primary.is_some());
    }
}
