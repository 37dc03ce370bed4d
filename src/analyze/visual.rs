//! Visual hierarchy analysis: rendered prominence.
//!
//! Scores candidate containers by how prominent they would render: font
//! size and weight, position relative to the viewport, occupied area, and
//! emphasis styling. Geometry comes from the synthetic layout model, so the
//! scores are estimates; they matter only when the semantic and density
//! signals have already failed.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::layout::{Layout, Rect, Viewport};
use crate::style::{self, ComputedStyle};
use crate::text;

use super::ScoreMap;
use super::density;

/// Result of visual analysis.
#[derive(Debug)]
pub struct VisualAnalysis {
    pub scores: ScoreMap,
    pub position_weights: HashMap<NodeId, f32>,
    pub visual_importance: f32,
    pub primary: Option<NodeId>,
}

/// Score candidate containers by rendered prominence.
pub fn analyze(dom: &Dom, viewport: Viewport) -> VisualAnalysis {
    let layout = Layout::compute(dom, viewport);
    let mut scores = ScoreMap::new();
    let mut position_weights = HashMap::new();

    let root = dom.body().unwrap_or_else(|| dom.document());
    for el in density::candidate_elements(dom, root) {
        let style = style::computed_style(dom, el);
        if !is_visible(dom, el, &style) {
            continue;
        }

        let rect = layout.rect(el);
        let position = position_score(rect, viewport);
        position_weights.insert(el, position);
        scores.record_max(el, element_score(&style, rect, position, viewport));
    }

    let primary = scores.argmax();
    let visual_importance = importance(&scores);

    VisualAnalysis {
        scores,
        position_weights,
        visual_importance,
        primary,
    }
}

/// Hidden, zero-content elements can't be visually prominent.
///
/// Without a real layout engine this reduces to the style check plus a
/// text-or-children presence check.
fn is_visible(dom: &Dom, el: NodeId, style: &ComputedStyle) -> bool {
    if style.is_hidden() {
        return false;
    }
    if text::text_len(dom, el) > 0 {
        return true;
    }
    dom.children(el).any(|c| dom.is_element(c))
}

fn element_score(style: &ComputedStyle, rect: Rect, position: f32, viewport: Viewport) -> f32 {
    let font_size = font_size_score(style.font_size);
    let font_weight = font_weight_score(style.font_weight);
    let area_ratio = (rect.area() / (viewport.width * viewport.height)).min(1.0);

    let mut emphasis = 0.0;
    if style.has_background {
        emphasis += 0.1;
    }
    if style.has_border {
        emphasis += 0.05;
    }
    if style.has_box_shadow {
        emphasis += 0.05;
    }

    let score = font_size * 0.25
        + font_weight * 0.15
        + position * 0.2
        + style.opacity * 0.1
        + area_ratio * 0.2
        + emphasis;
    score.clamp(0.0, 1.0)
}

fn font_size_score(px: f32) -> f32 {
    match px {
        px if px < 12.0 => 0.3,
        px if px < 14.0 => 0.5,
        px if px < 16.0 => 0.7,
        px if px < 20.0 => 0.8,
        px if px < 24.0 => 0.9,
        _ => 1.0,
    }
}

fn font_weight_score(weight: u16) -> f32 {
    match weight {
        w if w < 400 => 0.3,
        400 => 0.5,
        w if w < 600 => 0.7,
        w if w < 700 => 0.8,
        _ => 1.0,
    }
}

/// Vertical zone multiplier times horizontal centering factor.
fn position_score(rect: Rect, viewport: Viewport) -> f32 {
    let vertical = if rect.bottom() <= 0.0 {
        0.5 // scrolled above the viewport
    } else if rect.y < viewport.height {
        1.0
    } else if rect.y < viewport.height * 2.0 {
        0.7 // just below the fold
    } else {
        0.3
    };

    // Elements are assumed 400px wide when judging horizontal centering
    let center = rect.x + 200.0;
    let half = viewport.width / 2.0;
    let distance = ((center - half).abs() / half).clamp(0.0, 1.0);
    let horizontal = 1.0 - distance * 0.5;

    vertical * horizontal
}

/// Mean of the top three scores, with a bonus for a clear leader.
fn importance(scores: &ScoreMap) -> f32 {
    let mut sorted: Vec<f32> = scores.values().collect();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    if sorted.is_empty() {
        return 0.0;
    }

    let top = &sorted[..sorted.len().min(3)];
    let mut importance = top.iter().sum::<f32>() / top.len() as f32;

    if sorted.len() >= 2 && sorted[0] - sorted[1] > 0.2 {
        importance += 0.2;
    }

    importance.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn analyze_default(html: &str) -> (crate::dom::Dom, VisualAnalysis) {
        let dom = parse_html(html);
        let result = analyze(&dom, Viewport::default());
        (dom, result)
    }

    #[test]
    fn test_scores_in_unit_range() {
        let (_, result) = analyze_default(
            r#"<div style="font-size:32px; font-weight:bold; background:#eee; border:1px solid; box-shadow:0 0 2px">
                <p>prominent content block with plenty of words</p>
            </div>"#,
        );
        for (_, score) in result.scores.iter() {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_hidden_elements_not_scored() {
        let (dom, result) = analyze_default(
            r#"<div style="display:none"><p>invisible</p></div><div id="v"><p>visible</p></div>"#,
        );
        let visible = dom
            .descendants(dom.document())
            .find(|&id| dom.element_id(id) == Some("v"))
            .unwrap();
        assert_eq!(result.primary, Some(visible));
        assert_eq!(result.scores.iter().count(), 1);
    }

    #[test]
    fn test_styled_block_wins() {
        let (dom, result) = analyze_default(
            r#"<div id="plain"><p>words words words</p></div>
               <div id="hero" style="font-size:24px; font-weight:bold; background:#fff"><p>words words words</p></div>"#,
        );
        let hero = dom
            .descendants(dom.document())
            .find(|&id| dom.element_id(id) == Some("hero"))
            .unwrap();
        assert_eq!(result.primary, Some(hero));
    }

    #[test]
    fn test_empty_document() {
        let (_, result) = analyze_default("<p>no candidate containers here</p>");
        assert!(result.primary.is_none());
        assert_eq!(result.visual_importance, 0.0);
    }

    #[test]
    fn test_clear_leader_bonus() {
        let (_, result) = analyze_default(
            r#"<div id="hero" style="font-size:32px;font-weight:bold;background:#fff;border:1px solid;box-shadow:0 0 4px"><p>big prominent styled hero block</p></div>
               <div style="font-size:10px;opacity:0.4"><p>tiny</p></div>"#,
        );
        // importance includes the mean of both plus possibly the leader bonus
        assert!(result.visual_importance > 0.0);
        assert!(result.visual_importance <= 1.0);
    }
}
