//! Content-region analysis.
//!
//! Three analyzers feed one orchestrator, tried in a fixed priority order:
//!
//! 1. **Semantic** - what the markup claims (tags, ARIA roles)
//! 2. **Density** - where the text-heavy blocks are
//! 3. **Visual** - what would render prominently
//! 4. **Heuristic fallback** - well-known selectors, then largest block
//!
//! The first strategy clearing its confidence threshold wins; when all
//! fail, the result degrades to `Method::None` rather than an error.
//! [`DomAnalyzer::extract_with_fallback`] is the exhaustive variant: it
//! walks every strategy in order, isolating failures, and accepts the first
//! one producing sufficiently long text.

pub mod density;
pub mod semantic;
pub mod visual;

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use crate::dom::{Dom, NodeId, parse_selector, select_first};
use crate::error::Result;
use crate::layout::Viewport;
use crate::metadata::PageMetadata;
use crate::text;

pub use density::{ContentBlock, DensityAnalysis};
pub use semantic::{Landmarks, SemanticAnalysis};
pub use visual::VisualAnalysis;

/// Selectors probed by the heuristic fallback, in priority order.
const FALLBACK_SELECTORS: &[&str] = &[
    "article",
    "[role=main]",
    "[role=article]",
    ".content",
    "#content",
    ".post",
    ".entry",
    ".story",
    ".article-body",
    ".post-content",
    "main",
];

/// Minimum text length for a heuristic-fallback selector hit.
const MIN_HEURISTIC_TEXT: usize = 100;

/// Element scores keyed by node identity, with insertion order retained so
/// ties resolve deterministically.
#[derive(Debug, Default)]
pub struct ScoreMap {
    scores: HashMap<NodeId, f32>,
    order: Vec<NodeId>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score, keeping the maximum if the node was already scored.
    pub fn record_max(&mut self, id: NodeId, score: f32) {
        match self.scores.get_mut(&id) {
            Some(existing) => {
                if score > *existing {
                    *existing = score;
                }
            }
            None => {
                self.scores.insert(id, score);
                self.order.push(id);
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<f32> {
        self.scores.get(&id).copied()
    }

    /// Highest-scoring node; ties go to the earliest-recorded node.
    pub fn argmax(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for &id in &self.order {
            let score = self.scores[&id];
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Iterate (node, score) in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        self.order.iter().map(|&id| (id, self.scores[&id]))
    }

    /// Iterate scores in insertion order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.order.iter().map(|&id| self.scores[&id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    SemanticHtml5,
    AriaRoles,
    ContentDensity,
    VisualHierarchy,
    TextToNoise,
    HeuristicFallback,
    None,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::SemanticHtml5 => "semantic-html5",
            Method::AriaRoles => "aria-roles",
            Method::ContentDensity => "content-density",
            Method::VisualHierarchy => "visual-hierarchy",
            Method::TextToNoise => "text-to-noise",
            Method::HeuristicFallback => "heuristic-fallback",
            Method::None => "none",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable analysis parameters.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Viewport assumed by the visual analyzer.
    pub viewport: Viewport,
    /// Minimum extracted text length for `extract_with_fallback` to accept
    /// a strategy's element.
    pub min_fallback_text: usize,
    /// Length of the clean-text preview attached to results.
    pub preview_len: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            min_fallback_text: 100,
            preview_len: 200,
        }
    }
}

/// Final analysis result.
#[derive(Debug)]
pub struct ContentAnalysis {
    /// The subtree judged to hold the page's primary readable content.
    pub main_content: Option<NodeId>,
    /// Heuristic certainty in [0,1]; not a calibrated probability.
    pub confidence: f32,
    pub method: Method,
    /// Density of the accepted element, when one was found.
    pub content_density: Option<f32>,
    /// Clean text length over serialized markup length.
    pub text_to_noise: Option<f32>,
    /// Clean-text preview of the accepted element.
    pub clean_text: Option<String>,
    /// Set when the visual analyzer produced the result.
    pub visual_importance: Option<f32>,
    pub metadata: PageMetadata,
}

/// Result of the exhaustive fallback mode.
#[derive(Debug)]
pub struct FallbackExtraction {
    pub success: bool,
    pub content: Option<String>,
    pub element: Option<NodeId>,
    pub strategies_attempted: usize,
    pub successful_strategy: Option<Method>,
    pub error: Option<String>,
}

/// The orchestrator: runs the analyzers in priority order and picks one
/// result with a single confidence number.
///
/// Stateless and re-entrant; the same analyzer can serve any number of
/// documents.
#[derive(Debug, Default, Clone)]
pub struct DomAnalyzer {
    options: AnalyzeOptions,
}

impl DomAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AnalyzeOptions) -> Self {
        Self { options }
    }

    /// Identify the main content region of a document.
    ///
    /// Never errors and never panics; insufficient signal degrades to the
    /// next strategy and finally to a `Method::None` result.
    pub fn analyze_content(&self, dom: &Dom) -> ContentAnalysis {
        let metadata = PageMetadata::extract(dom);

        // 1. Semantic markup with high document confidence
        let sem = semantic::analyze(dom);
        if let Some(primary) = sem.primary
            && sem.confidence >= 0.7
        {
            debug!("accepted strategy=semantic-html5 confidence={}", sem.confidence);
            return self.accept(dom, primary, sem.confidence, Method::SemanticHtml5, None, metadata);
        }

        // 2. A main landmark is still a strong signal when document
        //    confidence fell short
        if let Some(main) = sem.landmarks.main {
            let method = if dom.attr(main, "role").is_some() {
                Method::AriaRoles
            } else {
                Method::SemanticHtml5
            };
            let confidence = sem.confidence.max(0.7);
            debug!("accepted strategy={method} confidence={confidence}");
            return self.accept(dom, main, confidence, method, None, metadata);
        }

        // 3. Text density
        let den = density::analyze(dom);
        if let Some(block) = den.primary_block
            && block.score > 0.5
        {
            debug!("accepted strategy=content-density score={}", block.score);
            return self.accept(dom, block.node, block.score, Method::ContentDensity, None, metadata);
        }

        // 4. Visual prominence
        let vis = visual::analyze(dom, self.options.viewport);
        if let Some(primary) = vis.primary {
            debug!(
                "accepted strategy=visual-hierarchy importance={}",
                vis.visual_importance
            );
            return self.accept(
                dom,
                primary,
                vis.visual_importance,
                Method::VisualHierarchy,
                Some(vis.visual_importance),
                metadata,
            );
        }

        // 5. Heuristic fallback
        if let Some(el) = self.heuristic_fallback(dom) {
            debug!("accepted strategy=heuristic-fallback");
            return self.accept(dom, el, 0.4, Method::HeuristicFallback, None, metadata);
        }

        // 6. Nothing found
        ContentAnalysis {
            main_content: None,
            confidence: 0.0,
            method: Method::None,
            content_density: None,
            text_to_noise: None,
            clean_text: None,
            visual_importance: None,
            metadata,
        }
    }

    /// Exhaustive mode: try every strategy in the fixed order, isolating
    /// failures, and accept the first whose element carries enough text.
    pub fn extract_with_fallback(&self, dom: &Dom) -> FallbackExtraction {
        let mut attempted = 0;

        for &method in Self::strategies() {
            attempted += 1;
            let found = match self.attempt_strategy(method, dom) {
                Ok(found) => found,
                Err(e) => {
                    warn!("strategy {method} failed: {e}");
                    continue;
                }
            };
            let Some(el) = found else {
                continue;
            };

            let content = text::clean_text(dom, el);
            if content.chars().count() > self.options.min_fallback_text {
                debug!("fallback extraction succeeded with strategy={method}");
                return FallbackExtraction {
                    success: true,
                    content: Some(content),
                    element: Some(el),
                    strategies_attempted: attempted,
                    successful_strategy: Some(method),
                    error: None,
                };
            }
        }

        FallbackExtraction {
            success: false,
            content: None,
            element: None,
            strategies_attempted: attempted,
            successful_strategy: None,
            error: Some("no strategy produced sufficient content".to_string()),
        }
    }

    /// The fixed strategy order, exposed for introspection and testing.
    pub fn strategies() -> &'static [Method] {
        &[
            Method::SemanticHtml5,
            Method::AriaRoles,
            Method::ContentDensity,
            Method::VisualHierarchy,
            Method::TextToNoise,
            Method::HeuristicFallback,
        ]
    }

    fn attempt_strategy(&self, method: Method, dom: &Dom) -> Result<Option<NodeId>> {
        let found = match method {
            Method::SemanticHtml5 => semantic::analyze(dom).primary,
            Method::AriaRoles => dom.descendants(dom.document()).find(|&el| {
                dom.attr(el, "role").is_some_and(|r| {
                    r.eq_ignore_ascii_case("main") || r.eq_ignore_ascii_case("article")
                })
            }),
            Method::ContentDensity => density::analyze(dom).primary_block.map(|b| b.node),
            Method::VisualHierarchy => visual::analyze(dom, self.options.viewport).primary,
            Method::TextToNoise => self.best_text_to_noise(dom),
            Method::HeuristicFallback => self
                .try_heuristic_selectors(dom)?
                .or_else(|| self.largest_text_block(dom)),
            Method::None => None,
        };
        Ok(found)
    }

    /// Candidate block with the highest clean-text to markup ratio.
    fn best_text_to_noise(&self, dom: &Dom) -> Option<NodeId> {
        let body = dom.body()?;
        let mut best: Option<(NodeId, f32)> = None;
        for el in density::candidate_elements(dom, body) {
            let clean_len = text::text_len(dom, el);
            if clean_len < density::MIN_TEXT_LENGTH {
                continue;
            }
            let markup_len = text::inner_html_len(dom, el);
            if markup_len == 0 {
                continue;
            }
            let ratio = clean_len as f32 / markup_len as f32;
            if best.is_none_or(|(_, r)| ratio > r) {
                best = Some((el, ratio));
            }
        }
        best.map(|(el, _)| el)
    }

    /// Fixed selector list, then the largest text block.
    fn heuristic_fallback(&self, dom: &Dom) -> Option<NodeId> {
        match self.try_heuristic_selectors(dom) {
            Ok(Some(el)) => return Some(el),
            Ok(None) => {}
            Err(e) => warn!("heuristic selectors failed: {e}"),
        }
        self.largest_text_block(dom)
    }

    fn try_heuristic_selectors(&self, dom: &Dom) -> Result<Option<NodeId>> {
        for selector_str in FALLBACK_SELECTORS {
            let selector = parse_selector(selector_str)?;
            if let Some(el) = select_first(dom, &selector)
                && text::text_len(dom, el) > MIN_HEURISTIC_TEXT
            {
                return Ok(Some(el));
            }
        }
        Ok(None)
    }

    /// The single largest-text block among div/section/article.
    fn largest_text_block(&self, dom: &Dom) -> Option<NodeId> {
        let mut best: Option<(NodeId, usize)> = None;
        for el in dom.descendants(dom.document()) {
            if !matches!(dom.tag_name(el), Some("div" | "section" | "article")) {
                continue;
            }
            let len = text::text_len(dom, el);
            if len > 0 && best.is_none_or(|(_, l)| len > l) {
                best = Some((el, len));
            }
        }
        best.map(|(el, _)| el)
    }

    fn accept(
        &self,
        dom: &Dom,
        el: NodeId,
        confidence: f32,
        method: Method,
        visual_importance: Option<f32>,
        metadata: PageMetadata,
    ) -> ContentAnalysis {
        let clean = text::clean_text(dom, el);
        let markup_len = text::inner_html_len(dom, el);
        let text_to_noise = if markup_len == 0 {
            None
        } else {
            Some(clean.chars().count() as f32 / markup_len as f32)
        };

        ContentAnalysis {
            main_content: Some(el),
            confidence: confidence.clamp(0.0, 1.0),
            method,
            content_density: Some(density::calculate_density(dom, el)),
            text_to_noise,
            clean_text: Some(text::preview(&clean, self.options.preview_len)),
            visual_importance,
            metadata,
        }
    }
}
