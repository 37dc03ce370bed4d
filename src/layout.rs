//! Synthetic layout model.
//!
//! The visual analyzer needs bounding rects and a viewport, which a browser
//! host would provide. Without a layout engine, rects are estimated from
//! document order and text volume: content earlier in the document sits
//! higher on the page, and taller blocks carry more text. The estimate is
//! crude but deterministic, which is what the position and area scores
//! require.

use std::collections::HashMap;

use crate::dom::{Dom, NodeData, NodeId};

/// Characters assumed to fit on one rendered line.
const CHARS_PER_LINE: f32 = 100.0;

/// Assumed rendered line height in px.
const LINE_HEIGHT: f32 = 20.0;

/// Viewport dimensions in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// An estimated bounding rect in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Precomputed layout estimates for one document.
///
/// Built in a single pass; rect lookups are O(1) afterwards.
pub struct Layout {
    viewport: Viewport,
    /// Characters of text preceding each element in document order.
    starts: HashMap<NodeId, usize>,
    /// Characters of text contained in each element's subtree.
    totals: HashMap<NodeId, usize>,
}

impl Layout {
    /// Estimate the layout of every element in the document.
    pub fn compute(dom: &Dom, viewport: Viewport) -> Self {
        let mut layout = Self {
            viewport,
            starts: HashMap::new(),
            totals: HashMap::new(),
        };
        let mut cursor = 0usize;
        layout.measure(dom, dom.document(), &mut cursor);
        layout
    }

    fn measure(&mut self, dom: &Dom, id: NodeId, cursor: &mut usize) {
        for child in dom.children(id) {
            match dom.get(child).map(|n| &n.data) {
                Some(NodeData::Text(t)) => {
                    *cursor += t.split_whitespace().map(|w| w.len() + 1).sum::<usize>();
                }
                Some(NodeData::Element { .. }) => {
                    // Head content and non-rendered subtrees occupy no space
                    if matches!(
                        dom.tag_name(child),
                        Some("head" | "script" | "style" | "noscript" | "template")
                    ) {
                        self.starts.insert(child, *cursor);
                        self.totals.insert(child, 0);
                        continue;
                    }
                    let start = *cursor;
                    self.starts.insert(child, start);
                    self.measure(dom, child, cursor);
                    self.totals.insert(child, *cursor - start);
                }
                _ => {}
            }
        }
    }

    /// The viewport this layout was computed against.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Estimated bounding rect of an element.
    ///
    /// Elements with no text occupy a zero-height rect at their document
    /// position.
    pub fn rect(&self, id: NodeId) -> Rect {
        let start = self.starts.get(&id).copied().unwrap_or(0);
        let chars = self.totals.get(&id).copied().unwrap_or(0);

        let y = (start as f32 / CHARS_PER_LINE).floor() * LINE_HEIGHT;
        let lines = (chars as f32 / CHARS_PER_LINE).ceil();
        let height = if chars == 0 { 0.0 } else { lines.max(1.0) * LINE_HEIGHT };

        Rect {
            x: 0.0,
            y,
            width: self.viewport.width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_later_content_sits_lower() {
        let filler = "word ".repeat(200);
        let html = format!("<div id=\"top\">{filler}</div><div id=\"bottom\">tail</div>");
        let dom = parse_html(&html);
        let layout = Layout::compute(&dom, Viewport::default());

        let top = dom.find(|n| matches!(&n.data, crate::dom::NodeData::Element { id, .. } if id.as_deref() == Some("top"))).unwrap();
        let bottom = dom.find(|n| matches!(&n.data, crate::dom::NodeData::Element { id, .. } if id.as_deref() == Some("bottom"))).unwrap();

        assert!(layout.rect(bottom).y > layout.rect(top).y);
        assert!(layout.rect(top).height > layout.rect(bottom).height);
    }

    #[test]
    fn test_empty_element_zero_height() {
        let dom = parse_html("<div></div>");
        let layout = Layout::compute(&dom, Viewport::default());
        let div = dom.find_by_tag("div").unwrap();
        assert_eq!(layout.rect(div).height, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let html = "<main><p>some content here</p></main>";
        let dom = parse_html(html);
        let a = Layout::compute(&dom, Viewport::default());
        let b = Layout::compute(&dom, Viewport::default());
        let main = dom.find_by_tag("main").unwrap();
        assert_eq!(a.rect(main), b.rect(main));
    }
}
