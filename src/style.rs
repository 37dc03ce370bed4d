//! Inline-style interpretation for visibility and prominence scoring.
//!
//! A browser host would answer these questions through `getComputedStyle`.
//! Here the computed style of an element is derived from its `style`
//! attribute (parsed leniently with cssparser), the `hidden` attribute, and
//! a small table of user-agent defaults for tags with intrinsic styling
//! (headings, bold elements). Stylesheet cascade is out of scope: pages that
//! hide chrome via external CSS simply fall through to the other signals.

use cssparser::{Parser, ParserInput, Token};

use crate::dom::{Dom, NodeId};

/// Default font size in px when nothing else applies.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Default font weight when nothing else applies.
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// CSS display values we distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    None,
    #[default]
    Other,
}

/// CSS visibility values we distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// The subset of computed style the analyzers consult.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub opacity: f32,
    pub font_size: f32,
    pub font_weight: u16,
    pub has_background: bool,
    pub has_border: bool,
    pub has_box_shadow: bool,
}

impl ComputedStyle {
    /// True if the element renders nothing visible.
    pub fn is_hidden(&self) -> bool {
        self.display == Display::None || self.visibility == Visibility::Hidden || self.opacity == 0.0
    }
}

/// Compute the effective style of an element.
pub fn computed_style(dom: &Dom, id: NodeId) -> ComputedStyle {
    let mut style = ComputedStyle {
        opacity: 1.0,
        font_size: default_font_size(dom.tag_name(id)),
        font_weight: default_font_weight(dom.tag_name(id)),
        ..ComputedStyle::default()
    };

    // UA sheet: [hidden] { display: none }
    if dom.attr(id, "hidden").is_some() {
        style.display = Display::None;
    }

    if let Some(inline) = dom.attr(id, "style") {
        apply_inline_style(&mut style, inline);
    }

    style
}

fn default_font_size(tag: Option<&str>) -> f32 {
    match tag {
        Some("h1") => 32.0,
        Some("h2") => 24.0,
        Some("h3") => 18.7,
        Some("h4") => 16.0,
        Some("h5") => 13.3,
        Some("h6") => 10.7,
        Some("small") => 13.3,
        _ => DEFAULT_FONT_SIZE,
    }
}

fn default_font_weight(tag: Option<&str>) -> u16 {
    match tag {
        Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "b" | "strong" | "th") => 700,
        _ => DEFAULT_FONT_WEIGHT,
    }
}

/// Parse a `style` attribute (declaration list) and apply recognized
/// properties. Unknown properties and malformed declarations are skipped,
/// matching browser recovery behavior.
fn apply_inline_style(style: &mut ComputedStyle, css: &str) {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let result: Result<(), cssparser::ParseError<'_, ()>> = parser.try_parse(|i| {
            let property = match i.next()? {
                Token::Ident(name) => name.to_string().to_lowercase(),
                _ => return Err(i.new_custom_error(())),
            };

            i.skip_whitespace();
            match i.next()? {
                Token::Colon => {}
                _ => return Err(i.new_custom_error(())),
            }
            i.skip_whitespace();

            // Collect value tokens until semicolon
            let mut values: Vec<Token> = Vec::new();
            loop {
                match i.next() {
                    Ok(Token::Semicolon) => break,
                    Ok(t) => values.push(t.clone()),
                    Err(_) => break,
                }
            }

            apply_property(style, &property, &values);
            Ok(())
        });

        if result.is_err() {
            // Skip to next semicolon to recover
            loop {
                match parser.next() {
                    Ok(Token::Semicolon) => break,
                    Ok(_) => continue,
                    Err(_) => break,
                }
            }
        }
    }
}

fn apply_property(style: &mut ComputedStyle, property: &str, values: &[Token]) {
    match property {
        "display" => {
            if let Some(Token::Ident(v)) = values.first() {
                style.display = if v.eq_ignore_ascii_case("none") {
                    Display::None
                } else {
                    Display::Other
                };
            }
        }
        "visibility" => {
            if let Some(Token::Ident(v)) = values.first() {
                style.visibility = if v.eq_ignore_ascii_case("hidden")
                    || v.eq_ignore_ascii_case("collapse")
                {
                    Visibility::Hidden
                } else {
                    Visibility::Visible
                };
            }
        }
        "opacity" => {
            if let Some(v) = parse_number(values) {
                style.opacity = v.clamp(0.0, 1.0);
            }
        }
        "font-size" => {
            if let Some(px) = parse_font_size(values) {
                style.font_size = px;
            }
        }
        "font-weight" => {
            if let Some(w) = parse_font_weight(values) {
                style.font_weight = w;
            }
        }
        "background" | "background-color" => {
            style.has_background = is_visible_color(values);
        }
        "border" | "border-style" | "border-width" => {
            style.has_border = is_visible_border(values);
        }
        "box-shadow" => {
            style.has_box_shadow = !matches!(
                values.first(),
                Some(Token::Ident(v)) if v.eq_ignore_ascii_case("none")
            ) && !values.is_empty();
        }
        _ => {}
    }
}

fn parse_number(values: &[Token]) -> Option<f32> {
    match values.first() {
        Some(Token::Number { value, .. }) => Some(*value),
        Some(Token::Percentage { unit_value, .. }) => Some(*unit_value),
        _ => None,
    }
}

/// Convert a font-size value to px. Relative units resolve against the
/// document default rather than the parent, since no cascade is tracked.
fn parse_font_size(values: &[Token]) -> Option<f32> {
    match values.first()? {
        Token::Dimension { value, unit, .. } => {
            let v = *value;
            match unit.to_ascii_lowercase().as_str() {
                "px" => Some(v),
                "pt" => Some(v * 4.0 / 3.0),
                "em" | "rem" => Some(v * DEFAULT_FONT_SIZE),
                "ex" => Some(v * DEFAULT_FONT_SIZE * 0.5),
                _ => None,
            }
        }
        Token::Percentage { unit_value, .. } => Some(unit_value * DEFAULT_FONT_SIZE),
        Token::Number { value, .. } if *value == 0.0 => Some(0.0),
        Token::Ident(kw) => match kw.to_ascii_lowercase().as_str() {
            "xx-small" => Some(9.6),
            "x-small" => Some(10.7),
            "small" => Some(13.3),
            "medium" => Some(16.0),
            "large" => Some(19.2),
            "x-large" => Some(24.0),
            "xx-large" => Some(32.0),
            _ => None,
        },
        _ => None,
    }
}

fn parse_font_weight(values: &[Token]) -> Option<u16> {
    match values.first()? {
        Token::Number { value, .. } => Some((*value).clamp(1.0, 1000.0) as u16),
        Token::Ident(kw) => match kw.to_ascii_lowercase().as_str() {
            "normal" => Some(400),
            "bold" => Some(700),
            "bolder" => Some(700),
            "lighter" => Some(300),
            _ => None,
        },
        _ => None,
    }
}

fn is_visible_color(values: &[Token]) -> bool {
    for token in values {
        match token {
            Token::Ident(v) => {
                let v = v.to_ascii_lowercase();
                if v == "transparent" || v == "none" || v == "inherit" || v == "initial" {
                    continue;
                }
                return true;
            }
            Token::Hash(_) | Token::IDHash(_) | Token::Function(_) => return true,
            _ => {}
        }
    }
    false
}

fn is_visible_border(values: &[Token]) -> bool {
    let mut has_none_style = false;
    let mut has_zero_width = false;
    let mut saw_anything = false;
    for token in values {
        saw_anything = true;
        match token {
            Token::Ident(v) if v.eq_ignore_ascii_case("none") || v.eq_ignore_ascii_case("hidden") => {
                has_none_style = true;
            }
            Token::Dimension { value, .. } if *value == 0.0 => has_zero_width = true,
            Token::Number { value, .. } if *value == 0.0 => has_zero_width = true,
            _ => {}
        }
    }
    saw_anything && !has_none_style && !has_zero_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn style_of(html: &str, tag: &str) -> ComputedStyle {
        let dom = parse_html(html);
        let id = dom.find_by_tag(tag).unwrap();
        computed_style(&dom, id)
    }

    #[test]
    fn test_defaults() {
        let s = style_of("<div>x</div>", "div");
        assert_eq!(s.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(s.font_weight, DEFAULT_FONT_WEIGHT);
        assert_eq!(s.opacity, 1.0);
        assert!(!s.is_hidden());
    }

    #[test]
    fn test_heading_defaults() {
        let s = style_of("<h1>x</h1>", "h1");
        assert_eq!(s.font_size, 32.0);
        assert_eq!(s.font_weight, 700);
    }

    #[test]
    fn test_display_none() {
        let s = style_of(r#"<div style="display:none">x</div>"#, "div");
        assert!(s.is_hidden());
    }

    #[test]
    fn test_hidden_attribute() {
        let s = style_of("<div hidden>x</div>", "div");
        assert!(s.is_hidden());
    }

    #[test]
    fn test_visibility_and_opacity() {
        assert!(style_of(r#"<div style="visibility:hidden">x</div>"#, "div").is_hidden());
        assert!(style_of(r#"<div style="opacity:0">x</div>"#, "div").is_hidden());
        assert!(!style_of(r#"<div style="opacity:0.5">x</div>"#, "div").is_hidden());
    }

    #[test]
    fn test_font_size_units() {
        assert_eq!(
            style_of(r#"<div style="font-size: 20px">x</div>"#, "div").font_size,
            20.0
        );
        assert_eq!(
            style_of(r#"<div style="font-size: 1.5em">x</div>"#, "div").font_size,
            24.0
        );
        assert_eq!(
            style_of(r#"<div style="font-size: 12pt">x</div>"#, "div").font_size,
            16.0
        );
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(
            style_of(r#"<div style="font-weight: bold">x</div>"#, "div").font_weight,
            700
        );
        assert_eq!(
            style_of(r#"<div style="font-weight: 550">x</div>"#, "div").font_weight,
            550
        );
    }

    #[test]
    fn test_emphasis_signals() {
        let s = style_of(
            r#"<div style="background: #fff; border: 1px solid black; box-shadow: 0 1px 2px gray">x</div>"#,
            "div",
        );
        assert!(s.has_background);
        assert!(s.has_border);
        assert!(s.has_box_shadow);

        let t = style_of(r#"<div style="background: transparent; border: none">x</div>"#, "div");
        assert!(!t.has_background);
        assert!(!t.has_border);
    }

    #[test]
    fn test_malformed_declarations_recover() {
        let s = style_of(
            r#"<div style="color:; ;; font-size: 20px; @bogus">x</div>"#,
            "div",
        );
        assert_eq!(s.font_size, 20.0);
    }
}
