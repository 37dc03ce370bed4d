use pith::dom::parse_html;
use pith::{analyze, DomAnalyzer, Method};

const ARTICLE_PAGE: &str = r#"<html>
<head>
  <title>Arena Allocation in Practice</title>
  <meta name="author" content="R. Holt">
  <meta property="og:description" content="Why arenas beat reference counting for tree-shaped data.">
</head>
<body>
  <header>Example Site</header>
  <nav><a href="/">Home</a> <a href="/archive">Archive</a> <a href="/about">About</a></nav>
  <main>
    <article>
      <h1>Arena Allocation in Practice</h1>
      <p>Allocating every node of a tree individually scatters the structure
      across the heap and ties every traversal to pointer chasing. An arena
      keeps the nodes in one contiguous block and replaces owned pointers
      with plain indices.</p>
      <p>The payoff is not just cache locality. Indices are copyable, so the
      borrow checker stops fighting you over parent links, and dropping the
      whole tree is a single deallocation instead of a recursive walk.</p>
    </article>
  </main>
  <aside>Related: slab allocators, generational indices</aside>
  <footer>Copyright 2026</footer>
</body>
</html>"#;

const ARIA_PAGE: &str = r#"<html><body>
  <div role="banner">Example Site</div>
  <div role="navigation"><a href="/">Home</a></div>
  <div role="main">
    <div role="article">
      <p>Screen readers navigate by landmark, and pages built before the
      semantic elements existed still expose their structure this way. The
      role attribute carries the same intent as the tag names do.</p>
    </div>
  </div>
  <div role="contentinfo">Copyright</div>
</body></html>"#;

fn long_paragraph(sentences: usize) -> String {
    format!(
        "<p>{}</p>",
        "The quick brown fox jumps over the lazy dog. ".repeat(sentences)
    )
}

#[test]
fn test_semantic_page_uses_main() {
    let dom = parse_html(ARTICLE_PAGE);
    let result = DomAnalyzer::new().analyze_content(&dom);

    assert_eq!(result.method, Method::SemanticHtml5);
    assert!(result.confidence > 0.6, "confidence was {}", result.confidence);
    let main = result.main_content.expect("should find main content");
    assert_eq!(dom.tag_name(main), Some("main"));
}

#[test]
fn test_semantic_page_metadata() {
    let dom = parse_html(ARTICLE_PAGE);
    let result = DomAnalyzer::new().analyze_content(&dom);

    assert_eq!(
        result.metadata.title.as_deref(),
        Some("Arena Allocation in Practice")
    );
    assert_eq!(result.metadata.author.as_deref(), Some("R. Holt"));
    assert!(result.metadata.description.is_some());
}

#[test]
fn test_aria_page_uses_role_main() {
    let dom = parse_html(ARIA_PAGE);
    let result = DomAnalyzer::new().analyze_content(&dom);

    assert_eq!(result.method, Method::AriaRoles);
    let main = result.main_content.expect("should find main content");
    assert_eq!(dom.attr(main, "role"), Some("main"));
    assert!(result.confidence >= 0.7);
}

#[test]
fn test_density_page_picks_content_div() {
    let html = format!(
        r#"<html><body>
          <div class="site-banner">Example Site</div>
          <div class="sidebar"><a href="/a">one</a> <a href="/b">two</a></div>
          <div id="content">{}{}{}</div>
          <div class="site-legal">Copyright</div>
        </body></html>"#,
        long_paragraph(8),
        long_paragraph(8),
        long_paragraph(8),
    );
    let dom = parse_html(&html);
    let result = DomAnalyzer::new().analyze_content(&dom);

    assert_eq!(result.method, Method::ContentDensity);
    let content = result.main_content.expect("should find main content");
    assert_eq!(dom.element_id(content), Some("content"));
    assert!(result.confidence > 0.5, "confidence was {}", result.confidence);
}

#[test]
fn test_main_beats_larger_sibling_section() {
    let html = format!(
        "<html><body><main>{}</main><section>{}{}</section></body></html>",
        long_paragraph(6),
        long_paragraph(12),
        long_paragraph(12),
    );
    let dom = parse_html(&html);
    let result = DomAnalyzer::new().analyze_content(&dom);

    let chosen = result.main_content.expect("should find main content");
    assert_eq!(dom.tag_name(chosen), Some("main"));
    assert!(result.confidence > 0.5);
}

#[test]
fn test_empty_document_degrades_to_none() {
    let dom = parse_html("<div></div>");
    let result = DomAnalyzer::new().analyze_content(&dom);

    assert_eq!(result.method, Method::None);
    assert!(result.main_content.is_none());
    assert_eq!(result.confidence, 0.0);
    assert!(result.clean_text.is_none());
}

#[test]
fn test_fallback_on_empty_document() {
    let dom = parse_html("<div></div>");
    let result = DomAnalyzer::new().extract_with_fallback(&dom);

    assert!(!result.success);
    assert!(result.content.is_none());
    assert!(result.strategies_attempted > 3);
    assert!(result.successful_strategy.is_none());
    assert!(result.error.is_some());
}

#[test]
fn test_fallback_on_article_page() {
    let dom = parse_html(ARTICLE_PAGE);
    let result = DomAnalyzer::new().extract_with_fallback(&dom);

    assert!(result.success);
    assert_eq!(result.successful_strategy, Some(Method::SemanticHtml5));
    assert_eq!(result.strategies_attempted, 1);
    let content = result.content.expect("should extract content");
    assert!(content.chars().count() > 100);
    assert!(content.contains("cache locality"));
}

#[test]
fn test_fallback_reaches_largest_text_block() {
    // Every selector-based strategy loses here: the only semantic element is
    // empty and the text lives in a chrome-classed div, so the exhaustive
    // chain must fall through to the largest-text-block half of the
    // heuristic strategy.
    let html = format!(
        r#"<main></main><div class="sidebar">{}</div>"#,
        "filler words for the largest block ".repeat(12)
    );
    let dom = parse_html(&html);
    let result = DomAnalyzer::new().extract_with_fallback(&dom);

    assert!(result.success);
    assert_eq!(result.successful_strategy, Some(Method::HeuristicFallback));
    let el = result.element.expect("element on success");
    assert_eq!(dom.tag_name(el), Some("div"));
    assert!(result.content.expect("content on success").chars().count() > 100);
}

#[test]
fn test_analysis_is_deterministic() {
    let dom = parse_html(ARTICLE_PAGE);
    let analyzer = DomAnalyzer::new();

    let first = analyzer.analyze_content(&dom);
    let second = analyzer.analyze_content(&dom);

    assert_eq!(first.method, second.method);
    assert_eq!(first.main_content, second.main_content);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.clean_text, second.clean_text);
}

#[test]
fn test_convenience_entry_point() {
    let result = analyze(ARTICLE_PAGE);
    assert_eq!(result.method, Method::SemanticHtml5);
    assert!(result.main_content.is_some());
}

#[test]
fn test_result_fields_populated_on_success() {
    let result = analyze(ARTICLE_PAGE);

    let density = result.content_density.expect("density attached");
    assert!((0.0..=1.0).contains(&density));
    let ratio = result.text_to_noise.expect("ratio attached");
    assert!(ratio > 0.0 && ratio <= 1.0);
    let preview = result.clean_text.expect("preview attached");
    assert!(preview.chars().count() <= 200);
    assert!(!preview.is_empty());
}

#[test]
fn test_hidden_main_still_reported_by_semantics() {
    // Semantic analysis trusts the markup; visibility only matters to the
    // density and visual passes.
    let html = r#"<main style="display:none"><p>hidden but still marked up as main</p></main>"#;
    let dom = parse_html(html);
    let result = DomAnalyzer::new().analyze_content(&dom);
    let main = result.main_content.expect("should find main content");
    assert_eq!(dom.tag_name(main), Some("main"));
}

#[test]
fn test_heuristic_fallback_selector_hit() {
    // No semantic markup, chrome class names keep density from biting, but
    // a well-known selector still matches.
    let html = format!(
        r#"<html><body><table><tr><td class="post-content">{}</td></tr></table></body></html>"#,
        "plain words without any block structure at all ".repeat(10)
    );
    let dom = parse_html(&html);
    let result = DomAnalyzer::new().analyze_content(&dom);

    assert_eq!(result.method, Method::HeuristicFallback);
    let el = result.main_content.expect("selector hit");
    assert!(dom
        .element_classes(el)
        .contains(&"post-content".to_string()));
    assert_eq!(result.confidence, 0.4);
}
