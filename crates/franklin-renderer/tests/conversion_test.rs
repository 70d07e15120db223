//! End-to-end conversion tests.
//!
//! Exercise the public API only: hand-built trees through the engine,
//! Markdown through the converter, and fallback behaviour for kinds without
//! a custom rule.

use franklin_renderer::{
    ConvertOptions, Converter, Document, Engine, FallbackOptions, Html5Renderer, Node, NodeKind,
    RenderContext, RenderError, RuleRegistry, linkify,
};
use pretty_assertions::assert_eq;

fn embedded(doc: &Document) -> String {
    Engine::franklin(".html")
        .convert(doc, &FallbackOptions::new(), false)
        .unwrap()
        .html
}

fn single(node: Node) -> String {
    embedded(&Document::new().with_block(node))
}

// ============================================================================
// Reference outputs
// ============================================================================

#[test]
fn test_paragraph() {
    assert_eq!(single(Node::paragraph("hello")), "<p>hello</p>");
}

#[test]
fn test_link_drops_document_suffix() {
    assert_eq!(
        single(Node::link("page.html", "Page")),
        r#"<a href="page">Page</a>"#
    );
}

#[test]
fn test_thematic_break_ignores_content() {
    let node = Node::new(NodeKind::ThematicBreak)
        .with_text("ignored")
        .with_child(Node::paragraph("also ignored"));
    assert_eq!(single(node), "<hr>");
}

#[test]
fn test_unordered_list() {
    let list = Node::new(NodeKind::Ulist)
        .with_child(Node::new(NodeKind::ListItem).with_text("a"))
        .with_child(Node::new(NodeKind::ListItem).with_text("b"));
    assert_eq!(single(list), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn test_admonition_without_title() {
    let node = Node::new(NodeKind::Admonition)
        .with_style("Warning")
        .with_title("   ")
        .with_text("careful");
    let html = single(node);
    assert!(html.starts_with(r#"<div class="admonition warning">"#));
    assert!(html.contains("careful"));
    assert!(!html.contains("<h6>"));
}

// ============================================================================
// Fallback transparency
// ============================================================================

#[test]
fn test_unregistered_kinds_match_fallback() {
    let franklin = Engine::franklin(".html");
    let html5 = Engine::html5();
    let doc = Document::new().with_attribute("icons", "font");
    let options = FallbackOptions::new().with("sectids", "false");

    let nodes = [
        Node::new(NodeKind::Listing)
            .with_attribute("language", "sh")
            .with_text("ls -la"),
        Node::new(NodeKind::Literal).with_text("raw"),
        Node::new(NodeKind::Image)
            .with_target("a.png")
            .with_attribute("alt", "A"),
        Node::new(NodeKind::Pass).with_text("<aside></aside>"),
        Node::new(NodeKind::InlineBreak),
        Node::new(NodeKind::FloatingTitle)
            .with_level(1)
            .with_title("Side"),
        Node::text_leaf("x < y"),
    ];

    for node in &nodes {
        assert!(!franklin.registry().contains(node.kind()));
        let mut ctx = RenderContext::new(&franklin, &doc, &options);
        let via_rules = ctx.render(node).unwrap();
        let mut ctx = RenderContext::new(&html5, &doc, &options);
        let direct = ctx.render(node).unwrap();
        assert_eq!(via_rules, direct, "{} differs", node.kind());
    }
}

#[test]
fn test_removing_a_rule_restores_fallback_output() {
    let registry = RuleRegistry::franklin(".html");
    let mut without_paragraph = RuleRegistry::franklin(".html");
    assert!(without_paragraph.remove(NodeKind::Paragraph));
    assert_eq!(without_paragraph.len(), registry.len() - 1);

    let engine = Engine::with_registry(without_paragraph, Html5Renderer);
    let doc = Document::new().with_block(Node::paragraph("hi"));
    let html = engine
        .convert(&doc, &FallbackOptions::new(), false)
        .unwrap()
        .html;
    assert_eq!(html, r#"<div class="paragraph"><p>hi</p></div>"#);
}

// ============================================================================
// Section nesting
// ============================================================================

#[test]
fn test_sibling_sections_balance() {
    let doc = Document::new()
        .with_block(Node::section(1, "A").with_child(Node::paragraph("a")))
        .with_block(Node::section(1, "B").with_child(Node::paragraph("b")));
    assert_eq!(
        embedded(&doc),
        "<div><h2>A</h2><p>a</p></div><div><h2>B</h2><p>b</p></div>"
    );
}

#[test]
fn test_nested_siblings_leave_trailing_container_open() {
    let doc = Document::new().with_block(
        Node::section(1, "Top")
            .with_child(Node::section(2, "One"))
            .with_child(Node::section(2, "Two")),
    );
    let html = embedded(&doc);
    assert_eq!(
        html,
        "<div><h2>Top</h2></div><div><h3>One</h3></div><div><h3>Two</h3></div>"
    );
    // The top-level closer absorbs the open trailing sibling.
    assert_eq!(html.matches("<div>").count(), html.matches("</div>").count());
}

// ============================================================================
// Markdown pipeline
// ============================================================================

#[test]
fn test_markdown_page() {
    let converter = Converter::new(ConvertOptions::default()).unwrap();
    let md = "\
# Handbook

Intro with **bold** text.

## Links

- [Setup](setup.html)
- plain https://example.com/x

---

> [!TIP]
> Use the search.
";
    let result = converter.convert_markdown(md).unwrap();
    assert_eq!(result.title.as_deref(), Some("Handbook"));
    assert_eq!(
        result.html,
        "<p>Intro with <strong>bold</strong> text.</p>\
         <div><h2>Links</h2>\
         <ul><li><a href=\"setup\">Setup</a></li>\
         <li>plain <a href=\"https://example.com/x\">https://example.com/x</a></li></ul>\
         <hr>\
         <div class=\"admonition tip\"><div><p>Use the search.</p></div></div>\
         </div>"
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_markdown_unsupported_emphasis_warns() {
    let converter = Converter::new(ConvertOptions::default()).unwrap();
    let result = converter.convert_markdown("*soft* and ~~gone~~").unwrap();
    assert_eq!(result.html, "<p>soft and gone</p>");
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_missing_link_target_is_error() {
    let doc = Document::new().with_block(
        Node::new(NodeKind::Paragraph).with_inline(Node::new(NodeKind::InlineAnchor)),
    );
    let converter = Converter::new(ConvertOptions::default()).unwrap();
    let err = converter.convert(&doc).unwrap_err();
    assert_eq!(
        err,
        RenderError::MissingTarget {
            kind: NodeKind::InlineAnchor
        }
    );
}

// ============================================================================
// Linkify
// ============================================================================

#[test]
fn test_linkify_wraps_each_run_once() {
    let out = linkify("a http://x.io b https://y.io/p?q=1 c");
    assert_eq!(
        out,
        r#"a <a href="http://x.io">http://x.io</a> b <a href="https://y.io/p?q=1">https://y.io/p?q=1</a> c"#
    );
    assert_eq!(out.matches("<a ").count(), 2);
}

#[test]
fn test_markdown_loose_item_url_stays_inside_paragraph() {
    let converter = Converter::new(ConvertOptions::default()).unwrap();
    let result = converter
        .convert_markdown("- see https://a.io\n\n- other\n")
        .unwrap();
    assert_eq!(
        result.html,
        "<ul><li><p>see <a href=\"https://a.io\">https://a.io</a></p></li>\
         <li><p>other</p></li></ul>"
    );
}

#[test]
fn test_markdown_item_url_before_hard_break() {
    let converter = Converter::new(ConvertOptions::default()).unwrap();
    let result = converter
        .convert_markdown("- https://a.io  \n  next\n")
        .unwrap();
    assert_eq!(
        result.html,
        "<ul><li><a href=\"https://a.io\">https://a.io</a><br>\nnext</li></ul>"
    );
}

#[test]
fn test_linkify_without_urls_is_identity() {
    let text = "ftp://not-a-web-link and mailto:me";
    assert_eq!(linkify(text), text);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_engine_across_threads() {
    let engine = Engine::franklin(".html");
    let options = FallbackOptions::new();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &engine;
                let options = &options;
                scope.spawn(move || {
                    let mut section = Node::section(1, format!("S{i}"));
                    for j in 0..i {
                        section.push_child(Node::section(2, format!("S{i}.{j}")));
                    }
                    let doc = Document::new().with_block(section);
                    engine.convert(&doc, options, false).unwrap().html
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let html = handle.join().unwrap();
            assert!(html.starts_with(&format!("<div><h2>S{i}</h2>")));
            // One closer per nested section plus the top-level one.
            assert_eq!(html.matches("</div>").count(), i + 1);
        }
    });
}
