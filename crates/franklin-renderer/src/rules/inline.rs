//! Inline rules: links and quoted spans.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::rule::NodeRule;
use crate::text::escape_html;

/// Anchor whose href has the document suffix stripped, so authored links
/// point at logical pages rather than source file names.
#[derive(Debug, Clone)]
pub struct LinkRule {
    document_suffix: String,
}

impl LinkRule {
    #[must_use]
    pub fn new(document_suffix: impl Into<String>) -> Self {
        Self {
            document_suffix: document_suffix.into(),
        }
    }

    /// Strip the document suffix once, exact and case-sensitive.
    fn href<'a>(&self, target: &'a str) -> &'a str {
        if self.document_suffix.is_empty() {
            return target;
        }
        target
            .strip_suffix(self.document_suffix.as_str())
            .unwrap_or(target)
    }
}

impl NodeRule for LinkRule {
    fn kind(&self) -> NodeKind {
        NodeKind::InlineAnchor
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let target = node.target().ok_or(RenderError::MissingTarget {
            kind: NodeKind::InlineAnchor,
        })?;
        let href = self.href(target);
        let text = ctx.content(node)?;
        let text = if text.is_empty() {
            escape_html(target).into_owned()
        } else {
            text
        };
        Ok(format!(r#"<a href="{}">{text}</a>"#, escape_html(href)))
    }
}

/// Strong emphasis becomes `<strong>`; other emphasis kinds have no tag yet
/// and are emitted as bare text with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedRule;

impl NodeRule for QuotedRule {
    fn kind(&self) -> NodeKind {
        NodeKind::InlineQuoted
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let content = ctx.content(node)?;
        match node.style() {
            Some("strong") => Ok(format!("<strong>{content}</strong>")),
            style => {
                ctx.warn(format!(
                    "unhandled inline_quoted style '{}', emitted as text",
                    style.unwrap_or("none")
                ));
                Ok(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::Engine;
    use crate::fallback::FallbackOptions;
    use crate::node::Document;
    use crate::rules::test_support::{render, render_with};

    #[test]
    fn test_link_strips_suffix() {
        let node = Node::link("page.html", "Page");
        assert_eq!(render(&node).unwrap(), r#"<a href="page">Page</a>"#);
    }

    #[test]
    fn test_link_strips_suffix_once() {
        let node = Node::link("archive.html.html", "A");
        assert_eq!(render(&node).unwrap(), r#"<a href="archive.html">A</a>"#);
    }

    #[test]
    fn test_link_suffix_case_sensitive() {
        let node = Node::link("PAGE.HTML", "P");
        assert_eq!(render(&node).unwrap(), r#"<a href="PAGE.HTML">P</a>"#);
    }

    #[test]
    fn test_link_without_suffix_unchanged() {
        let node = Node::link("https://example.com/docs", "Docs");
        assert_eq!(
            render(&node).unwrap(),
            r#"<a href="https://example.com/docs">Docs</a>"#
        );
    }

    #[test]
    fn test_link_suffix_only_at_end() {
        let node = Node::link("page.html#intro", "Intro");
        assert_eq!(
            render(&node).unwrap(),
            r#"<a href="page.html#intro">Intro</a>"#
        );
    }

    #[test]
    fn test_link_custom_suffix() {
        let engine = Engine::franklin(".md");
        let node = Node::link("guide/setup.md", "Setup");
        assert_eq!(
            render_with(&engine, &Document::new(), &node).unwrap(),
            r#"<a href="guide/setup">Setup</a>"#
        );
    }

    #[test]
    fn test_link_empty_text_uses_target() {
        let node = Node::new(NodeKind::InlineAnchor).with_target("https://a.io");
        assert_eq!(
            render(&node).unwrap(),
            r#"<a href="https://a.io">https://a.io</a>"#
        );
    }

    #[test]
    fn test_link_inline_text() {
        let node = Node::new(NodeKind::InlineAnchor)
            .with_target("x.html")
            .with_inline(
                Node::new(NodeKind::InlineQuoted)
                    .with_style("strong")
                    .with_text("bold"),
            );
        assert_eq!(
            render(&node).unwrap(),
            r#"<a href="x"><strong>bold</strong></a>"#
        );
    }

    #[test]
    fn test_link_missing_target_is_fatal() {
        let node = Node::new(NodeKind::InlineAnchor).with_text("nowhere");
        assert_eq!(
            render(&node).unwrap_err(),
            RenderError::MissingTarget {
                kind: NodeKind::InlineAnchor
            }
        );
    }

    #[test]
    fn test_quoted_strong() {
        let node = Node::new(NodeKind::InlineQuoted)
            .with_style("strong")
            .with_text("bold");
        assert_eq!(render(&node).unwrap(), "<strong>bold</strong>");
    }

    #[test]
    fn test_quoted_other_style_is_bare_text_with_warning() {
        let engine = Engine::franklin(".html");
        let doc = Document::new();
        let options = FallbackOptions::new();
        let mut ctx = RenderContext::new(&engine, &doc, &options);

        let node = Node::new(NodeKind::InlineQuoted)
            .with_style("emphasis")
            .with_text("soft");
        assert_eq!(ctx.render(&node).unwrap(), "soft");
        assert_eq!(ctx.warnings().len(), 1);
        assert!(ctx.warnings()[0].contains("emphasis"));
    }
}
