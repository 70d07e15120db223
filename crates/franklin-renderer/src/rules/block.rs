//! Block rules: paragraph, thematic break, passthrough and admonition.

use std::fmt::Write;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::rule::NodeRule;
use crate::text::escape_html;

/// `<p>{content}</p>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphRule;

impl NodeRule for ParagraphRule {
    fn kind(&self) -> NodeKind {
        NodeKind::Paragraph
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        Ok(format!("<p>{}</p>", ctx.content(node)?))
    }
}

/// Fixed `<hr>`; node content is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThematicBreakRule;

impl NodeRule for ThematicBreakRule {
    fn kind(&self) -> NodeKind {
        NodeKind::ThematicBreak
    }

    fn render(&self, _node: &Node, _ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        Ok("<hr>".to_owned())
    }
}

/// Returns the rendered inner content unchanged.
///
/// Registered for the whole-document kinds so the page shell, not the
/// renderer, provides the outer structure.
#[derive(Debug, Clone, Copy)]
pub struct PassthroughRule {
    kind: NodeKind,
}

impl PassthroughRule {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self { kind }
    }
}

impl NodeRule for PassthroughRule {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        ctx.content(node)
    }
}

/// Styled container: the lower-cased style becomes a class, a non-blank
/// title becomes an `<h6>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmonitionRule;

impl NodeRule for AdmonitionRule {
    fn kind(&self) -> NodeKind {
        NodeKind::Admonition
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let style = node.style().unwrap_or_default().to_lowercase();
        let title = node.title().map(str::trim).filter(|t| !t.is_empty());
        let content = ctx.content(node)?;

        let mut out = String::with_capacity(content.len() + 64);
        write!(
            out,
            r#"<div class="admonition {}"><div>"#,
            escape_html(&style)
        )
        .unwrap();
        if let Some(title) = title {
            write!(out, "<h6>{}</h6>", escape_html(title)).unwrap();
        }
        out.push_str(&content);
        out.push_str("</div></div>");
        Ok(out)
    }
}
