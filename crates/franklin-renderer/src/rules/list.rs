//! List rules.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::rule::NodeRule;
use crate::text::{escape_html, linkify};

/// `<ul>`/`<ol>` around the rendered items; nothing at all when the items
/// render empty.
#[derive(Debug, Clone, Copy)]
pub struct ListRule {
    kind: NodeKind,
    tag: &'static str,
}

impl ListRule {
    #[must_use]
    pub fn unordered() -> Self {
        Self {
            kind: NodeKind::Ulist,
            tag: "ul",
        }
    }

    #[must_use]
    pub fn ordered() -> Self {
        Self {
            kind: NodeKind::Olist,
            tag: "ol",
        }
    }
}

impl NodeRule for ListRule {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let items = ctx.render_blocks(node)?;
        tracing::debug!(
            kind = %self.kind,
            items = node.children().len(),
            empty = items.is_empty(),
            "Rendered list"
        );
        if items.is_empty() {
            return Ok(String::new());
        }
        let tag = self.tag;
        Ok(format!("<{tag}>{items}</{tag}>"))
    }
}

/// List item with bare URLs linkified.
///
/// Rendered content wins over plain text. Content that already starts with a
/// list wrapper (a nested list) is emitted without an `<li>` of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListItemRule;

impl NodeRule for ListItemRule {
    fn kind(&self) -> NodeKind {
        NodeKind::ListItem
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let content = ctx.content(node)?;
        let content = linkify(&content);
        if !content.is_empty() {
            if content.starts_with("<ul>") || content.starts_with("<ol>") {
                return Ok(content.into_owned());
            }
            return Ok(format!("<li>{content}</li>"));
        }

        let text = node.plain_text();
        if text.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("<li>{}</li>", linkify(&escape_html(&text))))
    }
}
