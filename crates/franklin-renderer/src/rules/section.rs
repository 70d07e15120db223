//! Nesting-aware section rule.
//!
//! Each section first closes every section container still open above it,
//! then opens its own. This flattens nested sections into a run of sibling
//! `<div>`s. Only a section entered at depth zero closes its own container;
//! inside a nested run the last container is left open for the enclosing
//! top-level section's `</div>` to absorb.

use std::fmt::Write;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::rule::NodeRule;
use crate::text::escape_html;

const SECTION_CLOSE: &str = "</div>";

/// Section rule driven by the context's section depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionRule;

impl NodeRule for SectionRule {
    fn kind(&self) -> NodeKind {
        NodeKind::Section
    }

    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let rank = heading_rank(node.level());
        let depth = ctx.section_depth();
        let closer = SECTION_CLOSE.repeat(depth);
        tracing::debug!(
            level = node.level(),
            depth,
            title = node.title().unwrap_or_default(),
            "Rendering section"
        );

        ctx.enter_section();
        let body = ctx.render_blocks(node);
        ctx.leave_section();
        let body = body?;

        let title = escape_html(node.title().unwrap_or_default());
        let mut out = String::with_capacity(closer.len() + title.len() + body.len() + 32);
        out.push_str(&closer);
        write!(out, "<div><h{rank}>{title}</h{rank}>{body}").unwrap();
        if closer.is_empty() {
            out.push_str(SECTION_CLOSE);
        }
        Ok(out)
    }
}

/// Heading rank for a section level: level 1 is `h2`, capped at `h6`.
fn heading_rank(level: u8) -> u8 {
    level.saturating_add(1).min(6)
}
