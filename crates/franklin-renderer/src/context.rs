//! Per-conversion traversal state.
//!
//! A [`RenderContext`] is created for one conversion and threaded by `&mut`
//! through every rule and fallback call. It replaces engine-owned mutable
//! state, so one [`Engine`] can serve concurrent conversions.

use crate::engine::Engine;
use crate::error::RenderError;
use crate::fallback::FallbackOptions;
use crate::node::{Document, Node, NodeKind};
use crate::text::escape_html;

/// Traversal context for a single conversion.
///
/// Carries the document being rendered, the pass-through fallback options,
/// the number of currently open section containers and collected warnings.
pub struct RenderContext<'a> {
    engine: &'a Engine,
    document: &'a Document,
    options: &'a FallbackOptions,
    section_depth: usize,
    warnings: Vec<String>,
}

impl<'a> RenderContext<'a> {
    /// Create a context at section depth zero.
    #[must_use]
    pub fn new(engine: &'a Engine, document: &'a Document, options: &'a FallbackOptions) -> Self {
        Self {
            engine,
            document,
            options,
            section_depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Document being converted (attribute lookup).
    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Options forwarded verbatim to the fallback renderer.
    #[must_use]
    pub fn options(&self) -> &'a FallbackOptions {
        self.options
    }

    /// Render a node through the engine using its own kind.
    pub fn render(&mut self, node: &Node) -> Result<String, RenderError> {
        let engine = self.engine;
        engine.render(node, None, self)
    }

    /// Render a node through the engine as if it were of `kind`.
    pub fn render_as(&mut self, node: &Node, kind: NodeKind) -> Result<String, RenderError> {
        let engine = self.engine;
        engine.render(node, Some(kind), self)
    }

    /// Render block children in document order and concatenate them.
    pub fn render_blocks(&mut self, node: &Node) -> Result<String, RenderError> {
        self.render_all(node.children())
    }

    /// Render inline children in order and concatenate them.
    pub fn render_inlines(&mut self, node: &Node) -> Result<String, RenderError> {
        self.render_all(node.inlines())
    }

    /// Render the inline run of a node: its inline children, or the escaped
    /// literal text when it has none.
    pub fn text(&mut self, node: &Node) -> Result<String, RenderError> {
        if node.inlines().is_empty() {
            Ok(escape_html(node.text().unwrap_or_default()).into_owned())
        } else {
            self.render_inlines(node)
        }
    }

    /// Rendered inner content: block children when present, otherwise the
    /// inline run (see [`text`](Self::text)).
    pub fn content(&mut self, node: &Node) -> Result<String, RenderError> {
        if node.children().is_empty() {
            self.text(node)
        } else {
            self.render_blocks(node)
        }
    }

    fn render_all(&mut self, nodes: &[Node]) -> Result<String, RenderError> {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.render(node)?);
        }
        Ok(out)
    }

    /// Number of section containers currently open above the caller.
    #[must_use]
    pub fn section_depth(&self) -> usize {
        self.section_depth
    }

    /// Mark a section container as open. Must be paired with
    /// [`leave_section`](Self::leave_section) in the same rule invocation.
    pub fn enter_section(&mut self) {
        self.section_depth += 1;
    }

    /// Mark the innermost section container as left.
    pub fn leave_section(&mut self) {
        debug_assert!(self.section_depth > 0, "section depth underflow");
        self.section_depth = self.section_depth.saturating_sub(1);
    }

    /// Record a non-fatal diagnostic.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Render warning");
        self.warnings.push(message);
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the context and return its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}
