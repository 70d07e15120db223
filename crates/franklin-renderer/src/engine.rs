//! Dispatching engine: custom rule or fallback.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::fallback::{FallbackOptions, FallbackRenderer};
use crate::html5::Html5Renderer;
use crate::node::{Document, Node, NodeKind};
use crate::rule::{NodeRule, RuleRegistry};

/// Result of converting a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered markup.
    pub html: String,
    /// Document title, if the document has one.
    pub title: Option<String>,
    /// Non-fatal diagnostics (e.g. unhandled inline styles).
    pub warnings: Vec<String>,
}

/// Rendering engine.
///
/// Holds the rule registry and the fallback renderer. The engine is
/// immutable during conversion: all traversal state lives in a
/// [`RenderContext`], so a single engine can be shared across threads.
///
/// # Example
///
/// ```
/// use franklin_renderer::{Document, Engine, FallbackOptions, Node};
///
/// let engine = Engine::franklin(".html");
/// let doc = Document::new()
///     .with_block(Node::paragraph("hello"))
///     .with_block(Node::link("page.html", "Page"));
/// let result = engine.convert(&doc, &FallbackOptions::new(), false).unwrap();
/// assert_eq!(result.html, r#"<p>hello</p><a href="page">Page</a>"#);
/// ```
pub struct Engine {
    registry: RuleRegistry,
    fallback: Box<dyn FallbackRenderer>,
}

impl Engine {
    /// Engine with an empty registry: every node goes to `fallback`.
    #[must_use]
    pub fn new<F: FallbackRenderer + 'static>(fallback: F) -> Self {
        Self::with_registry(RuleRegistry::new(), fallback)
    }

    #[must_use]
    pub fn with_registry<F: FallbackRenderer + 'static>(
        registry: RuleRegistry,
        fallback: F,
    ) -> Self {
        Self {
            registry,
            fallback: Box::new(fallback),
        }
    }

    /// Built-in rule catalogue over the HTML5 fallback.
    #[must_use]
    pub fn franklin(document_suffix: impl Into<String>) -> Self {
        Self::with_registry(RuleRegistry::franklin(document_suffix), Html5Renderer)
    }

    /// Plain HTML5 output with no custom rules.
    #[must_use]
    pub fn html5() -> Self {
        Self::new(Html5Renderer)
    }

    /// Register an additional rule, replacing any rule for the same kind.
    #[must_use]
    pub fn with_rule<R: NodeRule + 'static>(mut self, rule: R) -> Self {
        self.registry.register(rule);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Render one node.
    ///
    /// The kind is `explicit` when given, otherwise the node's own. A
    /// registered rule handles it; otherwise the fallback receives the node,
    /// the explicit kind and the context (with its options) unchanged, and
    /// its output is returned as is.
    pub fn render(
        &self,
        node: &Node,
        explicit: Option<NodeKind>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, RenderError> {
        let kind = explicit.unwrap_or(node.kind());
        tracing::trace!(%kind, transform = ?explicit, "Converting node");

        if let Some(rule) = self.registry.get(kind) {
            return rule.render(node, ctx);
        }

        tracing::debug!(%kind, "No rule registered, using fallback");
        self.fallback.render(node, explicit, ctx)
    }

    /// Convert a whole document.
    ///
    /// The root is rendered as [`NodeKind::Document`] when `standalone`,
    /// otherwise as [`NodeKind::Embedded`]. Any rule error fails the whole
    /// conversion.
    pub fn convert(
        &self,
        document: &Document,
        options: &FallbackOptions,
        standalone: bool,
    ) -> Result<RenderResult, RenderError> {
        let root_kind = if standalone {
            NodeKind::Document
        } else {
            NodeKind::Embedded
        };

        let mut ctx = RenderContext::new(self, document, options);
        let html = ctx.render_as(document.root(), root_kind)?;
        debug_assert_eq!(ctx.section_depth(), 0, "unbalanced section depth");

        Ok(RenderResult {
            html,
            title: document.title().map(ToOwned::to_owned),
            warnings: ctx.into_warnings(),
        })
    }
}
