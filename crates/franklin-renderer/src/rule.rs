//! Per-kind rendering rules and their registry.

use std::collections::BTreeMap;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::rules::{
    AdmonitionRule, LinkRule, ListItemRule, ListRule, ParagraphRule, PassthroughRule,
    QuotedRule, SectionRule, ThematicBreakRule,
};

/// Custom rendering rule for one node kind.
///
/// Rules that need child content render it through the context, which
/// dispatches back into the engine.
///
/// # Example
///
/// ```
/// use franklin_renderer::{
///     Document, Engine, FallbackOptions, Node, NodeKind, NodeRule, RenderContext, RenderError,
/// };
///
/// struct KbdRule;
///
/// impl NodeRule for KbdRule {
///     fn kind(&self) -> NodeKind { NodeKind::Literal }
///
///     fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
///         Ok(format!("<kbd>{}</kbd>", ctx.text(node)?))
///     }
/// }
///
/// let engine = Engine::franklin(".html").with_rule(KbdRule);
/// let doc = Document::new().with_block(Node::new(NodeKind::Literal).with_text("Ctrl+C"));
/// let result = engine.convert(&doc, &FallbackOptions::new(), false).unwrap();
/// assert_eq!(result.html, "<kbd>Ctrl+C</kbd>");
/// ```
pub trait NodeRule: Send + Sync {
    /// Kind this rule is registered under.
    fn kind(&self) -> NodeKind;

    /// Render `node` to a markup fragment.
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError>;
}

/// Mapping from node kind to custom rule.
///
/// Absence of a rule is normal and sends the node to the fallback renderer.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<NodeKind, Box<dyn NodeRule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in rule catalogue.
    ///
    /// Links whose target ends with `document_suffix` have it stripped.
    #[must_use]
    pub fn franklin(document_suffix: impl Into<String>) -> Self {
        Self::new()
            .with(PassthroughRule::new(NodeKind::Document))
            .with(PassthroughRule::new(NodeKind::Embedded))
            .with(SectionRule)
            .with(ParagraphRule)
            .with(ThematicBreakRule)
            .with(AdmonitionRule)
            .with(QuotedRule)
            .with(ListRule::unordered())
            .with(ListRule::ordered())
            .with(ListItemRule)
            .with(LinkRule::new(document_suffix))
    }

    /// Register a rule, replacing any rule previously registered for its kind.
    pub fn register<R: NodeRule + 'static>(&mut self, rule: R) {
        self.rules.insert(rule.kind(), Box::new(rule));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<R: NodeRule + 'static>(mut self, rule: R) -> Self {
        self.register(rule);
        self
    }

    /// Remove the rule for `kind`, returning whether one was registered.
    pub fn remove(&mut self, kind: NodeKind) -> bool {
        self.rules.remove(&kind).is_some()
    }

    #[must_use]
    pub fn get(&self, kind: NodeKind) -> Option<&dyn NodeRule> {
        self.rules.get(&kind).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.rules.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.rules.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
