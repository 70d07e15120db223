//! Fallback renderer used for node kinds without a custom rule.

use std::collections::BTreeMap;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::node::{Node, NodeKind};

/// Baseline renderer invoked by the [`Engine`](crate::Engine) when the
/// registry has no rule for a node kind.
///
/// Implementations must handle every [`NodeKind`]. Child content should be
/// rendered through the context so custom rules still apply to descendants.
pub trait FallbackRenderer: Send + Sync {
    /// Render `node`. `transform` is the explicit kind requested by the
    /// caller, if any; otherwise the node's own kind applies.
    fn render(
        &self,
        node: &Node,
        transform: Option<NodeKind>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, RenderError>;
}

/// Options passed verbatim to the fallback renderer.
///
/// The engine never interprets these; only the fallback does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FallbackOptions {
    entries: BTreeMap<String, String>,
}

impl FallbackOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is set to anything other than `"false"`.
    ///
    /// Missing keys yield `default`.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, |v| v != "false")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FallbackOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
