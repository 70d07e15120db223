//! Error types for rendering.

use crate::node::NodeKind;

/// Error that aborts a conversion.
///
/// A missing rule is not an error (the fallback renderer handles it), and an
/// unhandled inline style only produces a warning. Anything reported here
/// fails the whole document; no partial output is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A node that must reference something has no target.
    #[error("{kind} node has no target")]
    MissingTarget {
        /// Kind of the offending node.
        kind: NodeKind,
    },

    /// Backend selector does not name a known backend.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}
