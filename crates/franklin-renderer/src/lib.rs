//! Rule-based document tree renderer.
//!
//! Converts a parsed document tree into HTML. A small catalogue of custom
//! rules ([`rules`]) covers the node kinds that need site-specific markup;
//! every other kind is delegated, unchanged, to a [`FallbackRenderer`]
//! (by default the [`Html5Renderer`]).
//!
//! # Architecture
//!
//! - [`Node`] / [`Document`]: the tree, built by hand or by
//!   [`parse_markdown`].
//! - [`RuleRegistry`]: one [`NodeRule`] per [`NodeKind`].
//! - [`Engine`]: dispatches each node to its rule or to the fallback.
//! - [`RenderContext`]: per-conversion state (section depth, warnings),
//!   threaded through every call so one engine can serve many threads.
//! - [`Converter`]: backend selection, Markdown input and the [`PageShell`].
//!
//! # Example
//!
//! ```
//! use franklin_renderer::{ConvertOptions, Converter};
//!
//! let converter = Converter::new(ConvertOptions::default()).unwrap();
//! let result = converter
//!     .convert_markdown("## Intro\n\n- see https://example.com\n")
//!     .unwrap();
//! assert_eq!(
//!     result.html,
//!     r#"<div><h2>Intro</h2><ul><li>see <a href="https://example.com">https://example.com</a></li></ul></div>"#
//! );
//! ```

mod context;
mod convert;
mod engine;
mod error;
mod fallback;
mod html5;
mod markdown;
mod node;
mod page;
mod rule;
pub mod rules;
mod text;

pub use context::RenderContext;
pub use convert::{ConvertOptions, Converter, FRANKLIN_BACKEND, HTML5_BACKEND};
pub use engine::{Engine, RenderResult};
pub use error::RenderError;
pub use fallback::{FallbackOptions, FallbackRenderer};
pub use html5::Html5Renderer;
pub use markdown::{parse_markdown, parser_options};
pub use node::{Document, Node, NodeKind, ParseNodeKindError};
pub use page::PageShell;
pub use rule::{NodeRule, RuleRegistry};
pub use text::{escape_html, linkify};
