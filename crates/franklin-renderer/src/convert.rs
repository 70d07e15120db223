//! Top-level conversion entry points.

use std::collections::BTreeMap;

use crate::engine::{Engine, RenderResult};
use crate::error::RenderError;
use crate::fallback::FallbackOptions;
use crate::markdown::parse_markdown;
use crate::node::Document;
use crate::page::PageShell;

/// Backend with the custom rule catalogue.
pub const FRANKLIN_BACKEND: &str = "franklin";
/// Backend with the plain HTML5 renderer only.
pub const HTML5_BACKEND: &str = "html5";

/// Conversion options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Backend name: `franklin` or `html5`.
    pub backend: String,
    /// Render the root as a full document instead of embedded content.
    pub standalone: bool,
    /// Enable GFM extensions when parsing Markdown.
    pub gfm: bool,
    /// Suffix stripped from link targets by the `franklin` backend.
    pub document_suffix: String,
    /// Document attributes applied to parsed documents.
    pub attributes: BTreeMap<String, String>,
    /// Options forwarded to the fallback renderer.
    pub fallback: FallbackOptions,
    /// Page shell used by [`Converter::render_page`].
    pub page: PageShell,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            backend: FRANKLIN_BACKEND.to_owned(),
            standalone: false,
            gfm: true,
            document_suffix: ".html".to_owned(),
            attributes: BTreeMap::new(),
            fallback: FallbackOptions::new(),
            page: PageShell::default(),
        }
    }
}

/// Converter bound to one backend and one set of options.
///
/// # Example
///
/// ```
/// use franklin_renderer::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::default()).unwrap();
/// let result = converter.convert_markdown("See [the guide](guide.html).").unwrap();
/// assert_eq!(result.html, r#"<p>See <a href="guide">the guide</a>.</p>"#);
/// ```
pub struct Converter {
    engine: Engine,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter, resolving the backend name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownBackend`] for any backend other than
    /// `franklin` or `html5`.
    pub fn new(options: ConvertOptions) -> Result<Self, RenderError> {
        let engine = match options.backend.as_str() {
            FRANKLIN_BACKEND => Engine::franklin(options.document_suffix.as_str()),
            HTML5_BACKEND => Engine::html5(),
            other => return Err(RenderError::UnknownBackend(other.to_owned())),
        };
        tracing::debug!(
            backend = %options.backend,
            standalone = options.standalone,
            "Created converter"
        );
        Ok(Self { engine, options })
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Convert an already parsed document.
    ///
    /// # Errors
    ///
    /// Propagates the first rule or fallback error.
    pub fn convert(&self, document: &Document) -> Result<RenderResult, RenderError> {
        self.engine
            .convert(document, &self.options.fallback, self.options.standalone)
    }

    /// Parse Markdown, apply the configured attributes and convert.
    ///
    /// # Errors
    ///
    /// Propagates the first rule or fallback error.
    pub fn convert_markdown(&self, markdown: &str) -> Result<RenderResult, RenderError> {
        let mut document = parse_markdown(markdown, self.options.gfm);
        for (key, value) in &self.options.attributes {
            document.set_attribute(key.as_str(), value.as_str());
        }
        self.convert(&document)
    }

    /// Convert Markdown and wrap the result in the page shell.
    ///
    /// # Errors
    ///
    /// Propagates the first rule or fallback error.
    pub fn render_page(&self, markdown: &str) -> Result<String, RenderError> {
        let result = self.convert_markdown(markdown)?;
        Ok(self.options.page.wrap(&result.html))
    }
}
