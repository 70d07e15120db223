//! Document tree consumed by the renderer.
//!
//! A [`Document`] owns a root [`Node`] of kind [`NodeKind::Document`]. Nodes
//! are immutable once built; the builder methods consume and return `self`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of a node in the document tree.
///
/// The string form returned by [`name`](Self::name) is the stable type
/// identifier used in configuration and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Whole document rendered standalone.
    Document,
    /// Whole document rendered as an embeddable fragment.
    Embedded,
    /// Hierarchical section with a title and a level.
    Section,
    Paragraph,
    /// Styled note/tip/warning container.
    Admonition,
    /// Source code block.
    Listing,
    /// Preformatted text block.
    Literal,
    /// Block quote.
    Quote,
    /// Heading that does not open a section.
    FloatingTitle,
    ThematicBreak,
    PageBreak,
    /// Block image.
    Image,
    /// Unordered list.
    Ulist,
    /// Ordered list.
    Olist,
    ListItem,
    Table,
    TableRow,
    TableCell,
    /// Raw markup emitted verbatim.
    Pass,
    /// Plain text leaf.
    Text,
    /// Hyperlink.
    InlineAnchor,
    /// Inline span with an emphasis kind stored in the node style.
    InlineQuoted,
    InlineBreak,
    InlineImage,
}

impl NodeKind {
    /// All node kinds, in declaration order.
    pub const ALL: [Self; 24] = [
        Self::Document,
        Self::Embedded,
        Self::Section,
        Self::Paragraph,
        Self::Admonition,
        Self::Listing,
        Self::Literal,
        Self::Quote,
        Self::FloatingTitle,
        Self::ThematicBreak,
        Self::PageBreak,
        Self::Image,
        Self::Ulist,
        Self::Olist,
        Self::ListItem,
        Self::Table,
        Self::TableRow,
        Self::TableCell,
        Self::Pass,
        Self::Text,
        Self::InlineAnchor,
        Self::InlineQuoted,
        Self::InlineBreak,
        Self::InlineImage,
    ];

    /// Stable type identifier (e.g. `"section"`, `"inline_anchor"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Embedded => "embedded",
            Self::Section => "section",
            Self::Paragraph => "paragraph",
            Self::Admonition => "admonition",
            Self::Listing => "listing",
            Self::Literal => "literal",
            Self::Quote => "quote",
            Self::FloatingTitle => "floating_title",
            Self::ThematicBreak => "thematic_break",
            Self::PageBreak => "page_break",
            Self::Image => "image",
            Self::Ulist => "ulist",
            Self::Olist => "olist",
            Self::ListItem => "list_item",
            Self::Table => "table",
            Self::TableRow => "table_row",
            Self::TableCell => "table_cell",
            Self::Pass => "pass",
            Self::Text => "text",
            Self::InlineAnchor => "inline_anchor",
            Self::InlineQuoted => "inline_quoted",
            Self::InlineBreak => "inline_break",
            Self::InlineImage => "inline_image",
        }
    }

    /// Whether nodes of this kind are inline (part of a text run).
    #[must_use]
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::InlineAnchor
                | Self::InlineQuoted
                | Self::InlineBreak
                | Self::InlineImage
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown node type identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type: {0}")]
pub struct ParseNodeKindError(pub String);

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseNodeKindError(s.to_owned()))
    }
}

/// An element of the document tree.
///
/// Text-bearing nodes (paragraphs, links, quoted spans, tight list items) keep
/// their inline content in [`inlines`](Self::inlines); container nodes keep
/// nested blocks in [`children`](Self::children). Order is significant in both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    title: Option<String>,
    style: Option<String>,
    level: u8,
    text: Option<String>,
    target: Option<String>,
    inlines: Vec<Node>,
    children: Vec<Node>,
    attributes: BTreeMap<String, String>,
}

impl Node {
    /// Create an empty node of the given kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            title: None,
            style: None,
            level: 0,
            text: None,
            target: None,
            inlines: Vec::new(),
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Plain text leaf.
    #[must_use]
    pub fn text_leaf(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text).with_text(text)
    }

    /// Section at `level` with a title.
    #[must_use]
    pub fn section(level: u8, title: impl Into<String>) -> Self {
        Self::new(NodeKind::Section)
            .with_level(level)
            .with_title(title)
    }

    /// Paragraph holding a single text run.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph).with_text(text)
    }

    /// Hyperlink with a target and display text.
    #[must_use]
    pub fn link(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NodeKind::InlineAnchor)
            .with_target(target)
            .with_text(text)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append an inline child.
    #[must_use]
    pub fn with_inline(mut self, node: Node) -> Self {
        self.inlines.push(node);
        self
    }

    /// Append a block child.
    #[must_use]
    pub fn with_child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Append a block child in place.
    pub fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Append an inline child in place.
    pub fn push_inline(&mut self, node: Node) {
        self.inlines.push(node);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    /// Append text to the inline run, merging into a trailing text leaf.
    pub(crate) fn push_inline_text(&mut self, text: &str) {
        match self.inlines.last_mut() {
            Some(last) if last.kind == NodeKind::Text => last.push_text(text),
            _ => self.inlines.push(Node::text_leaf(text)),
        }
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    pub(crate) fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.insert(key.to_owned(), value.into());
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Nesting level, meaningful for sections and floating titles.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Literal text of a leaf (text, code, raw markup).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn inlines(&self) -> &[Node] {
        &self.inlines
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Plain text: the literal text if set, otherwise the concatenated plain
    /// text of inline descendants.
    #[must_use]
    pub fn plain_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        let mut out = String::new();
        collect_plain_text(&self.inlines, &mut out);
        out
    }
}

fn collect_plain_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node.kind {
            NodeKind::InlineBreak => out.push('\n'),
            _ => match &node.text {
                Some(text) => out.push_str(text),
                None => collect_plain_text(&node.inlines, out),
            },
        }
    }
}

/// Root context of a conversion: the tree plus document-wide attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Node,
    title: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::new(NodeKind::Document),
            title: None,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Append a top-level block.
    #[must_use]
    pub fn with_block(mut self, node: Node) -> Self {
        self.root.push_child(node);
        self
    }

    pub fn push_block(&mut self, node: Node) {
        self.root.push_child(node);
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Whether admonition icons are enabled via the `icons` attribute.
    #[must_use]
    pub fn icons_enabled(&self) -> bool {
        self.attribute("icons").is_some_and(|v| v != "false")
    }
}
