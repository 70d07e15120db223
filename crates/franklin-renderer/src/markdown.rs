//! Markdown front end.
//!
//! Folds `pulldown-cmark` events into a [`Document`] tree so Markdown input
//! can go through the same rule engine as any other document.

use pulldown_cmark::{
    Alignment, BlockQuoteKind, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::node::{Document, Node, NodeKind};

/// Parser options: GFM extensions when `gfm` is set, plain `CommonMark`
/// otherwise.
#[must_use]
pub fn parser_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

/// Parse Markdown into a document tree.
///
/// The first level-one heading that precedes any other content becomes the
/// document title. Other top-level headings open sections; headings nested
/// in block quotes or lists become floating titles.
///
/// # Example
///
/// ```
/// use franklin_renderer::{NodeKind, parse_markdown};
///
/// let doc = parse_markdown("# Guide\n\n## Setup\n\nRun it.\n", true);
/// assert_eq!(doc.title(), Some("Guide"));
/// let section = &doc.root().children()[0];
/// assert_eq!(section.kind(), NodeKind::Section);
/// assert_eq!(section.level(), 1);
/// ```
#[must_use]
pub fn parse_markdown(markdown: &str, gfm: bool) -> Document {
    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(markdown, parser_options(gfm)) {
        builder.event(event);
    }
    builder.finish()
}

/// Event-to-tree state machine.
#[derive(Default)]
struct TreeBuilder {
    document: Document,
    /// Open sections, outermost first.
    sections: Vec<Node>,
    /// Open containers below the innermost section.
    stack: Vec<Node>,
    /// Set once anything other than the title has been emitted.
    seen_content: bool,
    table: TableState,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    cell: usize,
    in_head: bool,
}

impl TableState {
    fn halign(&self) -> Option<&'static str> {
        match self.alignments.get(self.cell)? {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

impl TreeBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline(
                Node::new(NodeKind::InlineQuoted)
                    .with_style("monospaced")
                    .with_text(&*code),
            ),
            Event::Html(html) => self.text(&html),
            Event::InlineHtml(html) => {
                self.inline(Node::new(NodeKind::Pass).with_text(&*html));
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.inline(Node::new(NodeKind::InlineBreak)),
            Event::Rule => self.attach(Node::new(NodeKind::ThematicBreak)),
            Event::TaskListMarker(checked) => self.task_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let node = match tag {
            Tag::Paragraph => Node::new(NodeKind::Paragraph),
            Tag::Heading { level, .. } => {
                Node::new(NodeKind::FloatingTitle).with_level(heading_level(level))
            }
            Tag::BlockQuote(Some(kind)) => {
                Node::new(NodeKind::Admonition).with_style(admonition_style(kind))
            }
            Tag::BlockQuote(None) => Node::new(NodeKind::Quote),
            Tag::CodeBlock(kind) => {
                let mut node = Node::new(NodeKind::Listing);
                if let CodeBlockKind::Fenced(info) = kind {
                    let lang = info.split_whitespace().next().unwrap_or_default();
                    if !lang.is_empty() {
                        node.set_attribute("language", lang);
                    }
                }
                node
            }
            Tag::HtmlBlock => Node::new(NodeKind::Pass),
            Tag::List(Some(start)) => {
                let mut node = Node::new(NodeKind::Olist);
                if start != 1 {
                    node.set_attribute("start", start.to_string());
                }
                node
            }
            Tag::List(None) => Node::new(NodeKind::Ulist),
            Tag::Item => Node::new(NodeKind::ListItem),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                Node::new(NodeKind::Table)
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                Node::new(NodeKind::TableRow).with_style("header")
            }
            Tag::TableRow => {
                self.table.cell = 0;
                Node::new(NodeKind::TableRow)
            }
            Tag::TableCell => {
                let mut node = Node::new(NodeKind::TableCell);
                if self.table.in_head {
                    node = node.with_style("header");
                }
                if let Some(align) = self.table.halign() {
                    node.set_attribute("halign", align);
                }
                node
            }
            Tag::Emphasis => quoted("emphasis"),
            Tag::Strong => quoted("strong"),
            Tag::Strikethrough => quoted("line-through"),
            Tag::Superscript => quoted("superscript"),
            Tag::Subscript => quoted("subscript"),
            Tag::Link { dest_url, .. } => {
                Node::new(NodeKind::InlineAnchor).with_target(&*dest_url)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut node = Node::new(NodeKind::InlineImage).with_target(&*dest_url);
                if !title.is_empty() {
                    node.set_title(title.into_string());
                }
                node
            }
            Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => return,
        };
        self.stack.push(node);
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::FootnoteDefinition
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => return,
            TagEnd::TableHead => self.table.in_head = false,
            TagEnd::TableCell => self.table.cell += 1,
            _ => {}
        }

        let Some(node) = self.stack.pop() else {
            return;
        };
        match tag {
            TagEnd::Heading(_) => self.heading(&node),
            TagEnd::Image => {
                let mut image = Node::new(NodeKind::InlineImage)
                    .with_target(node.target().unwrap_or_default())
                    .with_attribute("alt", node.plain_text());
                if let Some(title) = node.title() {
                    image.set_title(title.to_owned());
                }
                self.inline(image);
            }
            _ if node.kind().is_inline() => self.inline(node),
            _ => self.attach(node),
        }
    }

    fn text(&mut self, text: &str) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        match top.kind() {
            NodeKind::Listing | NodeKind::Pass => top.push_text(text),
            _ => top.push_inline_text(text),
        }
    }

    fn inline(&mut self, node: Node) {
        if let Some(top) = self.stack.last_mut() {
            top.push_inline(node);
        }
    }

    fn task_marker(&mut self, checked: bool) {
        // Loose items carry the marker inside their first paragraph.
        if let Some(item) = self
            .stack
            .iter_mut()
            .rev()
            .find(|n| n.kind() == NodeKind::ListItem)
        {
            item.set_attribute("checked", checked.to_string());
        }
    }

    /// Attach a finished block to the innermost open container.
    fn attach(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_child(node);
        } else {
            self.seen_content = true;
            self.attach_to_section(node);
        }
    }

    fn attach_to_section(&mut self, node: Node) {
        match self.sections.last_mut() {
            Some(section) => section.push_child(node),
            None => self.document.push_block(node),
        }
    }

    fn heading(&mut self, heading: &Node) {
        let title = heading.plain_text().trim().to_owned();
        let level = heading.level();

        if !self.stack.is_empty() {
            let node = Node::new(NodeKind::FloatingTitle)
                .with_level(level)
                .with_title(title);
            self.attach(node);
            return;
        }

        if level == 0 && !self.seen_content && self.document.title().is_none() {
            self.document.set_title(title);
            return;
        }

        self.seen_content = true;
        while self
            .sections
            .last()
            .is_some_and(|open| open.level() >= level)
        {
            self.close_section();
        }
        self.sections.push(Node::section(level, title));
    }

    fn close_section(&mut self) {
        if let Some(section) = self.sections.pop() {
            self.attach_to_section(section);
        }
    }

    fn finish(mut self) -> Document {
        while let Some(node) = self.stack.pop() {
            self.attach(node);
        }
        while !self.sections.is_empty() {
            self.close_section();
        }
        self.document
    }
}

fn quoted(style: &str) -> Node {
    Node::new(NodeKind::InlineQuoted).with_style(style)
}

/// Section level for a heading: `#` is level 0, `##` level 1.
fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 0,
        HeadingLevel::H2 => 1,
        HeadingLevel::H3 => 2,
        HeadingLevel::H4 => 3,
        HeadingLevel::H5 => 4,
        HeadingLevel::H6 => 5,
    }
}

fn admonition_style(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "NOTE",
        BlockQuoteKind::Tip => "TIP",
        BlockQuoteKind::Important => "IMPORTANT",
        BlockQuoteKind::Warning => "WARNING",
        BlockQuoteKind::Caution => "CAUTION",
    }
}
