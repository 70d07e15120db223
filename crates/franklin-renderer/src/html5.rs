//! Default HTML5 renderer.
//!
//! Produces conventional block markup (`div.paragraph`, `div.sect1`,
//! `div.listingblock`, ...) for every node kind. Used directly by the `html5`
//! backend and as the fallback behind the built-in rules.

use std::fmt::Write;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::fallback::FallbackRenderer;
use crate::node::{Node, NodeKind};
use crate::text::{escape_html, section_id};

/// HTML5 fallback renderer.
///
/// Honors the `sectids` option (`"false"` disables generated heading ids)
/// and the document's `icons` attribute for admonitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5Renderer;

impl FallbackRenderer for Html5Renderer {
    #[allow(clippy::too_many_lines)]
    fn render(
        &self,
        node: &Node,
        transform: Option<NodeKind>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, RenderError> {
        let kind = transform.unwrap_or(node.kind());
        let mut out = String::new();

        match kind {
            NodeKind::Document => {
                let content = ctx.content(node)?;
                if let Some(title) = ctx.document().title() {
                    write!(
                        out,
                        r#"<div id="header"><h1>{}</h1></div>"#,
                        escape_html(title)
                    )
                    .unwrap();
                }
                write!(out, r#"<div id="content">{content}</div>"#).unwrap();
            }
            NodeKind::Embedded => out = ctx.content(node)?,
            NodeKind::Section => section(node, ctx, &mut out)?,
            NodeKind::Paragraph => {
                out.push_str(r#"<div class="paragraph">"#);
                block_title(node, &mut out);
                write!(out, "<p>{}</p></div>", ctx.content(node)?).unwrap();
            }
            NodeKind::Admonition => admonition(node, ctx, &mut out)?,
            NodeKind::Listing => {
                let source = escape_html(node.text().unwrap_or_default());
                out.push_str(r#"<div class="listingblock">"#);
                block_title(node, &mut out);
                match node.attribute("language") {
                    Some(lang) => {
                        let lang = escape_html(lang);
                        write!(
                            out,
                            r#"<div class="content"><pre class="highlight"><code class="language-{lang}" data-lang="{lang}">{source}</code></pre></div>"#
                        )
                        .unwrap();
                    }
                    None => {
                        write!(out, r#"<div class="content"><pre>{source}</pre></div>"#).unwrap();
                    }
                }
                out.push_str("</div>");
            }
            NodeKind::Literal => {
                out.push_str(r#"<div class="literalblock">"#);
                block_title(node, &mut out);
                write!(
                    out,
                    r#"<div class="content"><pre>{}</pre></div></div>"#,
                    escape_html(node.text().unwrap_or_default())
                )
                .unwrap();
            }
            NodeKind::Quote => {
                out.push_str(r#"<div class="quoteblock">"#);
                block_title(node, &mut out);
                write!(out, "<blockquote>{}</blockquote></div>", ctx.content(node)?).unwrap();
            }
            NodeKind::FloatingTitle => {
                let rank = node.level().saturating_add(1).clamp(1, 6);
                let title = node.title().unwrap_or_default();
                write!(out, "<h{rank}").unwrap();
                if ctx.options().flag("sectids", true) {
                    write!(out, r#" id="{}""#, section_id(title)).unwrap();
                }
                write!(out, r#" class="discrete">{}</h{rank}>"#, escape_html(title)).unwrap();
            }
            NodeKind::ThematicBreak => out.push_str("<hr>"),
            NodeKind::PageBreak => {
                out.push_str(r#"<div style="page-break-after: always;"></div>"#);
            }
            NodeKind::Image => {
                out.push_str(r#"<div class="imageblock"><div class="content">"#);
                image_tag(node, kind, &mut out)?;
                out.push_str("</div>");
                if let Some(title) = node.title() {
                    write!(out, r#"<div class="title">{}</div>"#, escape_html(title)).unwrap();
                }
                out.push_str("</div>");
            }
            NodeKind::Ulist => {
                let checklist = node
                    .children()
                    .iter()
                    .any(|item| item.attribute("checked").is_some());
                let class = if checklist { "ulist checklist" } else { "ulist" };
                write!(out, r#"<div class="{class}">"#).unwrap();
                block_title(node, &mut out);
                write!(out, "<ul>{}</ul></div>", ctx.render_blocks(node)?).unwrap();
            }
            NodeKind::Olist => {
                out.push_str(r#"<div class="olist arabic">"#);
                block_title(node, &mut out);
                out.push_str(r#"<ol class="arabic""#);
                if let Some(start) = node.attribute("start") {
                    write!(out, r#" start="{}""#, escape_html(start)).unwrap();
                }
                write!(out, ">{}</ol></div>", ctx.render_blocks(node)?).unwrap();
            }
            NodeKind::ListItem => {
                out.push_str("<li>");
                let text = ctx.text(node)?;
                if !text.is_empty() || node.attribute("checked").is_some() {
                    out.push_str("<p>");
                    match node.attribute("checked") {
                        Some("true") => out.push_str("&#10003; "),
                        Some(_) => out.push_str("&#10063; "),
                        None => {}
                    }
                    write!(out, "{text}</p>").unwrap();
                }
                out.push_str(&ctx.render_blocks(node)?);
                out.push_str("</li>");
            }
            NodeKind::Table => table(node, ctx, &mut out)?,
            NodeKind::TableRow => {
                write!(out, "<tr>{}</tr>", ctx.render_blocks(node)?).unwrap();
            }
            NodeKind::TableCell => {
                let tag = if node.style() == Some("header") {
                    "th"
                } else {
                    "td"
                };
                let align = node.attribute("halign").unwrap_or("left");
                write!(
                    out,
                    r#"<{tag} class="tableblock halign-{}">{}</{tag}>"#,
                    escape_html(align),
                    ctx.content(node)?
                )
                .unwrap();
            }
            NodeKind::Pass => out.push_str(node.text().unwrap_or_default()),
            NodeKind::Text => out.push_str(&escape_html(node.text().unwrap_or_default())),
            NodeKind::InlineAnchor => {
                let target = node.target().ok_or(RenderError::MissingTarget { kind })?;
                let text = ctx.content(node)?;
                let text = if text.is_empty() {
                    escape_html(target).into_owned()
                } else {
                    text
                };
                write!(out, r#"<a href="{}">{text}</a>"#, escape_html(target)).unwrap();
            }
            NodeKind::InlineQuoted => {
                let content = ctx.content(node)?;
                match node.style() {
                    Some("strong") => write!(out, "<strong>{content}</strong>"),
                    Some("emphasis") => write!(out, "<em>{content}</em>"),
                    Some("monospaced") => write!(out, "<code>{content}</code>"),
                    Some("superscript") => write!(out, "<sup>{content}</sup>"),
                    Some("subscript") => write!(out, "<sub>{content}</sub>"),
                    Some("mark") => write!(out, "<mark>{content}</mark>"),
                    Some(role) => write!(
                        out,
                        r#"<span class="{}">{content}</span>"#,
                        escape_html(role)
                    ),
                    None => write!(out, "{content}"),
                }
                .unwrap();
            }
            NodeKind::InlineBreak => out.push_str("<br>\n"),
            NodeKind::InlineImage => {
                out.push_str(r#"<span class="image">"#);
                image_tag(node, kind, &mut out)?;
                out.push_str("</span>");
            }
        }

        Ok(out)
    }
}

fn block_title(node: &Node, out: &mut String) {
    if let Some(title) = node.title().filter(|t| !t.is_empty()) {
        write!(out, r#"<div class="title">{}</div>"#, escape_html(title)).unwrap();
    }
}

fn section(node: &Node, ctx: &mut RenderContext<'_>, out: &mut String) -> Result<(), RenderError> {
    let level = node.level();
    let rank = level.saturating_add(1).min(6);
    let title = node.title().unwrap_or_default();
    let id = ctx
        .options()
        .flag("sectids", true)
        .then(|| section_id(title));
    let content = ctx.render_blocks(node)?;

    let heading = |out: &mut String, class: &str| {
        write!(out, "<h{rank}").unwrap();
        if let Some(id) = &id {
            write!(out, r#" id="{id}""#).unwrap();
        }
        out.push_str(class);
        write!(out, ">{}</h{rank}>", escape_html(title)).unwrap();
    };

    if level == 0 {
        heading(out, r#" class="sect0""#);
        out.push_str(&content);
        return Ok(());
    }

    write!(out, r#"<div class="sect{level}">"#).unwrap();
    heading(out, "");
    if level == 1 {
        write!(out, r#"<div class="sectionbody">{content}</div>"#).unwrap();
    } else {
        out.push_str(&content);
    }
    out.push_str("</div>");
    Ok(())
}

fn admonition(
    node: &Node,
    ctx: &mut RenderContext<'_>,
    out: &mut String,
) -> Result<(), RenderError> {
    let style = node.style().unwrap_or("NOTE");
    let name = style.to_lowercase();
    let label = title_case(style);
    let content = ctx.content(node)?;

    write!(
        out,
        r#"<div class="admonitionblock {}"><table><tr><td class="icon">"#,
        escape_html(&name)
    )
    .unwrap();
    if ctx.document().icons_enabled() {
        write!(
            out,
            r#"<i class="fa icon-{}" title="{}"></i>"#,
            escape_html(&name),
            escape_html(&label)
        )
        .unwrap();
    } else {
        write!(out, r#"<div class="title">{}</div>"#, escape_html(&label)).unwrap();
    }
    out.push_str(r#"</td><td class="content">"#);
    block_title(node, out);
    write!(out, "{content}</td></tr></table></div>").unwrap();
    Ok(())
}

fn table(node: &Node, ctx: &mut RenderContext<'_>, out: &mut String) -> Result<(), RenderError> {
    let (head, body): (Vec<&Node>, Vec<&Node>) = node
        .children()
        .iter()
        .partition(|row| row.style() == Some("header"));

    out.push_str(r#"<table class="tableblock frame-all grid-all stretch">"#);
    if let Some(title) = node.title().filter(|t| !t.is_empty()) {
        write!(out, r#"<caption class="title">{}</caption>"#, escape_html(title)).unwrap();
    }
    if !head.is_empty() {
        out.push_str("<thead>");
        for row in head {
            out.push_str(&ctx.render(row)?);
        }
        out.push_str("</thead>");
    }
    out.push_str("<tbody>");
    for row in body {
        out.push_str(&ctx.render(row)?);
    }
    out.push_str("</tbody></table>");
    Ok(())
}

fn image_tag(node: &Node, kind: NodeKind, out: &mut String) -> Result<(), RenderError> {
    let src = node.target().ok_or(RenderError::MissingTarget { kind })?;
    let alt = node.attribute("alt").unwrap_or_default();
    write!(
        out,
        r#"<img src="{}" alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
    Ok(())
}

/// `WARNING` -> `Warning`.
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
