//! String-level utilities applied to rendered leaf content.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s<]+").unwrap());

/// Wrap bare absolute URLs in anchors pointing at themselves.
///
/// Every maximal non-whitespace run that starts with `http://` or `https://`
/// becomes `<a href="{url}">{url}</a>`. Runs that merely contain a URL (for
/// example `href="https://..."` or the text of an existing anchor) are left
/// alone. Input is rendered markup with text already escaped, so a raw `<`
/// always opens a tag and ends the run.
///
/// # Examples
///
/// ```
/// use franklin_renderer::linkify;
///
/// assert_eq!(
///     linkify("see https://example.com now"),
///     r#"see <a href="https://example.com">https://example.com</a> now"#
/// );
/// assert_eq!(linkify("no links here"), "no links here");
/// ```
pub fn linkify(text: &str) -> Cow<'_, str> {
    let mut out: Option<String> = None;
    let mut last = 0;

    for m in URL_PATTERN.find_iter(text) {
        let starts_run = text[..m.start()]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        if !starts_run {
            continue;
        }
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 32));
        buf.push_str(&text[last..m.start()]);
        write!(buf, r#"<a href="{0}">{0}</a>"#, m.as_str()).unwrap();
        last = m.end();
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// Escape `&`, `<`, `>` and `"` for use in text and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Generate a section id from its title: `_` prefix, lower-case words joined
/// by `_`, everything that is not alphanumeric treated as a separator.
pub(crate) fn section_id(title: &str) -> String {
    let mut id = String::with_capacity(title.len() + 1);
    let mut pending_sep = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_sep {
                id.push('_');
                pending_sep = false;
            }
            id.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if id.is_empty() {
        id.push('_');
    }
    id
}
