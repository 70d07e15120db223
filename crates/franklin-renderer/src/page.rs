//! Page shell around rendered content.

use std::fmt::Write;

use crate::text::escape_html;

const DEFAULT_SCRIPT: &str = "/scripts/scripts.js";
const DEFAULT_STYLESHEET: &str = "/styles/styles.css";
const DEFAULT_ICON: &str = "data:,";

/// Fixed HTML boilerplate placed around converted content.
///
/// Only the asset URLs are configurable; the structure (viewport meta,
/// module script, stylesheet, icon, `header`/`main`/`footer` landmarks) is
/// fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageShell {
    /// Module script URL.
    pub script: String,
    /// Stylesheet URL.
    pub stylesheet: String,
    /// Icon URL. The default `data:,` suppresses favicon requests.
    pub icon: String,
}

impl Default for PageShell {
    fn default() -> Self {
        Self {
            script: DEFAULT_SCRIPT.to_owned(),
            stylesheet: DEFAULT_STYLESHEET.to_owned(),
            icon: DEFAULT_ICON.to_owned(),
        }
    }
}

impl PageShell {
    /// Wrap rendered content in a complete HTML page.
    #[must_use]
    pub fn wrap(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len() + 384);
        out.push_str("<!DOCTYPE html>\n<html>\n  <head>\n");
        out.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        writeln!(
            out,
            r#"    <script src="{}" type="module"></script>"#,
            escape_html(&self.script)
        )
        .unwrap();
        writeln!(
            out,
            r#"    <link rel="stylesheet" href="{}">"#,
            escape_html(&self.stylesheet)
        )
        .unwrap();
        writeln!(
            out,
            r#"    <link rel="icon" href="{}">"#,
            escape_html(&self.icon)
        )
        .unwrap();
        out.push_str("  </head>\n  <body>\n    <header></header>\n    <main>\n");
        out.push_str(html);
        out.push_str("\n    </main>\n    <footer></footer>\n  </body>\n</html>\n");
        out
    }
}
