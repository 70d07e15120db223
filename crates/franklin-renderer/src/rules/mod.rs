//! Built-in rule catalogue.
//!
//! These override the fallback for the kinds they cover; every other kind
//! goes to the fallback renderer unchanged.

mod block;
mod inline;
mod list;
mod section;

pub use block::{AdmonitionRule, ParagraphRule, PassthroughRule, ThematicBreakRule};
pub use inline::{LinkRule, QuotedRule};
pub use list::{ListItemRule, ListRule};
pub use section::SectionRule;
