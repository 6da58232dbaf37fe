//! Markdown to HTML conversion.
//!
//! A thin, pure wrapper around [pulldown-cmark](https://docs.rs/pulldown-cmark):
//! no file I/O, no state, same input always produces the same output. The
//! enabled extensions are the GitHub-flavored set (tables, strikethrough,
//! task lists, alerts) on top of CommonMark.
//!
//! Raw HTML in the body passes through untouched, as markdown semantics
//! require; content files are trusted input.

use pulldown_cmark::{Options, Parser, html};

/// Extensions enabled on top of CommonMark.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a markdown body to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
