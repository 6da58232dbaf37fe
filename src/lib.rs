//! # Smallpress
//!
//! A minimal static site generator for markdown blogs and small sites.
//! A site is a directory: markdown content with JSON front matter, minijinja
//! templates next to it, an optional `static/` tree. `build` mirrors the
//! content tree into plain HTML.
//!
//! # Architecture: One Linear Pass
//!
//! Every build walks the content root once and pushes each file through the
//! same stages:
//!
//! ```text
//! scan          content/           →  path-ordered markdown file list
//! front matter  +++ header +++     →  JSON map + body offset
//! markdown      body               →  HTML fragment (GFM)
//! template      _layouts + page    →  full HTML document
//! write         output mirror      →  website/blog/first.html
//! ```
//!
//! There is no dependency graph, no cache, and no partial rebuild: every run
//! renders every page, and the first error stops the run carrying the
//! offending file's path. At the scale this tool targets (tens to hundreds of
//! pages) a full rebuild costs less than the machinery to avoid one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content root into a deterministic, path-ordered file list |
//! | [`frontmatter`] | Parses the `+++`-delimited JSON header and locates the body |
//! | [`markdown`] | Renders GFM markdown to HTML fragments |
//! | [`pages`] | Resolves a section's children, one directory level down |
//! | [`sort`] | Orders page collections by a front matter key; `Date` sorts as a date |
//! | [`template`] | Composes layouts with per-directory templates; exposes `children` and `sorted` |
//! | [`generate`] | The build loop: read, parse, render, write, then copy static files |
//! | [`config`] | `smallpress.toml` loading, defaults, and validation |
//! | [`paths`] | Naming conventions: what is markdown, what is an index, URL mapping |
//! | [`serve`] | Local preview server over the output directory |
//! | [`init`] | Scaffolds a new site with a working starter theme |
//! | [`output`] | CLI output formatting for build and check runs |
//!
//! # Design Decisions
//!
//! ## JSON Front Matter
//!
//! The header between `+++` markers is a JSON object minus its outer braces:
//!
//! ```text
//! +++
//! "Title": "Hello, world",
//! "Date": "9-6-2025"
//! +++
//! ```
//!
//! Wrapping the lines in `{`...`}` yields standard JSON, so parsing, typing,
//! and error reporting all come from the JSON parser. There is no schema:
//! whatever keys a page declares are what its templates see.
//!
//! ## Sections Are Index Files
//!
//! A directory whose markdown includes an `index.*` file is a section. Index
//! files render through `section.html`, everything else through
//! `single.html`, each looked up in the templates directory matching the
//! page's content directory. Listings are pulled by templates, not pushed by
//! the generator: `children(url, mode)` returns the front matter of a
//! section's entries, `sorted(pages, key, descending)` orders them, and the
//! template decides what to show.
//!
//! ## Templates Are Site Content
//!
//! Templates live in the site tree and load at run time, so a theme is
//! editable with a text editor and takes effect on the next build. Layouts
//! under `_layouts/` (`base.html` plus `head`/`header`/`footer` includes)
//! frame a per-directory page template, which means one site can give its
//! blog a different shape than its project pages without any configuration.
//!
//! ## One Level of Children
//!
//! `children` stops one directory below the section it lists: a deep tree is
//! browsed section by section rather than flattened into one query. Child
//! collections are keyed by URL and sorted stably, so equal sort keys keep
//! their URL order and rebuilds are byte-identical.
//!
//! # Plain Output
//!
//! The output directory is complete in itself: HTML files, your stylesheet,
//! whatever `static/` held. Drop it on any file server. `serve` exists for
//! previewing, not for hosting.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod init;
pub mod markdown;
pub mod output;
pub mod pages;
pub mod paths;
pub mod scan;
pub mod serve;
pub mod sort;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
