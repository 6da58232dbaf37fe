//! Template composition and page rendering.
//!
//! Every page is rendered through the same fixed composition: the base
//! layout plus the three shared fragments, plus one page template chosen
//! by what kind of file is being rendered.
//!
//! ```text
//! templates/
//! ├── _layouts/
//! │   ├── base.html      # outer document; includes the other four
//! │   ├── head.html
//! │   ├── header.html
//! │   └── footer.html
//! ├── single.html        # leaf pages in content/
//! ├── section.html       # index pages in content/
//! └── blog/
//!     ├── single.html    # leaf pages in content/blog/
//!     └── section.html   # index pages in content/blog/
//! ```
//!
//! The selected `single.html` or `section.html` is registered under the
//! fixed name `page.html`, so a base layout always reads the same way:
//!
//! ```text
//! <!DOCTYPE html>
//! <html>
//! {% include "head.html" %}
//! <body>
//! {% include "header.html" %}
//! {% include "page.html" %}
//! {% include "footer.html" %}
//! </body>
//! </html>
//! ```
//!
//! Templates execute against the page's front matter fields plus the
//! rendered markdown body under `Content`. `Content` is the only value
//! injected pre-escaped; everything else is HTML-escaped on output.
//! Escaping rewrites `<>&"'` and leaves `/` alone, so `Link` values and
//! listing URLs print as written.
//!
//! Two functions are available inside templates:
//!
//! - `children(section, mode)`: one-level listing of a section, mode
//!   `"sections"` or `"pages"`; returns pages keyed by URL.
//! - `sorted(collection, key, descending)`: pages ordered by a front
//!   matter field, each with its URL under `Link`.
//!
//! A fresh environment is built per page, so template edits between runs
//! always take effect and a page only ever pays for the five files it
//! uses. Re-parsing the layouts for every page is part of the same
//! trade-off as the per-query section walk in [`crate::pages`].

use crate::frontmatter::FrontMatter;
use crate::pages::{self, ChildMode, PageCollection};
use crate::paths;
use crate::sort;
use minijinja::value::{Value, ViaDeserialize};
use minijinja::{AutoEscape, Environment, ErrorKind, Output, State, escape_formatter};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field holding the rendered markdown body in template context.
pub const CONTENT_KEY: &str = "Content";

/// Layout fragments, always composed into every page.
const LAYOUT_FILES: [&str; 4] = ["base.html", "head.html", "header.html", "footer.html"];
const LAYOUTS_DIR: &str = "_layouts";

/// Registration name for the selected single/section template.
const PAGE_TEMPLATE: &str = "page.html";
const BASE_TEMPLATE: &str = "base.html";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("cannot read template {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// The four layout fragment files under `templates/_layouts/`.
///
/// `check` verifies their presence without rendering anything.
pub fn layout_paths(templates_dir: &Path) -> [PathBuf; 4] {
    LAYOUT_FILES.map(|name| templates_dir.join(LAYOUTS_DIR).join(name))
}

/// Renders pages against the site's template tree.
///
/// Holds the per-run constants; the per-page state (environment, parsed
/// templates, context) is rebuilt for every call to [`Renderer::render_page`].
pub struct Renderer {
    templates_dir: PathBuf,
    content_root: PathBuf,
    delimiter: String,
}

impl Renderer {
    pub fn new(templates_dir: PathBuf, content_root: PathBuf, delimiter: String) -> Self {
        Self {
            templates_dir,
            content_root,
            delimiter,
        }
    }

    /// Path of the single/section template that `rel` renders through.
    pub fn page_template_path(&self, rel: &Path) -> PathBuf {
        let name = if paths::is_index(rel) {
            "section.html"
        } else {
            "single.html"
        };
        match rel.parent() {
            Some(parent) => self.templates_dir.join(parent).join(name),
            None => self.templates_dir.join(name),
        }
    }

    /// Render one content file's page: front matter fields plus the
    /// already-rendered body, through the composed layout.
    pub fn render_page(
        &self,
        rel: &Path,
        front: &FrontMatter,
        body_html: String,
    ) -> Result<String, TemplateError> {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);
        for name in LAYOUT_FILES {
            let path = self.templates_dir.join(LAYOUTS_DIR).join(name);
            env.add_template_owned(name, self.read_template(&path)?)?;
        }
        let page_path = self.page_template_path(rel);
        env.add_template_owned(PAGE_TEMPLATE, self.read_template(&page_path)?)?;
        self.install_functions(&mut env);

        let mut ctx: BTreeMap<String, Value> = BTreeMap::new();
        for (name, value) in front {
            ctx.insert(name.clone(), Value::from_serialize(value));
        }
        ctx.insert(CONTENT_KEY.to_string(), Value::from_safe_string(body_html));

        let base = env.get_template(BASE_TEMPLATE)?;
        Ok(base.render(&ctx)?)
    }

    fn read_template(&self, path: &Path) -> Result<String, TemplateError> {
        fs::read_to_string(path).map_err(|e| TemplateError::Read(path.to_path_buf(), e))
    }

    /// Expose section listing and sorting to executing templates. Errors
    /// raised here fail the page's render, which fails the build.
    fn install_functions(&self, env: &mut Environment<'_>) {
        let content_root = self.content_root.clone();
        let delimiter = self.delimiter.clone();
        env.add_function(
            "children",
            move |section: String, mode: String| -> Result<Value, minijinja::Error> {
                let mode = ChildMode::from_keyword(&mode).ok_or_else(|| {
                    minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("unknown child mode {mode:?}, expected \"sections\" or \"pages\""),
                    )
                })?;
                let children = pages::resolve_children(&content_root, &section, mode, &delimiter)
                    .map_err(|e| {
                        minijinja::Error::new(
                            ErrorKind::InvalidOperation,
                            format!("cannot list children of {section}"),
                        )
                        .with_source(e)
                    })?;
                Ok(Value::from_serialize(&children))
            },
        );

        env.add_function(
            "sorted",
            |collection: ViaDeserialize<PageCollection>,
             key: String,
             descending: bool|
             -> Result<Value, minijinja::Error> {
                let ordered = sort::sort(&collection, &key, descending).map_err(|e| {
                    minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("cannot sort pages by {key:?}"),
                    )
                    .with_source(e)
                })?;
                Ok(Value::from_serialize(&ordered))
            },
        );
    }
}

/// `{{ ... }}` formatter. The engine's stock HTML escape also rewrites `/`
/// to `&#x2f;`, which garbles every link a template prints, so strings are
/// escaped here with slashes kept literal. Safe strings, non-strings and
/// non-HTML contexts fall through to the stock formatter.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() {
        if let Some(raw) = value.as_str() {
            for ch in raw.chars() {
                match ch {
                    '<' => out.write_str("&lt;")?,
                    '>' => out.write_str("&gt;")?,
                    '&' => out.write_str("&amp;")?,
                    '"' => out.write_str("&quot;")?,
                    '\'' => out.write_str("&#x27;")?,
                    _ => out.write_char(ch)?,
                }
            }
            return Ok(());
        }
    }
    escape_formatter(out, state, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{dated_page, minimal_templates, page, write};
    use serde_json::json;
    use tempfile::TempDir;

    fn front(value: serde_json::Value) -> FrontMatter {
        let serde_json::Value::Object(map) = value else {
            panic!("front matter fixture must be an object");
        };
        map
    }

    fn renderer(root: &Path) -> Renderer {
        Renderer::new(
            root.join("templates"),
            root.join("content"),
            "+++".to_string(),
        )
    }

    #[test]
    fn single_template_selected_for_leaf_pages() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());

        let out = renderer(temp.path())
            .render_page(
                Path::new("about.md"),
                &front(json!({"Title": "About"})),
                "<p>b</p>".to_string(),
            )
            .unwrap();
        assert!(out.contains("<main>"));
        assert!(!out.contains("class=\"section\""));
    }

    #[test]
    fn section_template_selected_for_indexes() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());

        let out = renderer(temp.path())
            .render_page(
                Path::new("index.md"),
                &front(json!({"Title": "Home"})),
                String::new(),
            )
            .unwrap();
        assert!(out.contains("class=\"section\""));
    }

    #[test]
    fn templates_resolve_per_content_directory() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        write(
            temp.path(),
            "templates/blog/single.html",
            "<article>blog-single</article>",
        );

        let out = renderer(temp.path())
            .render_page(
                Path::new("blog/post.md"),
                &front(json!({"Title": "P"})),
                String::new(),
            )
            .unwrap();
        assert!(out.contains("blog-single"));
    }

    #[test]
    fn layout_fragments_all_compose() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());

        let out = renderer(temp.path())
            .render_page(
                Path::new("about.md"),
                &front(json!({"Title": "About"})),
                String::new(),
            )
            .unwrap();
        assert!(out.contains("<!DOCTYPE html>"));
        assert!(out.contains("<title>About</title>"));
        assert!(out.contains("<header>"));
        assert!(out.contains("<footer>"));
    }

    #[test]
    fn body_html_is_injected_unescaped() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());

        let out = renderer(temp.path())
            .render_page(
                Path::new("about.md"),
                &front(json!({"Title": "T"})),
                "<em>kept as markup</em>".to_string(),
            )
            .unwrap();
        assert!(out.contains("<em>kept as markup</em>"));
    }

    #[test]
    fn front_matter_fields_are_escaped() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());

        let out = renderer(temp.path())
            .render_page(
                Path::new("about.md"),
                &front(json!({"Title": "<script>alert(1)</script>"})),
                String::new(),
            )
            .unwrap();
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    // ========================================================================
    // Template functions
    // ========================================================================

    #[test]
    fn children_and_sorted_compose_into_listings() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        write(temp.path(), "content/blog/index.md", &page("Blog"));
        write(temp.path(), "content/blog/b.md", &page("Beta"));
        write(temp.path(), "content/blog/a.md", &page("Alpha"));
        write(
            temp.path(),
            "templates/blog/section.html",
            "{% for child in sorted(children(\"/blog\", \"pages\"), \"Title\", false) %}\
             [{{ child.Title }}]({{ child.Link }}){% endfor %}",
        );

        let out = renderer(temp.path())
            .render_page(
                Path::new("blog/index.md"),
                &front(json!({"Title": "Blog"})),
                String::new(),
            )
            .unwrap();
        assert!(out.contains("[Alpha](/blog/a.html)[Beta](/blog/b.html)"));
    }

    #[test]
    fn section_listing_via_items_filter() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        write(temp.path(), "content/blog/index.md", &page("Blog"));
        write(temp.path(), "content/index.md", &page("Home"));
        write(
            temp.path(),
            "templates/section.html",
            "{% for url, child in children(\"/\", \"sections\")|items %}\
             {{ url }}={{ child.Title }};{% endfor %}",
        );

        let out = renderer(temp.path())
            .render_page(
                Path::new("index.md"),
                &front(json!({"Title": "Home"})),
                String::new(),
            )
            .unwrap();
        assert!(out.contains("/blog/index.html=Blog;"));
    }

    #[test]
    fn listing_urls_keep_literal_slashes() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        write(temp.path(), "content/blog/index.md", &page("Blog"));
        write(
            temp.path(),
            "content/blog/tips.md",
            &dated_page("Tips & Tricks", "2-6-2025"),
        );
        write(temp.path(), "content/blog/old.md", &dated_page("Old", "1-6-2025"));

        let out = renderer(temp.path())
            .render_page(
                Path::new("blog/index.md"),
                &front(json!({"Title": "Blog"})),
                String::new(),
            )
            .unwrap();
        assert!(out.contains("<a href=\"/blog/tips.html\">Tips &amp; Tricks</a>"));
        assert!(out.contains("<a href=\"/blog/old.html\">Old</a>"));
        assert!(!out.contains("&#x2f;"));
    }

    #[test]
    fn unknown_child_mode_fails_the_render() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        fs::create_dir_all(temp.path().join("content")).unwrap();
        write(
            temp.path(),
            "templates/single.html",
            "{{ children(\"/\", \"leaves\") }}",
        );

        let err = renderer(temp.path())
            .render_page(Path::new("a.md"), &front(json!({})), String::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
    }

    #[test]
    fn broken_child_metadata_fails_the_render() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        write(temp.path(), "content/blog/good.md", &page("G"));
        write(temp.path(), "content/blog/bad.md", "+++\nno second marker");
        write(
            temp.path(),
            "templates/single.html",
            "{{ children(\"/blog\", \"pages\") }}",
        );

        let err = renderer(temp.path())
            .render_page(Path::new("a.md"), &front(json!({})), String::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
    }

    // ========================================================================
    // Failure modes
    // ========================================================================

    #[test]
    fn missing_page_template_errors_with_its_path() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());

        let err = renderer(temp.path())
            .render_page(
                Path::new("notes/post.md"),
                &front(json!({"Title": "P"})),
                String::new(),
            )
            .unwrap_err();
        match err {
            TemplateError::Read(path, _) => {
                assert!(path.ends_with("templates/notes/single.html"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_layout_errors_with_its_path() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        fs::remove_file(temp.path().join("templates/_layouts/footer.html")).unwrap();

        let err = renderer(temp.path())
            .render_page(Path::new("about.md"), &front(json!({})), String::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::Read(path, _) if path.ends_with("footer.html")));
    }

    #[test]
    fn malformed_template_is_a_render_error() {
        let temp = TempDir::new().unwrap();
        minimal_templates(temp.path());
        write(temp.path(), "templates/single.html", "{% for %}");

        let err = renderer(temp.path())
            .render_page(Path::new("a.md"), &front(json!({})), String::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
    }
}
