//! Centralized path and URL conventions for the content tree.
//!
//! Every place that maps between the three coordinate systems (content
//! files on disk, site-absolute URLs, output files) goes through this
//! module so the conventions live in exactly one place:
//!
//! - `content/blog/post.md` → URL `/blog/post.html`
//! - `content/blog/post.md` → output `<output>/blog/post.html`
//! - URL `/blog` → section directory `content/blog`
//!
//! URLs always use forward slashes and a leading slash, regardless of the
//! platform path separator.

use std::path::{Component, Path, PathBuf};

/// True if the path has a markdown extension (`md`, ASCII case-insensitive).
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

/// True if the path's extension-stripped basename is exactly `index`.
///
/// Index files represent sections; everything else is a leaf page.
pub fn is_index(path: &Path) -> bool {
    path.file_stem().and_then(|s| s.to_str()) == Some("index")
}

/// Site-absolute URL for a content-relative path: leading slash, forward
/// slashes, markdown extension replaced by `.html`.
pub fn page_url(rel: &Path) -> String {
    let html = rel.with_extension("html");
    let mut url = String::new();
    for component in html.components() {
        if let Component::Normal(part) = component {
            url.push('/');
            url.push_str(&part.to_string_lossy());
        }
    }
    url
}

/// Output file for a content-relative path: same directory structure under
/// the output root, `.md` replaced by `.html`.
pub fn output_path(output_root: &Path, rel: &Path) -> PathBuf {
    output_root.join(rel.with_extension("html"))
}

/// Filesystem directory for a section URL under the content root.
///
/// `/blog` and `blog/` both resolve to `<content_root>/blog`; `/` resolves
/// to the content root itself.
pub fn section_dir(content_root: &Path, section_url: &str) -> PathBuf {
    let trimmed = section_url.trim_matches('/');
    if trimmed.is_empty() {
        content_root.to_path_buf()
    } else {
        content_root.join(trimmed)
    }
}
