//! Shared test utilities for the smallpress test suite.
//!
//! Fixture sites are built programmatically in temp directories: a helper
//! for writing one file with its parents, generators for well-formed page
//! sources, and a minimal but complete template tree that every rendering
//! test can start from and selectively overwrite.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::{minimal_templates, page, write};
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! minimal_templates(temp.path());
//! write(temp.path(), "content/blog/index.md", &page("Blog"));
//! ```

use std::fs;
use std::path::Path;

/// Write `contents` at `rel` under `root`, creating parent directories.
pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A well-formed page source with a `Title` field and a small body.
pub fn page(title: &str) -> String {
    format!("+++\n\"Title\": \"{title}\"\n+++\n\n# {title}\n\nBody of {title}.\n")
}

/// A well-formed page source with `Title` and `Date` fields.
pub fn dated_page(title: &str, date: &str) -> String {
    format!("+++\n\"Title\": \"{title}\",\n\"Date\": \"{date}\"\n+++\n\nBody of {title}.\n")
}

/// A complete template tree under `<root>/templates/`: the four layout
/// fragments, root `single.html`/`section.html`, and listing templates
/// for a `blog` section ordered newest-first by `Date`.
///
/// Kept deliberately terse; tests overwrite individual files when they
/// need specific markup.
pub fn minimal_templates(root: &Path) {
    write(
        root,
        "templates/_layouts/base.html",
        "<!DOCTYPE html>\n<html>\n{% include \"head.html\" %}\n<body>\n\
         {% include \"header.html\" %}\n{% include \"page.html\" %}\n\
         {% include \"footer.html\" %}\n</body>\n</html>\n",
    );
    write(
        root,
        "templates/_layouts/head.html",
        "<head><title>{{ Title }}</title></head>",
    );
    write(root, "templates/_layouts/header.html", "<header>site</header>");
    write(root, "templates/_layouts/footer.html", "<footer>end</footer>");
    write(root, "templates/single.html", "<main>{{ Content }}</main>");
    write(
        root,
        "templates/section.html",
        "<main class=\"section\">{{ Content }}</main>",
    );
    write(root, "templates/blog/single.html", "<article>{{ Content }}</article>");
    write(
        root,
        "templates/blog/section.html",
        "<main class=\"section\">{{ Content }}<ul>\
         {% for child in sorted(children(\"/blog\", \"pages\"), \"Date\", true) %}\
         <li><a href=\"{{ child.Link }}\">{{ child.Title }}</a></li>{% endfor %}\
         </ul></main>",
    );
}
