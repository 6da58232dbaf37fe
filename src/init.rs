//! Site scaffolding for `smallpress init`.
//!
//! Lays down the layout the pipeline expects plus a small starter site that
//! builds cleanly as scaffolded: a home page listing posts, an about page,
//! and a blog section with two dated posts.
//!
//! ```text
//! mysite/
//! ├── smallpress.toml
//! ├── content/
//! │   ├── index.md
//! │   ├── about.md
//! │   └── blog/
//! │       ├── index.md
//! │       ├── hello-world.md
//! │       └── writing-posts.md
//! ├── templates/
//! │   ├── _layouts/
//! │   │   ├── base.html
//! │   │   ├── head.html
//! │   │   ├── header.html
//! │   │   └── footer.html
//! │   ├── section.html
//! │   ├── single.html
//! │   └── blog/
//! │       ├── section.html
//! │       └── single.html
//! └── static/
//!     └── style.css
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{self, CONFIG_FILE};

/// Starter site, embedded at compile time. Paths are site-root-relative.
const STARTER_FILES: &[(&str, &str)] = &[
    (
        "content/index.md",
        include_str!("../starter/content/index.md"),
    ),
    (
        "content/about.md",
        include_str!("../starter/content/about.md"),
    ),
    (
        "content/blog/index.md",
        include_str!("../starter/content/blog/index.md"),
    ),
    (
        "content/blog/hello-world.md",
        include_str!("../starter/content/blog/hello-world.md"),
    ),
    (
        "content/blog/writing-posts.md",
        include_str!("../starter/content/blog/writing-posts.md"),
    ),
    (
        "templates/_layouts/base.html",
        include_str!("../starter/templates/_layouts/base.html"),
    ),
    (
        "templates/_layouts/head.html",
        include_str!("../starter/templates/_layouts/head.html"),
    ),
    (
        "templates/_layouts/header.html",
        include_str!("../starter/templates/_layouts/header.html"),
    ),
    (
        "templates/_layouts/footer.html",
        include_str!("../starter/templates/_layouts/footer.html"),
    ),
    (
        "templates/section.html",
        include_str!("../starter/templates/section.html"),
    ),
    (
        "templates/single.html",
        include_str!("../starter/templates/single.html"),
    ),
    (
        "templates/blog/section.html",
        include_str!("../starter/templates/blog/section.html"),
    ),
    (
        "templates/blog/single.html",
        include_str!("../starter/templates/blog/single.html"),
    ),
    (
        "static/style.css",
        include_str!("../starter/static/style.css"),
    ),
];

#[derive(Error, Debug)]
pub enum InitError {
    #[error("{0} is not empty, refusing to scaffold over it")]
    NotEmpty(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Scaffold a new site under `root`.
///
/// The directory may be missing or empty; anything else is refused rather
/// than merged with existing files.
pub fn init_site(root: &Path) -> Result<(), InitError> {
    if !is_empty_or_missing(root)? {
        return Err(InitError::NotEmpty(root.to_path_buf()));
    }

    for &(rel, contents) in STARTER_FILES {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }
    fs::write(root.join(CONFIG_FILE), config::stock_config_toml())?;

    Ok(())
}

fn is_empty_or_missing(path: &Path) -> io::Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}
