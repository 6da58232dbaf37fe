//! Content tree discovery.
//!
//! Walks the content root and collects every markdown file beneath it,
//! however deeply nested. This is the only place the full tree is
//! enumerated; listing queries made from templates re-walk just the
//! section they ask about (see [`crate::pages`]).
//!
//! ```text
//! content/
//! ├── index.md          # site front page (section index of the root)
//! ├── about.md          # leaf page
//! └── blog/
//!     ├── index.md      # section index for /blog
//!     ├── first.md
//!     └── second.md
//! ```
//!
//! The result is sorted by relative path so a build processes files in
//! the same order on every run and every platform. Downstream consumers
//! do not depend on the order; listings re-derive their own.

use crate::paths;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("content directory {0} is missing or not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot traverse content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One discovered source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Absolute (or caller-relative) path on disk.
    pub path: PathBuf,
    /// Path relative to the content root; the coordinate used for URLs
    /// and output paths.
    pub rel: PathBuf,
}

/// Collect every markdown file under `content_root`, sorted by relative
/// path.
pub fn scan(content_root: &Path) -> Result<Vec<ContentFile>, ScanError> {
    if !content_root.is_dir() {
        return Err(ScanError::NotADirectory(content_root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(content_root) {
        let entry = entry?;
        if !entry.file_type().is_file() || !paths::is_markdown(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(content_root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(ContentFile {
            path: entry.path().to_path_buf(),
            rel,
        });
    }

    files.sort_by(|a, b| a.rel.cmp(&b.rel));
    Ok(files)
}
