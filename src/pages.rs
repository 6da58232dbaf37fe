//! Child-page resolution for section listings and navigation.
//!
//! The content tree has exactly two kinds of node: a file whose stem is
//! `index` represents a *section* (the directory it sits in), and every
//! other file is a *leaf page* of its section. Templates ask for a
//! section's children in one of two modes, nested sections or leaf pages,
//! and get back a [`PageCollection`] keyed by URL.
//!
//! Listings are one level deep by contract: a query for `/blog` surfaces
//! direct children and the indexes of immediate subsections, and the walk
//! never descends further. Deeper hierarchy exists on disk and renders to
//! output, but listing it requires querying the subsection itself.
//!
//! Every call re-walks the queried directory rather than consulting a
//! shared tree, so resolving navigation for a site costs file count times
//! section width. Fine at the scale this tool targets; the thing to fix
//! first if it ever isn't.

use crate::frontmatter::{self, FrontMatter, FrontMatterError};
use crate::paths;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Pages keyed by site-absolute URL (`/blog/a.html`). The BTreeMap keeps
/// iteration in URL order, which is the order sorting treats as "input
/// order" for equal keys.
pub type PageCollection = BTreeMap<String, FrontMatter>;

/// Which children of a section a listing wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildMode {
    /// Index files of immediate subsections.
    Subsections,
    /// Non-index files: the section's own leaf pages.
    LeafPages,
}

impl ChildMode {
    /// Mode keyword as used from templates: `"sections"` or `"pages"`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "sections" => Some(Self::Subsections),
            "pages" => Some(Self::LeafPages),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("cannot walk section: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("cannot read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("{0}: {1}")]
    FrontMatter(PathBuf, #[source] FrontMatterError),
}

/// Resolve the one-level children of `section_url` under `content_root`.
///
/// The section's own index file never appears in its own listing. Any
/// walk, read, or front matter failure is fatal to the whole build; a
/// broken metadata file anywhere under a queried section stops the site
/// from generating.
pub fn resolve_children(
    content_root: &Path,
    section_url: &str,
    mode: ChildMode,
    delimiter: &str,
) -> Result<PageCollection, ResolveError> {
    let section_dir = paths::section_dir(content_root, section_url);

    // Depth 1 is the section's own files, depth 2 the files of immediate
    // subsections; the walk never descends past that.
    let mut children = PageCollection::new();
    for entry in WalkDir::new(&section_dir).max_depth(2) {
        let entry = entry?;
        if !entry.file_type().is_file() || !paths::is_markdown(entry.path()) {
            continue;
        }

        let is_index = paths::is_index(entry.path());
        if entry.depth() == 1 && is_index {
            continue; // the section's own index
        }
        let keep = match mode {
            ChildMode::Subsections => is_index,
            ChildMode::LeafPages => !is_index,
        };
        if !keep {
            continue;
        }

        let source = fs::read_to_string(entry.path())
            .map_err(|e| ResolveError::Read(entry.path().to_path_buf(), e))?;
        let parsed = frontmatter::parse(&source, delimiter)
            .map_err(|e| ResolveError::FrontMatter(entry.path().to_path_buf(), e))?;

        let rel = entry.path().strip_prefix(content_root).unwrap_or(entry.path());
        children.insert(paths::page_url(rel), parsed.data);
    }

    Ok(children)
}
