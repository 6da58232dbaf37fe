//! Site generation: the one linear pass that builds everything.
//!
//! For every markdown file under the content root, in path order:
//!
//! 1. read the file and parse its front matter header;
//! 2. render the body markdown to HTML;
//! 3. compose and execute the page's template;
//! 4. write the result to the mirrored output path.
//!
//! Then the static directory, if present, is copied verbatim into the
//! output root. The first error anywhere stops the run; pages written
//! before the failure stay on disk, and nothing is rolled back or staged.
//! Re-running regenerates every page from scratch (and does not remove
//! output for content that no longer exists).
//!
//! ## Output Structure
//!
//! ```text
//! website/
//! ├── index.html           # from content/index.md
//! ├── about.html           # from content/about.md
//! ├── blog/
//! │   ├── index.html       # from content/blog/index.md
//! │   └── first.html       # from content/blog/first.md
//! └── style.css            # from static/style.css
//! ```
//!
//! Progress reporting is push-based: the caller may pass a channel and
//! receives one [`BuildEvent`] per page. Nothing in this module prints.

use crate::config::SiteConfig;
use crate::frontmatter::{self, FrontMatterError};
use crate::markdown;
use crate::paths;
use crate::scan::{self, ScanError};
use crate::template::{self, Renderer, TemplateError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("{0}: {1}")]
    FrontMatter(PathBuf, #[source] FrontMatterError),
    #[error("cannot render {0}: {1}")]
    Template(PathBuf, #[source] TemplateError),
    #[error(transparent)]
    Layout(#[from] TemplateError),
    #[error("cannot write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
    #[error("cannot copy static assets: {0}")]
    StaticCopy(#[source] std::io::Error),
}

/// Resolved directory layout and settings for one generation run.
#[derive(Debug, Clone)]
pub struct Site {
    pub content_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: String,
}

impl Site {
    /// Resolve a site's directories from its root and config. A relative
    /// output path lands under the site root.
    pub fn from_config(site_root: &Path, output: &Path, config: &SiteConfig) -> Self {
        let output_dir = if output.is_absolute() {
            output.to_path_buf()
        } else {
            site_root.join(output)
        };
        Self {
            content_dir: config.content_dir(site_root),
            templates_dir: config.templates_dir(site_root),
            static_dir: config.static_dir(site_root),
            output_dir,
            delimiter: config.front_matter.delimiter.clone(),
        }
    }
}

/// Progress event, one per completed unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    PageWritten {
        /// Content-relative source path.
        source: PathBuf,
        /// Written file, relative to the output root.
        output: PathBuf,
        /// True when the source is a section index.
        section: bool,
    },
    StaticCopied {
        files: usize,
    },
}

/// Closing counts for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub sections: usize,
    pub static_files: usize,
}

/// What `check` verified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub pages: usize,
    pub sections: usize,
}

/// Build the whole site. Dropping `events` at return closes the channel,
/// which is how a printer thread on the receiving end knows to stop.
pub fn generate(
    site: &Site,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildSummary, GenerateError> {
    let files = scan::scan(&site.content_dir)?;
    fs::create_dir_all(&site.output_dir)
        .map_err(|e| GenerateError::Write(site.output_dir.clone(), e))?;

    let renderer = Renderer::new(
        site.templates_dir.clone(),
        site.content_dir.clone(),
        site.delimiter.clone(),
    );

    let mut summary = BuildSummary::default();
    for file in &files {
        let source = fs::read_to_string(&file.path)
            .map_err(|e| GenerateError::Read(file.path.clone(), e))?;
        let parsed = frontmatter::parse(&source, &site.delimiter)
            .map_err(|e| GenerateError::FrontMatter(file.path.clone(), e))?;
        let body_html = markdown::render(&source[parsed.body_offset..]);
        let html = renderer
            .render_page(&file.rel, &parsed.data, body_html)
            .map_err(|e| GenerateError::Template(file.path.clone(), e))?;

        let out_path = paths::output_path(&site.output_dir, &file.rel);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GenerateError::Write(parent.to_path_buf(), e))?;
        }
        fs::write(&out_path, html).map_err(|e| GenerateError::Write(out_path.clone(), e))?;

        let section = paths::is_index(&file.rel);
        if section {
            summary.sections += 1;
        } else {
            summary.pages += 1;
        }
        send(
            &events,
            BuildEvent::PageWritten {
                source: file.rel.clone(),
                output: file.rel.with_extension("html"),
                section,
            },
        );
    }

    if site.static_dir.is_dir() {
        summary.static_files =
            copy_dir_recursive(&site.static_dir, &site.output_dir).map_err(GenerateError::StaticCopy)?;
        send(
            &events,
            BuildEvent::StaticCopied {
                files: summary.static_files,
            },
        );
    }

    Ok(summary)
}

/// Validate the site without writing anything: every content file's front
/// matter must parse, every page's template must exist, and the four
/// layout fragments must be present.
pub fn check(site: &Site) -> Result<CheckReport, GenerateError> {
    for layout in template::layout_paths(&site.templates_dir) {
        if let Err(e) = fs::metadata(&layout) {
            return Err(TemplateError::Read(layout, e).into());
        }
    }

    let files = scan::scan(&site.content_dir)?;
    let renderer = Renderer::new(
        site.templates_dir.clone(),
        site.content_dir.clone(),
        site.delimiter.clone(),
    );

    let mut report = CheckReport::default();
    for file in &files {
        let source = fs::read_to_string(&file.path)
            .map_err(|e| GenerateError::Read(file.path.clone(), e))?;
        frontmatter::parse(&source, &site.delimiter)
            .map_err(|e| GenerateError::FrontMatter(file.path.clone(), e))?;

        let template_path = renderer.page_template_path(&file.rel);
        fs::metadata(&template_path).map_err(|e| {
            GenerateError::Template(
                file.path.clone(),
                TemplateError::Read(template_path.clone(), e),
            )
        })?;

        if paths::is_index(&file.rel) {
            report.sections += 1;
        } else {
            report.pages += 1;
        }
    }
    Ok(report)
}

fn send(events: &Option<Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

/// Copy a directory tree verbatim, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}
