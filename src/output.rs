//! CLI output formatting for build and check runs.
//!
//! # Output Format
//!
//! ## Build
//!
//! One line per written page: content-relative source on the left, the
//! output file on the right. Section indexes are marked so a long run is
//! easy to skim:
//!
//! ```text
//! about.md → about.html
//! blog/index.md → blog/index.html (section)
//! blog/first.md → blog/first.html
//! Copied 3 static files
//! Built 3 pages, 2 sections, 3 static files
//! ```
//!
//! ## Check
//!
//! ```text
//! Checked 3 pages, 2 sections
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function for testability and a `print_*`
//! wrapper that writes to stdout. Format functions are pure: no I/O, no
//! side effects.

use crate::generate::{BuildEvent, BuildSummary, CheckReport};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a count with its unit: "1 page", "3 pages".
fn pluralize(n: usize, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::PageWritten {
            source,
            output,
            section,
        } => {
            let marker = if *section { " (section)" } else { "" };
            vec![format!(
                "{} \u{2192} {}{}",
                source.display(),
                output.display(),
                marker
            )]
        }
        BuildEvent::StaticCopied { files } => {
            vec![format!("Copied {}", pluralize(*files, "static file"))]
        }
    }
}

/// Print a build event to stdout.
pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

/// Format the closing summary of a build run.
pub fn format_build_summary(summary: &BuildSummary) -> String {
    format!(
        "Built {}, {}, {}",
        pluralize(summary.pages, "page"),
        pluralize(summary.sections, "section"),
        pluralize(summary.static_files, "static file"),
    )
}

/// Print the build summary to stdout.
pub fn print_build_summary(summary: &BuildSummary) {
    println!("{}", format_build_summary(summary));
}

// ============================================================================
// Check output
// ============================================================================

/// Format the closing line of a check run.
pub fn format_check_report(report: &CheckReport) -> String {
    format!(
        "Checked {}, {}",
        pluralize(report.pages, "page"),
        pluralize(report.sections, "section"),
    )
}

/// Print the check report to stdout.
pub fn print_check_report(report: &CheckReport) {
    println!("{}", format_check_report(report));
}

// ============================================================================
// Tests
// ============================================================================
