//! Front matter extraction for content files.
//!
//! A content file opens with a metadata header: a delimiter marker, the
//! fields of a JSON object (without the outer braces), and the delimiter
//! again. Everything after the second delimiter is the markdown body.
//!
//! ```text
//! +++
//! "Title": "First post",
//! "Date": "1-3-2024"
//! +++
//!
//! Body text starts here.
//! ```
//!
//! The parser returns the byte offset where the body begins instead of
//! copying the body, so callers slice the original source exactly once.
//! The delimiter comes from site configuration and defaults to `+++`.

use serde_json::{Map, Value};
use thiserror::Error;

/// Parsed metadata header: field name to JSON value.
///
/// Values stay as [`serde_json::Value`] all the way to the sort and
/// template boundaries, which apply checked conversions and report typed
/// errors there rather than assuming shapes here.
pub type FrontMatter = Map<String, Value>;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    /// The delimiter was absent, or appeared only once. A lone delimiter
    /// is an error, never a signal to treat the rest of the file as body.
    #[error("front matter delimiter {0:?} must appear twice")]
    MissingDelimiter(String),
    #[error("front matter is not a valid JSON object: {0}")]
    InvalidFrontMatter(#[from] serde_json::Error),
}

/// A successfully parsed header and the body position that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrontMatter {
    pub data: FrontMatter,
    /// Byte index one past the second delimiter occurrence. The markdown
    /// body is `&source[body_offset..]`.
    pub body_offset: usize,
}

/// Extract the front matter block from `source`.
///
/// The text strictly between the first two occurrences of `delimiter`,
/// wrapped in `{` `}`, must parse as a single JSON object. Bytes before
/// the first occurrence are ignored; occurrences after the second belong
/// to the body.
pub fn parse(source: &str, delimiter: &str) -> Result<ParsedFrontMatter, FrontMatterError> {
    let missing = || FrontMatterError::MissingDelimiter(delimiter.to_string());
    let first = source.find(delimiter).ok_or_else(missing)?;
    let header_start = first + delimiter.len();
    let second = source[header_start..]
        .find(delimiter)
        .map(|rel| header_start + rel)
        .ok_or_else(missing)?;

    let wrapped = format!("{{{}}}", &source[header_start..second]);
    let data: FrontMatter = serde_json::from_str(&wrapped)?;

    Ok(ParsedFrontMatter {
        data,
        body_offset: second + delimiter.len(),
    })
}
