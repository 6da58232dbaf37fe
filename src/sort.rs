//! Ordering of page collections for listings.
//!
//! Templates hand a [`PageCollection`] plus a field name to [`sort`] and
//! get back pages in display order, each with its URL injected under the
//! reserved `Link` field. Two comparison semantics exist:
//!
//! - the reserved key `Date` parses every value as a day-month-year date
//!   (`1-3-2024`, `15-02-2024`) and orders chronologically;
//! - any other key compares values as strings.
//!
//! All keys are extracted and type-checked before the sort begins, so a
//! bad value fails the build with the page's URL and the offending value
//! rather than surfacing mid-comparison. The sort is stable in both
//! directions: equal keys keep the collection's URL order, and descending
//! order comes from a reversed comparator, never from reversing the
//! sorted result.

use crate::frontmatter::FrontMatter;
use crate::pages::PageCollection;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

/// Field injected into every sorted page, holding its site-absolute URL.
/// Reserved: an author-supplied value of the same name is overwritten.
pub const LINK_KEY: &str = "Link";

/// Sort key that switches comparison to date semantics.
pub const DATE_KEY: &str = "Date";

/// Day-month-year with one- or two-digit day and month.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Error, Debug)]
pub enum SortError {
    #[error("page {link}: sort field {field:?} is {found}, expected a string")]
    TypeMismatch {
        link: String,
        field: String,
        found: &'static str,
    },
    #[error("page {link}: cannot parse {value:?} as a day-month-year date: {source}")]
    DateParse {
        link: String,
        value: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Date(NaiveDate),
    Text(String),
}

/// Order `pages` by the front matter field `key`, ascending unless
/// `descending`. Returns the pages (not just their URLs) so templates can
/// render titles and dates straight off the result.
pub fn sort(
    pages: &PageCollection,
    key: &str,
    descending: bool,
) -> Result<Vec<FrontMatter>, SortError> {
    let mut entries: Vec<(SortKey, FrontMatter)> = Vec::with_capacity(pages.len());
    for (url, data) in pages {
        let mut page = data.clone();
        page.insert(LINK_KEY.to_string(), Value::String(url.clone()));
        let sort_key = extract_key(url, &page, key)?;
        entries.push((sort_key, page));
    }

    if descending {
        entries.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    }

    Ok(entries.into_iter().map(|(_, page)| page).collect())
}

fn extract_key(url: &str, page: &FrontMatter, key: &str) -> Result<SortKey, SortError> {
    let value = page.get(key);
    let text = value.and_then(Value::as_str).ok_or_else(|| SortError::TypeMismatch {
        link: url.to_string(),
        field: key.to_string(),
        found: value_kind(value),
    })?;

    if key == DATE_KEY {
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|source| {
            SortError::DateParse {
                link: url.to_string(),
                value: text.to_string(),
                source,
            }
        })?;
        Ok(SortKey::Date(date))
    } else {
        Ok(SortKey::Text(text.to_string()))
    }
}

fn value_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "a list",
        Some(Value::Object(_)) => "an object",
    }
}
