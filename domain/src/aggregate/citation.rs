//! Citations: compact source pointers surfaced next to an answer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::records::{as_text, first_truthy};
use crate::util::truncate_chars;

/// Citations taken from one task.
pub const MAX_CITATIONS_PER_TASK: usize = 5;

/// Preview length, in characters.
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// 1-based position within its task
    pub chunk_id: usize,
    /// Link, or the item's title when it has none
    pub source: String,
    pub content_preview: String,
}

impl Citation {
    /// Build a citation from one item of a payload or a normalized record.
    pub fn from_item(chunk_id: usize, item: &Map<String, Value>) -> Self {
        let title = first_truthy(item, &["title", "key", "name", "message"])
            .map(as_text)
            .unwrap_or_else(|| "item".to_string());
        let locator = first_truthy(item, &["html_url", "url", "self"])
            .map(as_text)
            .unwrap_or_default();

        let source = if locator.is_empty() { title } else { locator };
        let preview = preview_of(item);

        Self {
            chunk_id,
            source,
            content_preview: truncate_chars(&preview, PREVIEW_CHARS).to_string(),
        }
    }
}

/// `body` text, else `fields.summary`, else `commit.message`.
fn preview_of(item: &Map<String, Value>) -> String {
    let nested = |outer: &str, inner: &str| {
        item.get(outer)
            .and_then(Value::as_object)
            .and_then(|o| first_truthy(o, &[inner]))
            .map(as_text)
    };

    item.get("body")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| nested("fields", "summary"))
        .or_else(|| nested("commit", "message"))
        .unwrap_or_default()
}

/// Up to [`MAX_CITATIONS_PER_TASK`] citations, numbered from 1.
pub fn citations_for<'a, I>(items: I) -> Vec<Citation>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    items
        .into_iter()
        .take(MAX_CITATIONS_PER_TASK)
        .enumerate()
        .map(|(i, item)| Citation::from_item(i + 1, item))
        .collect()
}
