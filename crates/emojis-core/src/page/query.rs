//! Client-side filtering and pagination over the in-memory emoji list.

use serde::{Deserialize, Serialize};

use crate::emoji::{Emoji, EmojiStatus};
use crate::error::{EmojisError, Result};

/// Parameters of a single page lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Category page being displayed.
    pub category: EmojiStatus,
    /// Optional case-insensitive name filter. Empty means no filter.
    pub search_text: Option<String>,
    /// Number of items per page. Must be positive.
    pub page_size: usize,
    /// 1-based page number. Must be positive.
    pub page_number: usize,
}

impl PageQuery {
    pub fn new(category: EmojiStatus, page_size: usize, page_number: usize) -> Self {
        Self {
            category,
            search_text: None,
            page_size,
            page_number,
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = Some(search_text.into());
        self
    }

    /// The effective search needle, lowercased, or `None` when not searching.
    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}

/// One page of results plus the number of matches before slicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> PageData<T> {
    /// Number of pages needed to show `count` items at `page_size` per page.
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(page_size)
    }
}

/// Selects the requested page from `all`.
///
/// The category filter runs first, then the search filter, then the slice
/// `[page_size * (page_number - 1), page_size * page_number)`. Store order is
/// preserved; there is no sort step. A page past the end yields no items but
/// the full match count.
pub fn query(all: &[Emoji], request: &PageQuery) -> Result<PageData<Emoji>> {
    if request.page_size == 0 {
        return Err(EmojisError::invalid_argument("page size must be positive"));
    }
    if request.page_number == 0 {
        return Err(EmojisError::invalid_argument(
            "page number is 1-based and must be positive",
        ));
    }

    let needle = request.needle();
    let matching: Vec<&Emoji> = all
        .iter()
        .filter(|emoji| request.category.shows(emoji.status))
        .filter(|emoji| match &needle {
            Some(needle) => emoji.name_contains(needle),
            None => true,
        })
        .collect();

    let count = matching.len();
    let start = request.page_size.saturating_mul(request.page_number - 1);
    let items = matching
        .into_iter()
        .skip(start)
        .take(request.page_size)
        .cloned()
        .collect();

    Ok(PageData { items, count })
}
