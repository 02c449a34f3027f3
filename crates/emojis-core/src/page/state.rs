//! Per-category page state that survives restarts.

use serde::{Deserialize, Serialize};

use crate::emoji::EmojiStatus;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 30, 40];

/// Page size used when nothing else is configured or persisted.
pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZE_OPTIONS[1];

/// Paginator position and search text of one category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// Items per page.
    pub page_size: usize,
    /// 0-based index of the current page.
    pub page_index: usize,
    /// Search box content. `None` and `Some("")` both mean "no search".
    pub search_text: Option<String>,
}

impl PageState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            page_index: 0,
            search_text: Some(String::new()),
        }
    }

    /// Whether the page size is one the selector offers.
    pub fn has_valid_page_size(&self) -> bool {
        PAGE_SIZE_OPTIONS.contains(&self.page_size)
    }

    /// Search text with `None` folded into the empty string.
    pub fn search(&self) -> &str {
        self.search_text.as_deref().unwrap_or("")
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// One `PageState` for every category.
///
/// Serialized as `{ "general": {..}, "favorite": {..}, "removed": {..} }` and
/// always persisted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageStates {
    pub general: PageState,
    pub favorite: PageState,
    pub removed: PageState,
}

impl PageStates {
    /// Every category starts on the first page with the given size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            general: PageState::with_page_size(page_size),
            favorite: PageState::with_page_size(page_size),
            removed: PageState::with_page_size(page_size),
        }
    }

    /// Resets every category whose page size is not a selector option to a
    /// fresh state with `page_size`. Returns the categories that were reset.
    pub fn repair(&mut self, page_size: usize) -> Vec<EmojiStatus> {
        EmojiStatus::ALL
            .into_iter()
            .filter(|&category| {
                let state = self.get_mut(category);
                if state.has_valid_page_size() {
                    return false;
                }
                *state = PageState::with_page_size(page_size);
                true
            })
            .collect()
    }

    pub fn get(&self, category: EmojiStatus) -> &PageState {
        match category {
            EmojiStatus::General => &self.general,
            EmojiStatus::Favorite => &self.favorite,
            EmojiStatus::Removed => &self.removed,
        }
    }

    pub fn get_mut(&mut self, category: EmojiStatus) -> &mut PageState {
        match category {
            EmojiStatus::General => &mut self.general,
            EmojiStatus::Favorite => &mut self.favorite,
            EmojiStatus::Removed => &mut self.removed,
        }
    }
}
