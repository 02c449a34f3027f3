//! The page view reducer.
//!
//! Route changes, paginator changes, settled search input, and reload requests
//! all funnel into [`PageView::update`]. Each call returns a [`Transition`]
//! saying what the UI controls should display and which query, if any, must
//! be run. Issued queries carry a generation number; only the result of the
//! latest generation may be rendered.

use crate::emoji::EmojiStatus;
use crate::error::{EmojisError, Result};
use crate::page::query::PageQuery;
use crate::page::state::{PAGE_SIZE_OPTIONS, PageState, PageStates};

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The route now points at another (or the same) category.
    Navigate(EmojiStatus),
    /// The paginator moved or its page size changed.
    Paginate { page_index: usize, page_size: usize },
    /// The search box settled on a value after debouncing.
    SearchSettled(String),
    /// Data changed underneath the view; run the current query again.
    Reload,
}

/// Values the paginator and search box must display after a category switch.
///
/// These are pushed into the controls directly and must never be fed back as
/// `Paginate` or `SearchSettled` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub category: EmojiStatus,
    pub page_index: usize,
    pub page_size: usize,
    pub search_text: String,
}

/// A query stamped with the generation it was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQuery {
    pub generation: u64,
    pub query: PageQuery,
}

/// Output of a single reducer step.
///
/// Whenever `query` is set the caller must persist [`PageView::pages`] before
/// running it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    pub controls: Option<Controls>,
    pub query: Option<IssuedQuery>,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.controls.is_none() && self.query.is_none()
    }
}

/// Reducer state: the displayed category, every category's page state, and the
/// generation of the last issued query.
#[derive(Debug, Clone)]
pub struct PageView {
    category: EmojiStatus,
    pages: PageStates,
    generation: u64,
}

impl PageView {
    /// Starts on the general category with the given persisted states.
    /// No query is issued until the first event.
    pub fn new(pages: PageStates) -> Self {
        Self {
            category: EmojiStatus::General,
            pages,
            generation: 0,
        }
    }

    pub fn category(&self) -> EmojiStatus {
        self.category
    }

    pub fn pages(&self) -> &PageStates {
        &self.pages
    }

    pub fn current(&self) -> &PageState {
        self.pages.get(self.category)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a result produced for `generation` may still be shown.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Applies one event.
    pub fn update(&mut self, event: PageEvent) -> Result<Transition> {
        match event {
            PageEvent::Navigate(category) => {
                self.category = category;
                let state = self.current();
                let controls = Controls {
                    category,
                    page_index: state.page_index,
                    page_size: state.page_size,
                    search_text: state.search().to_string(),
                };
                Ok(Transition {
                    controls: Some(controls),
                    query: Some(self.issue()),
                })
            }
            PageEvent::Paginate {
                page_index,
                page_size,
            } => {
                if !PAGE_SIZE_OPTIONS.contains(&page_size) {
                    return Err(EmojisError::invalid_argument(format!(
                        "page size {} is not one of {:?}",
                        page_size, PAGE_SIZE_OPTIONS
                    )));
                }
                let state = self.pages.get_mut(self.category);
                state.page_index = page_index;
                state.page_size = page_size;
                Ok(self.query_only())
            }
            PageEvent::SearchSettled(text) => {
                if self.current().search() == text {
                    return Ok(Transition::default());
                }
                let state = self.pages.get_mut(self.category);
                state.search_text = Some(text);
                state.page_index = 0;
                Ok(self.query_only())
            }
            PageEvent::Reload => Ok(self.query_only()),
        }
    }

    fn query_only(&mut self) -> Transition {
        Transition {
            controls: None,
            query: Some(self.issue()),
        }
    }

    fn issue(&mut self) -> IssuedQuery {
        self.generation += 1;
        let state = self.current();
        let search = state.search();
        IssuedQuery {
            generation: self.generation,
            query: PageQuery {
                category: self.category,
                search_text: (!search.is_empty()).then(|| search.to_string()),
                page_size: state.page_size,
                page_number: state.page_index.saturating_add(1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued(transition: &Transition) -> &PageQuery {
        &transition.query.as_ref().expect("query issued").query
    }

    #[test]
    fn test_navigate_restores_controls_and_queries() {
        let mut pages = PageStates::default();
        pages.favorite = PageState {
            page_size: 30,
            page_index: 2,
            search_text: Some("cat".to_string()),
        };
        let mut view = PageView::new(pages);

        let transition = view.update(PageEvent::Navigate(EmojiStatus::Favorite)).unwrap();

        let controls = transition.controls.clone().unwrap();
        assert_eq!(controls.page_index, 2);
        assert_eq!(controls.page_size, 30);
        assert_eq!(controls.search_text, "cat");

        let query = issued(&transition);
        assert_eq!(query.category, EmojiStatus::Favorite);
        assert_eq!(query.page_number, 3);
        assert_eq!(query.search_text.as_deref(), Some("cat"));
    }

    #[test]
    fn test_switching_categories_keeps_each_state() {
        let mut view = PageView::new(PageStates::default());
        view.update(PageEvent::Navigate(EmojiStatus::General)).unwrap();
        view.update(PageEvent::Paginate {
            page_index: 4,
            page_size: 10,
        })
        .unwrap();
        view.update(PageEvent::SearchSettled("sm".to_string())).unwrap();
        view.update(PageEvent::Paginate {
            page_index: 1,
            page_size: 10,
        })
        .unwrap();
        let before = view.current().clone();

        view.update(PageEvent::Navigate(EmojiStatus::Favorite)).unwrap();
        view.update(PageEvent::Paginate {
            page_index: 3,
            page_size: 40,
        })
        .unwrap();
        let transition = view.update(PageEvent::Navigate(EmojiStatus::General)).unwrap();

        assert_eq!(view.current(), &before);
        let controls = transition.controls.unwrap();
        assert_eq!(controls.page_index, 1);
        assert_eq!(controls.page_size, 10);
        assert_eq!(controls.search_text, "sm");
        assert_eq!(view.pages().favorite.page_index, 3);
    }

    #[test]
    fn test_search_resets_to_first_page_with_one_query() {
        let mut view = PageView::new(PageStates::default());
        view.update(PageEvent::Navigate(EmojiStatus::General)).unwrap();
        view.update(PageEvent::Paginate {
            page_index: 5,
            page_size: 20,
        })
        .unwrap();
        let before = view.generation();

        let transition = view.update(PageEvent::SearchSettled("heart".to_string())).unwrap();

        assert_eq!(view.generation(), before + 1);
        assert!(transition.controls.is_none());
        let query = issued(&transition);
        assert_eq!(query.page_number, 1);
        assert_eq!(query.search_text.as_deref(), Some("heart"));
        assert_eq!(view.current().page_index, 0);
    }

    #[test]
    fn test_repeated_search_value_is_ignored() {
        let mut view = PageView::new(PageStates::default());
        view.update(PageEvent::Navigate(EmojiStatus::General)).unwrap();
        view.update(PageEvent::SearchSettled("x".to_string())).unwrap();
        let generation = view.generation();

        let transition = view.update(PageEvent::SearchSettled("x".to_string())).unwrap();

        assert!(transition.is_noop());
        assert_eq!(view.generation(), generation);
    }

    #[test]
    fn test_clearing_search_sends_no_filter() {
        let mut view = PageView::new(PageStates::default());
        view.update(PageEvent::SearchSettled("x".to_string())).unwrap();
        let transition = view.update(PageEvent::SearchSettled(String::new())).unwrap();
        assert_eq!(issued(&transition).search_text, None);
    }

    #[test]
    fn test_reload_reissues_same_query_with_new_generation() {
        let mut view = PageView::new(PageStates::default());
        let first = view.update(PageEvent::Navigate(EmojiStatus::Removed)).unwrap();
        let reload = view.update(PageEvent::Reload).unwrap();

        assert_eq!(issued(&first), issued(&reload));
        let first_generation = first.query.unwrap().generation;
        assert!(!view.is_current(first_generation));
        assert!(view.is_current(reload.query.unwrap().generation));
    }

    #[test]
    fn test_paginate_rejects_unknown_page_size() {
        let mut view = PageView::new(PageStates::default());
        let err = view
            .update(PageEvent::Paginate {
                page_index: 0,
                page_size: 0,
            })
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = view
            .update(PageEvent::Paginate {
                page_index: 0,
                page_size: 25,
            })
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(view.current().page_size, 20);
    }

    #[test]
    fn test_last_possible_page_index_does_not_overflow() {
        let mut pages = PageStates::default();
        pages.general.page_index = usize::MAX;
        let mut view = PageView::new(pages);

        let transition = view.update(PageEvent::Navigate(EmojiStatus::General)).unwrap();

        assert_eq!(issued(&transition).page_number, usize::MAX);
    }
}
