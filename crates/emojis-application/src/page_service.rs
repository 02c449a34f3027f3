//! Use cases behind a category page: run a page query, render its rows, and
//! change an emoji's status.

use emojis_core::emoji::{Emoji, EmojiRepository, EmojiStatus};
use emojis_core::error::Result;
use emojis_core::page::{self, PageData, PageQuery, PageStateRepository, PageStates};
use emojis_core::transition::{self, StatusAction};
use serde::Serialize;
use std::sync::Arc;

/// One table row of a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiRow {
    pub name: String,
    pub image_url: String,
    pub status: EmojiStatus,
    /// Favorites are shown highlighted.
    pub highlighted: bool,
    /// Status changes offered for this row on this page.
    pub actions: Vec<StatusAction>,
}

/// A rendered category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiPage {
    pub category: EmojiStatus,
    pub title: &'static str,
    pub rows: Vec<EmojiRow>,
    /// Matches across all pages.
    pub count: usize,
    /// 0-based.
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub search_text: Option<String>,
}

impl EmojiPage {
    fn render(query: &PageQuery, data: PageData<Emoji>) -> Self {
        let total_pages = data.total_pages(query.page_size);
        let rows = data
            .items
            .into_iter()
            .map(|emoji| EmojiRow {
                highlighted: transition::is_highlighted(emoji.status),
                actions: transition::allowed_actions(emoji.status, query.category).to_vec(),
                name: emoji.name,
                image_url: emoji.image_url,
                status: emoji.status,
            })
            .collect();

        Self {
            category: query.category,
            title: query.category.page_title(),
            rows,
            count: data.count,
            page_index: query.page_number.saturating_sub(1),
            page_size: query.page_size,
            total_pages,
            search_text: query.search_text.clone(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.name.as_str()).collect()
    }
}

/// Application service over the emoji and page state repositories.
#[derive(Clone)]
pub struct EmojiPageService {
    emojis: Arc<dyn EmojiRepository>,
    page_states: Arc<dyn PageStateRepository>,
}

impl EmojiPageService {
    pub fn new(
        emojis: Arc<dyn EmojiRepository>,
        page_states: Arc<dyn PageStateRepository>,
    ) -> Self {
        Self {
            emojis,
            page_states,
        }
    }

    /// Answers a page query against the store, populating it first if needed.
    pub async fn page(&self, query: &PageQuery) -> Result<EmojiPage> {
        let all = self.emojis.load_all().await?;
        let data = page::query(&all, query)?;
        tracing::debug!(
            category = %query.category,
            page = query.page_number,
            size = query.page_size,
            count = data.count,
            "Answered page query"
        );
        Ok(EmojiPage::render(query, data))
    }

    /// Moves `name` to `target`. Returns `None` when no emoji has that name.
    pub async fn change_status(&self, name: &str, target: EmojiStatus) -> Result<Option<Emoji>> {
        self.emojis.set_status(name, target).await
    }

    pub async fn load_page_states(&self) -> Result<PageStates> {
        self.page_states.load().await
    }

    pub async fn save_page_states(&self, states: &PageStates) -> Result<()> {
        self.page_states.save(states).await
    }

    /// Forgets the cached emoji list and resets every category page.
    pub async fn reset(&self, default_page_size: usize) -> Result<()> {
        self.emojis.reset().await?;
        self.page_states
            .save(&PageStates::with_page_size(default_page_size))
            .await
    }
}
