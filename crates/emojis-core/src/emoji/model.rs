//! Emoji domain models.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Classification of an emoji. Every emoji carries exactly one status.
///
/// The lowercase string form (`general`, `favorite`, `removed`) doubles as the
/// route parameter selecting a category page and as the key of the persisted
/// page state map.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmojiStatus {
    #[default]
    General,
    Favorite,
    Removed,
}

impl EmojiStatus {
    /// All statuses in menu order.
    pub const ALL: [EmojiStatus; 3] = [Self::General, Self::Favorite, Self::Removed];

    /// Parses a route parameter. Only the exact lowercase names are accepted.
    pub fn from_param(param: &str) -> Option<Self> {
        param.parse().ok()
    }

    /// Whether an emoji with `status` is listed on the page of this category.
    ///
    /// The general page keeps favorites visible; the other two pages only list
    /// their own status.
    pub fn shows(self, status: EmojiStatus) -> bool {
        match self {
            Self::General => matches!(status, Self::General | Self::Favorite),
            Self::Favorite => status == Self::Favorite,
            Self::Removed => status == Self::Removed,
        }
    }

    /// Human-readable page title for this category.
    pub fn page_title(self) -> &'static str {
        match self {
            Self::General => "All",
            Self::Favorite => "Favorites",
            Self::Removed => "Removed",
        }
    }
}

/// A single emoji record. `name` is the natural key and is unique in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    pub name: String,
    pub image_url: String,
    pub status: EmojiStatus,
}

impl Emoji {
    /// Creates a record with the initial `General` status.
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            status: EmojiStatus::General,
        }
    }

    /// Builder-style status override, mostly useful for fixtures.
    pub fn with_status(mut self, status: EmojiStatus) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive substring match against the name.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}
