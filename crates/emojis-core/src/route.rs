//! Route resolution for category pages.
//!
//! Category pages live under `emojis/<status>`. Anything else, including an
//! unknown status, redirects to the general page instead of failing.

use serde::Serialize;

use crate::emoji::EmojiStatus;

/// Path prefix of all category pages.
pub const EMOJIS_PATH: &str = "emojis";

/// A navigation menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuLink {
    pub category: EmojiStatus,
    pub label: &'static str,
}

impl MenuLink {
    pub fn path(&self) -> String {
        category_path(self.category)
    }
}

/// Menu entries in display order.
pub const MENU_LINKS: [MenuLink; 3] = [
    MenuLink {
        category: EmojiStatus::General,
        label: "All",
    },
    MenuLink {
        category: EmojiStatus::Favorite,
        label: "Favorites",
    },
    MenuLink {
        category: EmojiStatus::Removed,
        label: "Removed",
    },
];

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Show the page of this category.
    Category(EmojiStatus),
    /// Navigate to this path instead.
    Redirect(String),
}

/// Canonical path of a category page.
pub fn category_path(category: EmojiStatus) -> String {
    format!("{}/{}", EMOJIS_PATH, category)
}

/// Resolves a category route parameter, falling back to the general category.
///
/// Returns the category and whether a redirect was needed.
pub fn resolve_param(param: &str) -> (EmojiStatus, bool) {
    match EmojiStatus::from_param(param) {
        Some(category) => (category, false),
        None => (EmojiStatus::General, true),
    }
}

/// Resolves an application path such as `emojis/favorite`.
pub fn resolve_route(path: &str) -> Route {
    let trimmed = path.trim_matches('/');
    let mut segments = trimmed.split('/');

    match (segments.next(), segments.next(), segments.next()) {
        (Some(EMOJIS_PATH), Some(param), None) => match EmojiStatus::from_param(param) {
            Some(category) => Route::Category(category),
            None => Route::Redirect(category_path(EmojiStatus::General)),
        },
        _ => Route::Redirect(category_path(EmojiStatus::General)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_category_routes() {
        assert_eq!(
            resolve_route("emojis/favorite"),
            Route::Category(EmojiStatus::Favorite)
        );
        assert_eq!(
            resolve_route("/emojis/removed/"),
            Route::Category(EmojiStatus::Removed)
        );
    }

    #[test]
    fn test_invalid_routes_redirect_to_general() {
        for path in ["", "/", "emojis", "emojis/unknown", "emojis/General", "other/x", "emojis/general/extra"] {
            assert_eq!(
                resolve_route(path),
                Route::Redirect("emojis/general".to_string()),
                "path {path:?}"
            );
        }
    }

    #[test]
    fn test_resolve_param() {
        assert_eq!(resolve_param("removed"), (EmojiStatus::Removed, false));
        assert_eq!(resolve_param("trash"), (EmojiStatus::General, true));
    }

    #[test]
    fn test_menu_labels_match_page_titles() {
        for link in MENU_LINKS {
            assert_eq!(link.label, link.category.page_title());
            assert!(link.path().ends_with(link.category.as_ref()));
        }
    }
}
