//! Which status changes a row offers, depending on the page it is shown on.

use serde::Serialize;

use crate::emoji::EmojiStatus;

/// Visual emphasis of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTone {
    Accent,
    Primary,
    Plain,
}

/// A row action moving an emoji to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusAction {
    pub target: EmojiStatus,
    pub label: &'static str,
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub tone: ActionTone,
}

const ADD_TO_FAVORITES: StatusAction = StatusAction {
    target: EmojiStatus::Favorite,
    label: "fav",
    icon: "favorite_border",
    tooltip: "Add to favorites",
    tone: ActionTone::Accent,
};

const REMOVE_FROM_FAVORITES: StatusAction = StatusAction {
    target: EmojiStatus::General,
    label: "unfav",
    icon: "favorite",
    tooltip: "Remove from favorites",
    tone: ActionTone::Accent,
};

const REMOVE: StatusAction = StatusAction {
    target: EmojiStatus::Removed,
    label: "rm",
    icon: "clear",
    tooltip: "Remove",
    tone: ActionTone::Plain,
};

const RESTORE: StatusAction = StatusAction {
    target: EmojiStatus::General,
    label: "restore",
    icon: "settings_backup_restore",
    tooltip: "Restore",
    tone: ActionTone::Primary,
};

/// Actions offered for an emoji with `status` while `viewing` a category page,
/// in display order.
///
/// Combinations that cannot appear on a page (a removed emoji on the general
/// page, for instance) offer nothing.
pub fn allowed_actions(status: EmojiStatus, viewing: EmojiStatus) -> &'static [StatusAction] {
    match (viewing, status) {
        (EmojiStatus::General, EmojiStatus::General) => &[ADD_TO_FAVORITES, REMOVE],
        (EmojiStatus::General, EmojiStatus::Favorite) => &[REMOVE_FROM_FAVORITES, REMOVE],
        (EmojiStatus::Favorite, EmojiStatus::Favorite) => &[REMOVE_FROM_FAVORITES],
        (EmojiStatus::Removed, EmojiStatus::Removed) => &[RESTORE],
        _ => &[],
    }
}

/// Whether the preview of an emoji is rendered highlighted.
pub fn is_highlighted(status: EmojiStatus) -> bool {
    status == EmojiStatus::Favorite
}
