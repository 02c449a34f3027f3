pub mod page_service;
pub mod page_session;

pub use page_service::{EmojiPage, EmojiPageService, EmojiRow};
pub use page_session::{
    PageCommand, PageSession, PageSessionHandle, SessionConfig, SessionSnapshot, ViewStatus,
};
