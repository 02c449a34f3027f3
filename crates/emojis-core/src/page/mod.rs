//! Category pages: the filter/paginate query, the persisted per-category page
//! state, and the reducer that turns user input into queries.

pub mod query;
pub mod repository;
pub mod state;
pub mod view;

pub use query::{PageData, PageQuery, query};
pub use repository::PageStateRepository;
pub use state::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PageState, PageStates};
pub use view::{Controls, IssuedQuery, PageEvent, PageView, Transition};
