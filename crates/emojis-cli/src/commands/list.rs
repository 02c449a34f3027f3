use anyhow::Result;
use clap::Args;
use emojis_core::page::{IssuedQuery, PageEvent, PageView};
use emojis_core::route;

use super::app::App;
use super::render;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Category to show (general, favorite or removed)
    #[arg(short, long, default_value = "general")]
    pub category: String,

    /// 1-based page number
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Page size (10, 20, 30 or 40)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Case-insensitive name filter; an empty value clears it
    #[arg(short = 'q', long)]
    pub search: Option<String>,
}

pub async fn run(app: &App, args: ListArgs) -> Result<()> {
    let mut view = PageView::new(app.service.load_page_states().await?);

    let (category, redirected) = route::resolve_param(&args.category);
    if redirected {
        render::notice(&format!(
            "Unknown category '{}', showing {}",
            args.category,
            route::category_path(category)
        ));
    }

    let issued = apply(&mut view, category, &args)?;
    app.service.save_page_states(view.pages()).await?;

    let page = app.service.page(&issued.query).await?;
    render::page(&page);
    Ok(())
}

/// Feeds the requested changes through the page reducer and returns the last
/// query it issued.
fn apply(
    view: &mut PageView,
    category: emojis_core::EmojiStatus,
    args: &ListArgs,
) -> emojis_core::Result<IssuedQuery> {
    let mut issued = view.update(PageEvent::Navigate(category))?.query;

    // A new search resets the page index, so it goes before pagination.
    if let Some(search) = &args.search {
        issued = view
            .update(PageEvent::SearchSettled(search.clone()))?
            .query
            .or(issued);
    }

    if args.page.is_some() || args.size.is_some() {
        let current = view.current();
        let page_index = match args.page {
            Some(page) => page.checked_sub(1).ok_or_else(|| {
                emojis_core::EmojisError::invalid_argument("page numbers start at 1")
            })?,
            None => current.page_index,
        };
        let page_size = args.size.unwrap_or(current.page_size);
        issued = view
            .update(PageEvent::Paginate {
                page_index,
                page_size,
            })?
            .query
            .or(issued);
    }

    issued.ok_or_else(|| emojis_core::EmojisError::internal("no page query issued"))
}
