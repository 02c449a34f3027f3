use colored::Colorize;
use emojis_application::{EmojiPage, EmojiRow};
use emojis_core::route::{self, MENU_LINKS};
use emojis_core::transition::{ActionTone, StatusAction};

pub fn page(page: &EmojiPage) {
    println!("{}", menu(page).bold());
    println!(
        "{} {}",
        page.title.bright_magenta().bold(),
        route::category_path(page.category).bright_black()
    );

    if page.rows.is_empty() {
        println!("{}", "  (nothing here)".bright_black());
    }

    let width = page
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);
    for row in &page.rows {
        println!("{}", table_row(row, width));
    }

    println!("{}", footer(page).bright_black());
}

fn menu(page: &EmojiPage) -> String {
    MENU_LINKS
        .iter()
        .map(|link| {
            if link.category == page.category {
                format!("[{}]", link.label)
            } else {
                format!(" {} ", link.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_row(row: &EmojiRow, width: usize) -> String {
    let marker = if row.highlighted {
        "★".yellow().to_string()
    } else {
        " ".to_string()
    };
    let actions = row
        .actions
        .iter()
        .map(action)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} {:<width$}  {}  {}",
        marker,
        row.name,
        actions,
        row.image_url.bright_black(),
        width = width
    )
}

fn action(action: &StatusAction) -> String {
    let label = format!("[{}]", action.label);
    match action.tone {
        ActionTone::Accent => label.bright_yellow().to_string(),
        ActionTone::Primary => label.bright_cyan().to_string(),
        ActionTone::Plain => label.normal().to_string(),
    }
}

/// `page 2/5 · 93 emojis · size 20 · search "cat"`
pub fn footer(page: &EmojiPage) -> String {
    let mut footer = format!(
        "page {}/{} · {} emojis · size {}",
        page.page_index + 1,
        page.total_pages.max(1),
        page.count,
        page.page_size
    );
    if let Some(search) = &page.search_text {
        footer.push_str(&format!(" · search \"{}\"", search));
    }
    footer
}

pub fn notice(message: &str) {
    println!("{}", message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", format!("Error: {}", message).red());
}
