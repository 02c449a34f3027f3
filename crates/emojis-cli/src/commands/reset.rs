use anyhow::Result;
use colored::Colorize;

use super::app::App;

pub async fn run(app: &App) -> Result<()> {
    app.service.reset(app.config.view.default_page_size).await?;
    println!(
        "{}",
        "Cached catalogue and page state cleared. The next listing fetches from GitHub.".green()
    );
    Ok(())
}
