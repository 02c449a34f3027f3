use anyhow::Result;
use colored::Colorize;
use emojis_core::{EmojiStatus, EmojisError};

use super::app::App;

pub async fn run(app: &App, name: &str, target: EmojiStatus) -> Result<()> {
    match app.service.change_status(name, target).await? {
        Some(emoji) => {
            println!(
                "{} {} → {}",
                "✓".green(),
                emoji.name.bold(),
                emoji.status.as_ref().bright_cyan()
            );
            Ok(())
        }
        None => Err(EmojisError::not_found("emoji", name).into()),
    }
}
