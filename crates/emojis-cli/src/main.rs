use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "emojis")]
#[command(about = "Browse, search and sort the GitHub emoji catalogue", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory holding config.toml, secret.json and storage/
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Keep statuses and page state in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of a category
    List(commands::list::ListArgs),
    /// Add an emoji to the favorites
    Favorite {
        /// Emoji name; names such as `-1` are accepted as-is
        #[arg(allow_hyphen_values = true)]
        name: String,
    },
    /// Move an emoji to the removed list
    Remove {
        /// Emoji name; names such as `-1` are accepted as-is
        #[arg(allow_hyphen_values = true)]
        name: String,
    },
    /// Move an emoji back to the general list
    Restore {
        /// Emoji name; names such as `-1` are accepted as-is
        #[arg(allow_hyphen_values = true)]
        name: String,
    },
    /// Forget the cached catalogue and all page state
    Reset,
    /// Interactive browser
    Browse {
        /// Category to open (general, favorite or removed)
        #[arg(default_value = "general")]
        category: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let app = commands::app::App::bootstrap(&cli.global)?;

    match cli.command {
        Commands::List(args) => commands::list::run(&app, args).await?,
        Commands::Favorite { name } => {
            commands::status::run(&app, &name, emojis_core::EmojiStatus::Favorite).await?
        }
        Commands::Remove { name } => {
            commands::status::run(&app, &name, emojis_core::EmojiStatus::Removed).await?
        }
        Commands::Restore { name } => {
            commands::status::run(&app, &name, emojis_core::EmojiStatus::General).await?
        }
        Commands::Reset => commands::reset::run(&app).await?,
        Commands::Browse { category } => commands::browse::run(&app, category).await?,
    }

    Ok(())
}
