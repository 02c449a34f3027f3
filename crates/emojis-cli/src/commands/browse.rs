//! Interactive browser on top of a [`PageSession`].
//!
//! The prompt loop only sends commands; a separate task watches the session
//! and prints the page each time it settles.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use emojis_application::{
    PageCommand, PageSession, SessionConfig, SessionSnapshot, ViewStatus,
};
use emojis_core::EmojiStatus;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::watch;

use super::app::App;
use super::render;

const COMMANDS: [&str; 10] = [
    "go", "page", "size", "search", "fav", "unfav", "rm", "restore", "help", "quit",
];

const HELP: &str = "\
go <general|favorite|removed>   switch category
page <n>                        jump to page n (1-based)
size <10|20|30|40>              change page size
search [text]                   filter by name; no text clears the filter
fav|unfav|rm|restore <name>     change an emoji's status
help                            show this text
quit                            leave";

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplInput {
    Session(PageCommand),
    Page(usize),
    Size(usize),
    Help,
    Quit,
}

fn parse_line(line: &str) -> std::result::Result<ReplInput, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let number = |what: &str| {
        rest.parse::<usize>()
            .map_err(|_| format!("{} expects a number, got '{}'", what, rest))
    };
    let name = || {
        if rest.is_empty() {
            Err(format!("{} expects an emoji name", verb))
        } else {
            Ok(rest.to_string())
        }
    };
    let status = |target: EmojiStatus| -> std::result::Result<ReplInput, String> {
        Ok(ReplInput::Session(PageCommand::ChangeStatus {
            name: name()?,
            target,
        }))
    };

    match verb {
        "go" => Ok(ReplInput::Session(PageCommand::Navigate(rest.to_string()))),
        "page" => match number("page")? {
            0 => Err("page numbers start at 1".to_string()),
            n => Ok(ReplInput::Page(n)),
        },
        "size" => Ok(ReplInput::Size(number("size")?)),
        "search" => Ok(ReplInput::Session(PageCommand::SearchInput(
            rest.to_string(),
        ))),
        "fav" => status(EmojiStatus::Favorite),
        "unfav" | "restore" => status(EmojiStatus::General),
        "rm" => status(EmojiStatus::Removed),
        "help" | "?" => Ok(ReplInput::Help),
        "quit" | "exit" => Ok(ReplInput::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

/// Turns page/size input into a paginator change using the current controls.
fn paginate(input: &ReplInput, snapshot: &SessionSnapshot) -> Option<PageCommand> {
    let controls = snapshot.controls.as_ref()?;
    match *input {
        ReplInput::Page(n) => Some(PageCommand::Paginate {
            page_index: n - 1,
            page_size: controls.page_size,
        }),
        ReplInput::Size(size) => Some(PageCommand::Paginate {
            page_index: controls.page_index,
            page_size: size,
        }),
        _ => None,
    }
}

#[derive(Clone)]
struct BrowseHelper;

impl Helper for BrowseHelper {}

impl Completer for BrowseHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for BrowseHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_whitespace().next() {
            Some(verb) if COMMANDS.contains(&verb) => {
                Owned(line.replacen(verb, &verb.bright_cyan().to_string(), 1))
            }
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for BrowseHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for BrowseHelper {}

/// Prints every settled snapshot that follows a handled command.
async fn render_loop(mut snapshots: watch::Receiver<SessionSnapshot>) {
    let mut shown = 0;
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        if !snapshot.is_settled() || snapshot.commands_handled == shown {
            continue;
        }
        shown = snapshot.commands_handled;

        if let Some(notice) = &snapshot.notice {
            render::notice(notice);
        }
        match &snapshot.view {
            ViewStatus::Ready(page) => render::page(page),
            ViewStatus::Failed(message) => render::error(message),
            ViewStatus::Idle | ViewStatus::Loading => {}
        }
    }
}

pub async fn run(app: &App, category: String) -> Result<()> {
    let config = SessionConfig {
        debounce: Duration::from_millis(app.config.view.debounce_ms),
    };
    let handle = PageSession::spawn(app.service.clone(), config).await?;
    let renderer = tokio::spawn(render_loop(handle.subscribe()));

    println!("{}", "=== Emojis ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    handle.send(PageCommand::Navigate(category)).await?;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(BrowseHelper));

    loop {
        // The session and the renderer keep running on the other workers.
        let readline = tokio::task::block_in_place(|| rl.readline("emojis> "));
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let input = match parse_line(&line) {
                    Ok(input) => input,
                    Err(message) => {
                        render::error(&message);
                        continue;
                    }
                };

                let command = match input {
                    ReplInput::Quit => break,
                    ReplInput::Help => {
                        println!("{}", HELP.bright_black());
                        continue;
                    }
                    ReplInput::Session(command) => command,
                    ReplInput::Page(_) | ReplInput::Size(_) => {
                        match paginate(&input, &handle.snapshot()) {
                            Some(command) => command,
                            None => {
                                render::error("No page is open yet");
                                continue;
                            }
                        }
                    }
                };
                handle.send(command).await?;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                render::error(&format!("{:?}", err));
                break;
            }
        }
    }

    handle.shutdown().await;
    let _ = renderer.await;
    println!("{}", "Bye!".bright_green());
    Ok(())
}
