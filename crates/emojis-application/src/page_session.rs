//! Interactive page session.
//!
//! A `PageSession` is a single task that owns the [`PageView`] reducer. UI
//! inputs arrive as [`PageCommand`]s; the session debounces search input,
//! persists the page state, runs each query in its own task, and publishes
//! the latest [`SessionSnapshot`] on a watch channel.
//!
//! Only the newest query may reach the view: issuing a query aborts the one
//! in flight, and any result whose generation is no longer current is dropped.

use emojis_core::emoji::EmojiStatus;
use emojis_core::error::{EmojisError, Result};
use emojis_core::page::{Controls, PageEvent, PageView, Transition};
use emojis_core::route;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::page_service::{EmojiPage, EmojiPageService};

/// User input understood by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// The route parameter changed. Unknown values redirect to `general`.
    Navigate(String),
    /// The paginator changed.
    Paginate { page_index: usize, page_size: usize },
    /// The search box content changed (one event per keystroke is fine).
    SearchInput(String),
    /// A row action was clicked.
    ChangeStatus { name: String, target: EmojiStatus },
}

/// What the table area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready(EmojiPage),
    /// The latest query failed; the message is meant for the user.
    Failed(String),
}

/// Everything a front end needs to draw the page.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Paginator and search box values.
    pub controls: Option<Controls>,
    pub view: ViewStatus,
    /// Last non-fatal message (redirects, rejected input, failed actions).
    pub notice: Option<String>,
    /// A search value is waiting for the debounce window to pass.
    pub search_pending: bool,
    /// Number of commands processed so far.
    pub commands_handled: u64,
    /// Number of queries issued so far.
    pub queries_issued: u64,
}

impl SessionSnapshot {
    /// No debounced search pending and no query in flight.
    pub fn is_settled(&self) -> bool {
        !self.search_pending && self.view != ViewStatus::Loading
    }

    pub fn page(&self) -> Option<&EmojiPage> {
        match &self.view {
            ViewStatus::Ready(page) => Some(page),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period before search input takes effect.
    pub debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(emojis_core::config::MIN_DEBOUNCE_MS),
        }
    }
}

/// Client side of a running session.
pub struct PageSessionHandle {
    commands: mpsc::Sender<PageCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl PageSessionHandle {
    pub async fn send(&self, command: PageCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| EmojisError::internal("page session has stopped"))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a snapshot satisfies `predicate`.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| EmojisError::internal("page session has stopped"))?;
        Ok(snapshot.clone())
    }

    /// Sends `command` and waits until it has been handled and its effects
    /// have settled.
    pub async fn dispatch(&self, command: PageCommand) -> Result<SessionSnapshot> {
        let handled = self.snapshots.borrow().commands_handled;
        self.send(command).await?;
        self.wait_for(|snapshot| snapshot.commands_handled > handled && snapshot.is_settled())
            .await
    }

    /// Stops the session and waits for it to finish.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            tracing::warn!("Page session ended abnormally: {}", e);
        }
    }
}

type QueryResult = (u64, Result<EmojiPage>);

pub struct PageSession {
    service: EmojiPageService,
    view: PageView,
    debounce: Duration,
    pending_search: Option<(String, Instant)>,
    in_flight: Option<JoinHandle<()>>,
    results_tx: mpsc::UnboundedSender<QueryResult>,
    snapshot: SessionSnapshot,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl PageSession {
    /// Loads the persisted page state and starts the session task.
    ///
    /// Nothing is queried until the first `Navigate`.
    pub async fn spawn(
        service: EmojiPageService,
        config: SessionConfig,
    ) -> Result<PageSessionHandle> {
        let pages = service.load_page_states().await?;
        let (commands_tx, commands_rx) = mpsc::channel(64);
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(SessionSnapshot::default());

        let session = PageSession {
            service,
            view: PageView::new(pages),
            debounce: config.debounce,
            pending_search: None,
            in_flight: None,
            results_tx,
            snapshot: SessionSnapshot::default(),
            snapshot_tx,
        };
        let task = tokio::spawn(session.run(commands_rx, results_rx));

        Ok(PageSessionHandle {
            commands: commands_tx,
            snapshots,
            task,
        })
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<PageCommand>,
        mut results: mpsc::UnboundedReceiver<QueryResult>,
    ) {
        loop {
            let deadline = self.pending_search.as_ref().map(|(_, at)| *at);
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        self.handle_command(command).await;
                        self.snapshot.commands_handled += 1;
                        self.publish();
                    }
                    None => break,
                },
                Some((generation, result)) = results.recv() => {
                    self.handle_result(generation, result);
                    self.publish();
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.settle_search().await;
                    self.publish();
                }
            }
        }

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        tracing::debug!("Page session stopped");
    }

    async fn handle_command(&mut self, command: PageCommand) {
        self.snapshot.notice = None;
        match command {
            PageCommand::Navigate(param) => {
                let (category, redirected) = route::resolve_param(&param);
                if redirected {
                    tracing::warn!(param = %param, "Unknown category, redirecting to general");
                    self.snapshot.notice = Some(format!(
                        "Unknown category '{}', showing {}",
                        param,
                        route::category_path(category)
                    ));
                }
                // Input typed on the previous page must not leak into this one.
                self.pending_search = None;
                self.snapshot.search_pending = false;
                self.apply(PageEvent::Navigate(category)).await;
            }
            PageCommand::Paginate {
                page_index,
                page_size,
            } => {
                self.apply(PageEvent::Paginate {
                    page_index,
                    page_size,
                })
                .await;
            }
            PageCommand::SearchInput(text) => {
                if let Some(controls) = self.snapshot.controls.as_mut() {
                    controls.search_text = text.clone();
                }
                self.pending_search = Some((text, Instant::now() + self.debounce));
                self.snapshot.search_pending = true;
            }
            PageCommand::ChangeStatus { name, target } => {
                match self.service.change_status(&name, target).await {
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        self.snapshot.notice = Some(format!("No emoji named '{}'", name));
                    }
                    Err(e) => {
                        tracing::error!(emoji = %name, "Status change failed: {}", e);
                        self.snapshot.notice = Some(e.to_string());
                        return;
                    }
                }
                self.apply(PageEvent::Reload).await;
            }
        }
    }

    async fn settle_search(&mut self) {
        self.snapshot.search_pending = false;
        if let Some((text, _)) = self.pending_search.take() {
            self.apply(PageEvent::SearchSettled(text)).await;
        }
    }

    async fn apply(&mut self, event: PageEvent) {
        match self.view.update(event) {
            Ok(transition) => self.dispatch(transition).await,
            Err(e) => {
                tracing::warn!("Rejected page input: {}", e);
                self.snapshot.notice = Some(e.to_string());
            }
        }
    }

    async fn dispatch(&mut self, transition: Transition) {
        if let Some(controls) = transition.controls {
            self.snapshot.controls = Some(controls);
        }

        let Some(issued) = transition.query else {
            return;
        };

        if let Some(controls) = self.snapshot.controls.as_mut() {
            let current = self.view.current();
            controls.page_index = current.page_index;
            controls.page_size = current.page_size;
        }

        if let Err(e) = self.service.save_page_states(self.view.pages()).await {
            tracing::warn!("Failed to persist page state: {}", e);
        }

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        tracing::debug!(generation = issued.generation, query = ?issued.query, "Issuing page query");
        self.snapshot.view = ViewStatus::Loading;
        self.snapshot.queries_issued += 1;

        let service = self.service.clone();
        let results = self.results_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = service.page(&issued.query).await;
            let _ = results.send((issued.generation, result));
        }));
    }

    fn handle_result(&mut self, generation: u64, result: Result<EmojiPage>) {
        if !self.view.is_current(generation) {
            tracing::debug!(generation, "Dropping stale page result");
            return;
        }
        self.in_flight = None;

        self.snapshot.view = match result {
            Ok(page) => ViewStatus::Ready(page),
            Err(e) => {
                tracing::error!("Page query failed: {}", e);
                ViewStatus::Failed(e.to_string())
            }
        };
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot.clone());
    }
}
