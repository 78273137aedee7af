//! Event loop driver.
//!
//! [`Runtime`] owns the [`AppState`] and the catalog worker. It feeds events
//! through [`handle_event`], executes the returned actions, and turns worker
//! responses back into events. CLI commands are translated into events here,
//! resolving typed movie references against what the state can see.

use crate::app::{
    handle_event, Action, AppState, DragPayload, DropTarget, Event, Placement,
};
use crate::catalog::CatalogClient;
use crate::cli::{Command, MoveTarget};
use crate::domain::error::{Result, WatchTierError};
use crate::domain::genre::parse_genre;
use crate::domain::{Movie, MovieId};
use crate::ui::export_board;
use crate::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Owns application state and executes side effects.
///
/// Must be used from within a tokio runtime: posting a worker message spawns
/// a task.
pub struct Runtime {
    state: AppState,
    worker: CatalogWorker,
    responses: mpsc::UnboundedReceiver<WorkerResponse>,
    pending: usize,
    export_dir: PathBuf,
    last_export: Option<PathBuf>,
}

impl Runtime {
    #[must_use]
    pub fn new(state: AppState, catalog: Arc<dyn CatalogClient>, export_dir: PathBuf) -> Self {
        let (worker, responses) = CatalogWorker::new(catalog);
        Self {
            state,
            worker,
            responses,
            pending: 0,
            export_dir,
            last_export: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Worker requests posted whose response has not been handled yet.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Path of the most recent successful export.
    #[must_use]
    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }

    /// Handles one event and executes its actions; returns the render flag.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures from the handler.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (mut render, actions) = handle_event(&mut self.state, &event)?;
        for action in actions {
            render |= self.execute(action);
        }
        Ok(render)
    }

    fn execute(&mut self, action: Action) -> bool {
        match action {
            Action::PostToWorker(message) => {
                self.pending += 1;
                self.worker.post(message);
                false
            }
            Action::Export { base_name } => {
                let board = self.state.compute_board();
                match export_board(&board, &self.export_dir, &base_name) {
                    Ok(path) => {
                        self.state.status = Some(format!("Exported to {}", path.display()));
                        self.last_export = Some(path);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, base_name, "export failed");
                        self.state.status = Some(format!("Export failed: {e}"));
                    }
                }
                true
            }
        }
    }

    /// Waits for the next worker response.
    ///
    /// Never resolves while nothing is pending; meant for `tokio::select!`.
    pub async fn next_response(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Applies a response obtained from [`Runtime::next_response`].
    ///
    /// # Errors
    ///
    /// Propagates persistence failures from the handler.
    pub fn apply_response(&mut self, response: WorkerResponse) -> Result<bool> {
        self.pending = self.pending.saturating_sub(1);
        self.dispatch(Event::Worker(response))
    }

    /// Handles worker responses until no request is outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`WatchTierError::Worker`] if the response channel closes early.
    pub async fn settle(&mut self) -> Result<bool> {
        let mut render = false;
        while self.pending > 0 {
            let response = self
                .responses
                .recv()
                .await
                .ok_or_else(|| WatchTierError::Worker("response channel closed".to_string()))?;
            render |= self.apply_response(response)?;
        }
        Ok(render)
    }

    /// Turns a failed step into a status line so an interactive session survives.
    ///
    /// A failed save or export leaves the in-memory board intact, so the user
    /// sees the error and keeps working.
    ///
    /// # Errors
    ///
    /// Returns [`WatchTierError::Worker`] unchanged: without the worker no
    /// catalog request can complete.
    pub fn recover(&mut self, result: Result<bool>) -> Result<bool> {
        match result {
            Err(e @ WatchTierError::Worker(_)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "step failed, session continues");
                self.state.status = Some(format!("Something went wrong: {e}"));
                Ok(true)
            }
            ok => ok,
        }
    }

    /// Emits a timer tick; fires a debounced search once its interval passed.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures from the handler.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        self.dispatch(Event::Tick(now))
    }

    /// Translates a command into events and dispatches them.
    ///
    /// `Shell` and `Quit` are front-end concerns and do nothing here.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures and worker channel failures.
    pub async fn run_command(&mut self, command: Command) -> Result<bool> {
        let span = tracing::debug_span!("run_command", command = ?command);
        self.execute_command(command).instrument(span).await
    }

    async fn execute_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Search { query } => self.dispatch(Event::SubmitSearch(query.join(" "))),
            Command::Type { text } => self.dispatch(Event::QueryChanged {
                text: text.join(" "),
                at: Instant::now(),
            }),
            Command::Trending { page } => self.dispatch(Event::ShowTrending { page: page.max(1) }),
            Command::Genre { genre, page } => match parse_genre(&genre) {
                Some(genre) => self.dispatch(Event::ShowGenre {
                    genre_id: genre.id,
                    page: page.max(1),
                }),
                None => Ok(self.report(format!("Unknown genre \"{genre}\""))),
            },
            Command::Next => self.dispatch(Event::NextPage),
            Command::Prev => self.dispatch(Event::PreviousPage),

            Command::Detail { reference } => match self.resolve_id(&reference) {
                Some(id) => self.dispatch(Event::OpenDetail(id)),
                None => Ok(self.not_found(&reference)),
            },
            Command::Add { reference } => match self.resolve_or_fetch(&reference).await? {
                Some(movie) => self.dispatch(Event::AddToPool(movie)),
                None => Ok(self.not_found(&reference)),
            },
            Command::Remove { reference } => match self.resolve_id(&reference) {
                Some(id) => self.dispatch(Event::RemoveFromPool(id)),
                None => Ok(self.not_found(&reference)),
            },
            Command::Rank { reference, tier } => match self.resolve_or_fetch(&reference).await? {
                Some(movie) => self.dispatch(Event::Rank { movie, tier }),
                None => Ok(self.not_found(&reference)),
            },
            Command::Unrank { reference } => match self.resolve_id(&reference) {
                Some(id) => self.dispatch(Event::Unrank(id)),
                None => Ok(self.not_found(&reference)),
            },
            Command::Move {
                reference,
                to,
                before,
            } => self.drag_move(&reference, to, before.as_deref()).await,

            Command::Board => self.dispatch(Event::ShowBoard),
            Command::Discover => self.dispatch(Event::ShowDiscover),
            Command::ResetTiers => self.dispatch(Event::ResetTierList),
            Command::ResetAll => self.dispatch(Event::ResetAll),
            Command::Export { name, dir } => {
                let previous = dir.map(|dir| std::mem::replace(&mut self.export_dir, dir));
                let render = self.dispatch(Event::Export { base_name: name });
                if let Some(previous) = previous {
                    self.export_dir = previous;
                }
                render
            }

            Command::Shell | Command::Quit => Ok(false),
        }
    }

    /// Simulates a drag of `reference` onto a tier, the pool or another movie.
    async fn drag_move(
        &mut self,
        reference: &str,
        to: Option<MoveTarget>,
        before: Option<&str>,
    ) -> Result<bool> {
        let Some(movie) = self.resolve_or_fetch(reference).await? else {
            return Ok(self.not_found(reference));
        };

        let target = match (to, before) {
            (Some(MoveTarget::Tier(tier)), _) => DropTarget::Tier(tier),
            (Some(MoveTarget::Pool), _) => DropTarget::Pool,
            (None, Some(other)) => match self.state.resolve_movie_ref(other) {
                Some(other) => DropTarget::Movie(other.id),
                None => return Ok(self.not_found(other)),
            },
            (None, None) => return Ok(self.report("move needs --to or --before".to_string())),
        };

        let payload = match self.state.store.placement_of(movie.id) {
            Placement::Tier(_) => DragPayload::TierItem(movie.id),
            Placement::Pool => DragPayload::PoolItem(movie),
            Placement::Unplaced => DragPayload::SearchItem(movie),
        };

        self.dispatch(Event::DragStart(payload))?;
        self.dispatch(Event::DragEnd(Some(target)))
    }

    fn resolve_id(&self, reference: &str) -> Option<MovieId> {
        parse_id(reference).or_else(|| self.state.resolve_movie_ref(reference).map(|m| m.id))
    }

    /// Resolves a reference locally; an unknown numeric id is looked up in the
    /// catalog without changing the view.
    ///
    /// Other responses arriving meanwhile are applied as usual.
    async fn resolve_or_fetch(&mut self, reference: &str) -> Result<Option<Movie>> {
        if let Some(movie) = self.state.resolve_movie_ref(reference) {
            return Ok(Some(movie));
        }
        let Some(id) = parse_id(reference) else {
            return Ok(None);
        };

        tracing::debug!(movie_id = id, "unknown id, looking it up");
        self.execute(Action::PostToWorker(WorkerMessage::Lookup { id }));

        loop {
            let response = self
                .responses
                .recv()
                .await
                .ok_or_else(|| WatchTierError::Worker("response channel closed".to_string()))?;

            match response {
                WorkerResponse::LookupCompleted { id: found, outcome } if found == id => {
                    self.pending = self.pending.saturating_sub(1);
                    return Ok(outcome.unwrap_or_else(|e| {
                        self.state.store.record_error(e);
                        None
                    }));
                }
                other => {
                    self.apply_response(other)?;
                }
            }
        }
    }

    fn not_found(&mut self, reference: &str) -> bool {
        self.report(format!("No movie matches \"{reference}\""))
    }

    fn report(&mut self, message: String) -> bool {
        tracing::debug!(%message, "command rejected");
        self.state.status = Some(message);
        true
    }
}

fn parse_id(reference: &str) -> Option<MovieId> {
    reference.trim().trim_start_matches('#').parse().ok()
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("view", &self.state.view)
            .field("pending", &self.pending)
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}
