//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intents, timer
//! ticks and worker responses, translating them into state changes and action
//! sequences. It is the only place where the collection store, the drag
//! coordinator and the catalog worker meet.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the front end, the tick timer or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `TierStore` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Search**: `QueryChanged`, `Tick`, `SubmitSearch`
//! - **Browse**: `ShowTrending`, `ShowGenre`, `NextPage`, `PreviousPage`
//! - **Navigation**: `OpenDetail`, `ShowBoard`, `ShowDiscover`
//! - **Collection**: `AddToPool`, `RemoveFromPool`, `Rank`, `Unrank`,
//!   `ResetTierList`, `ResetAll`
//! - **Drag**: `DragStart`, `DragEnd`, `DragCancel`
//! - **Output**: `Export`
//! - **Worker**: `Worker` with typed response variants
//!
//! # Example
//!
//! ```rust
//! use watchtier::app::{handle_event, AppState, Event, TierStore};
//! use watchtier::ui::Theme;
//!
//! let mut state = AppState::new(TierStore::in_memory(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::ShowBoard)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::dnd::{DragPayload, DropOutcome, DropTarget};
use super::modes::View;
use super::store::{BrowseKind, BrowseRequest, FetchOutcome, SearchStart, TierToggle};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Movie, MovieId, TierId};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::time::Instant;

/// Default export file name, without extension.
pub const DEFAULT_EXPORT_NAME: &str = "tier-list";

/// Events triggered by user input, timers or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes them sequentially.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search input text changed at `at`.
    ///
    /// The search itself is issued by a later `Tick` once input pauses.
    QueryChanged { text: String, at: Instant },

    /// Timer tick; releases a debounced query whose quiet interval has passed.
    Tick(Instant),

    /// Searches for `text` immediately, bypassing the debounce.
    SubmitSearch(String),

    /// Browses this week's trending movies at `page`.
    ShowTrending { page: u32 },

    /// Browses popular movies of a genre at `page`.
    ShowGenre { genre_id: u32, page: u32 },

    /// Next page of the active browse listing.
    NextPage,

    /// Previous page of the active browse listing; no-op on page 1.
    PreviousPage,

    /// Opens the detail view of a movie and fetches its data.
    OpenDetail(MovieId),

    /// Switches to the board view.
    ShowBoard,

    /// Switches to the discover view, loading trending movies if nothing has
    /// been browsed yet.
    ShowDiscover,

    /// Adds a movie to the pool.
    AddToPool(Movie),

    /// Removes a movie from the pool.
    RemoveFromPool(MovieId),

    /// Places a movie in a tier (toggles it off if it is already there).
    Rank { movie: Movie, tier: TierId },

    /// Moves a ranked movie back to the pool.
    Unrank(MovieId),

    /// A drag gesture started.
    DragStart(DragPayload),

    /// A drag gesture ended over `target` (`None`: outside every container).
    DragEnd(Option<DropTarget>),

    /// A drag gesture was abandoned.
    DragCancel,

    /// Moves every ranked movie back to the pool.
    ResetTierList,

    /// Clears the pool, the tiers and all results.
    ResetAll,

    /// Exports the board; `None` uses [`DEFAULT_EXPORT_NAME`].
    Export { base_name: Option<String> },

    /// Wraps a response from the catalog worker.
    Worker(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the caller whether the view changed and should be
/// re-rendered.
///
/// # Errors
///
/// Returns an error if a collection mutation cannot be persisted. The in-memory
/// change has already been applied when that happens.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QueryChanged { text, at } => {
            state.query.clone_from(text);
            state.debouncer.input(text.clone(), *at);
            tracing::trace!(query = %text, "search query updated");
            Ok((true, vec![]))
        }
        Event::Tick(now) => {
            let Some(query) = state.debouncer.poll(*now) else {
                return Ok((false, vec![]));
            };
            Ok((true, search(state, &query)))
        }
        Event::SubmitSearch(text) => {
            state.debouncer.cancel();
            state.query.clone_from(text);
            state.view = View::Discover;
            Ok((true, search(state, text)))
        }

        Event::ShowTrending { page } => {
            state.view = View::Discover;
            Ok((true, browse(state, BrowseKind::Trending, *page)))
        }
        Event::ShowGenre { genre_id, page } => {
            state.view = View::Discover;
            Ok((true, browse(state, BrowseKind::Genre(*genre_id), *page)))
        }
        Event::NextPage => {
            let kind = BrowseKind::from_genre(state.store.active_genre());
            let page = state.store.current_page().saturating_add(1);
            Ok((true, browse(state, kind, page)))
        }
        Event::PreviousPage => {
            let page = state.store.current_page();
            if page <= 1 {
                tracing::debug!("already on first page");
                return Ok((false, vec![]));
            }
            let kind = BrowseKind::from_genre(state.store.active_genre());
            Ok((true, browse(state, kind, page - 1)))
        }

        Event::OpenDetail(id) => {
            let seq = state.begin_detail(*id);
            tracing::debug!(movie_id = id, seq, "opening detail");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::Detail { seq, id: *id })]))
        }
        Event::ShowBoard => {
            state.view = View::Board;
            Ok((true, vec![]))
        }
        Event::ShowDiscover => {
            state.view = View::Discover;
            if state.store.browse_results().is_empty() && !state.store.is_loading() {
                tracing::debug!("nothing browsed yet, loading trending");
                return Ok((true, browse(state, BrowseKind::Trending, 1)));
            }
            Ok((true, vec![]))
        }

        Event::AddToPool(movie) => {
            let added = state.store.add_to_pool(movie.clone())?;
            state.status = Some(if added {
                format!("Added \"{}\" to your collection", movie.title)
            } else {
                format!("\"{}\" is already collected", movie.title)
            });
            Ok((true, vec![]))
        }
        Event::RemoveFromPool(id) => {
            let removed = state.store.remove_from_pool(*id)?;
            state.status = Some(if removed {
                "Removed from your collection".to_string()
            } else {
                "Not in the unranked pool".to_string()
            });
            Ok((removed, vec![]))
        }
        Event::Rank { movie, tier } => {
            let toggle = state.store.add_movie_to_tier(movie.clone(), *tier)?;
            state.status = Some(match toggle {
                TierToggle::Placed => format!("Ranked \"{}\" in {tier}", movie.title),
                TierToggle::ToggledOff => format!("Took \"{}\" out of {tier}", movie.title),
            });
            Ok((true, vec![]))
        }
        Event::Unrank(id) => {
            let Some((tier, idx)) = state.store.find_ranked(*id) else {
                state.status = Some("Not ranked".to_string());
                return Ok((true, vec![]));
            };
            let movie = state.store.tier(tier).movies[idx].clone();
            state.store.unrank_movie(movie, tier)?;
            state.status = Some(format!("Moved back to the pool from {tier}"));
            Ok((true, vec![]))
        }

        Event::DragStart(payload) => {
            state.drag.start(payload.clone(), &state.store);
            Ok((true, vec![]))
        }
        Event::DragEnd(target) => {
            // Always re-render: the drag overlay disappears even on a no-op drop.
            let outcome = state.drag.drop_on(*target, &mut state.store)?;
            state.status = Some(describe_drop(&outcome));
            Ok((true, vec![]))
        }
        Event::DragCancel => {
            let was_dragging = state.drag.is_dragging();
            state.drag.cancel();
            Ok((was_dragging, vec![]))
        }

        Event::ResetTierList => {
            let changed = state.store.reset_tier_list()?;
            state.status = Some(if changed {
                "All ranked movies moved back to the pool".to_string()
            } else {
                "Tiers already empty".to_string()
            });
            Ok((true, vec![]))
        }
        Event::ResetAll => {
            state.store.reset_all()?;
            state.drag.cancel();
            state.debouncer.cancel();
            state.query.clear();
            state.status = Some("Everything cleared".to_string());
            Ok((true, vec![]))
        }

        Event::Export { base_name } => {
            let base_name = base_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_EXPORT_NAME)
                .to_string();
            Ok((false, vec![Action::Export { base_name }]))
        }

        Event::Worker(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Applies a worker response; stale responses cause no render.
fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::SearchCompleted { seq, outcome } => {
            let result = state.store.finish_search(*seq, outcome.clone());
            (result != FetchOutcome::Stale, vec![])
        }
        WorkerResponse::BrowseCompleted { request, outcome } => {
            let result = state.store.finish_browse(*request, outcome.clone());
            (result != FetchOutcome::Stale, vec![])
        }
        WorkerResponse::DetailCompleted { seq, id, outcome } => {
            tracing::debug!(movie_id = id, ok = outcome.is_ok(), "detail response");
            (state.finish_detail(*seq, outcome.clone()), vec![])
        }
        WorkerResponse::LookupCompleted { id, .. } => {
            tracing::debug!(movie_id = id, "lookup response outside a command, ignored");
            (false, vec![])
        }
    }
}

fn search(state: &mut AppState, query: &str) -> Vec<Action> {
    match state.store.begin_search(query) {
        SearchStart::Cleared => vec![],
        SearchStart::Dispatch { seq, query } => {
            vec![Action::PostToWorker(WorkerMessage::Search { seq, query })]
        }
    }
}

fn browse(state: &mut AppState, kind: BrowseKind, page: u32) -> Vec<Action> {
    let request: BrowseRequest = state.store.begin_browse(kind, page);
    vec![Action::PostToWorker(WorkerMessage::Browse { request })]
}

fn describe_drop(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Placed { tier, .. } => format!("Ranked in {tier}"),
        DropOutcome::ToggledOff { tier, .. } => format!("Taken out of {tier}"),
        DropOutcome::Reordered { tier, from, to } => {
            format!("Moved within {tier} from #{} to #{}", from + 1, to + 1)
        }
        DropOutcome::Moved { from, to, index, .. } => {
            format!("Moved from {from} to {to} at #{}", index + 1)
        }
        DropOutcome::Unranked { from, .. } => format!("Moved back to the pool from {from}"),
        DropOutcome::Pooled { .. } => "Added to your collection".to_string(),
        DropOutcome::NoOp(reason) => format!("Nothing moved: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TierStore;
    use crate::ui::Theme;
    use std::time::Duration;

    fn movie(id: MovieId) -> Movie {
        Movie::new(id, format!("Movie {id}"), format!("https://img/{id}.jpg"))
    }

    fn state() -> AppState {
        AppState::new(TierStore::in_memory(), Theme::default())
    }

    #[test]
    fn typed_query_is_searched_once_after_pause() {
        let mut state = state();
        let start = Instant::now();

        handle_event(&mut state, &Event::QueryChanged { text: "ali".into(), at: start }).unwrap();
        handle_event(
            &mut state,
            &Event::QueryChanged { text: "alien".into(), at: start + Duration::from_millis(100) },
        )
        .unwrap();

        let (_, early) = handle_event(&mut state, &Event::Tick(start + Duration::from_millis(300))).unwrap();
        assert!(early.is_empty());

        let (_, due) = handle_event(&mut state, &Event::Tick(start + Duration::from_millis(700))).unwrap();
        assert!(matches!(
            due.as_slice(),
            [Action::PostToWorker(WorkerMessage::Search { query, .. })] if query == "alien"
        ));

        let (_, again) = handle_event(&mut state, &Event::Tick(start + Duration::from_secs(2))).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn blank_submit_clears_without_request() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch("  ".into())).unwrap();
        assert!(actions.is_empty());
        assert!(state.store.search_results().is_empty());
    }

    #[test]
    fn paging_follows_active_genre() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::ShowGenre { genre_id: 35, page: 1 }).unwrap();
        let [Action::PostToWorker(WorkerMessage::Browse { request })] = actions.as_slice() else {
            panic!("expected browse request");
        };
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::BrowseCompleted { request: *request, outcome: Ok(vec![movie(1)]) }),
        )
        .unwrap();

        let (render, none) = handle_event(&mut state, &Event::PreviousPage).unwrap();
        assert!(!render && none.is_empty());

        let (_, next) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(matches!(
            next.as_slice(),
            [Action::PostToWorker(WorkerMessage::Browse { request })]
                if request.kind == BrowseKind::Genre(35) && request.page == 2
        ));
    }

    #[test]
    fn stale_search_response_does_not_render() {
        let mut state = state();
        let (_, first) = handle_event(&mut state, &Event::SubmitSearch("al".into())).unwrap();
        let (_, second) = handle_event(&mut state, &Event::SubmitSearch("alien".into())).unwrap();
        let seq_of = |actions: &[Action]| match actions {
            [Action::PostToWorker(WorkerMessage::Search { seq, .. })] => *seq,
            _ => panic!("expected search request"),
        };
        let (first, second) = (seq_of(&first), seq_of(&second));

        let (render, _) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::SearchCompleted { seq: second, outcome: Ok(vec![movie(2)]) }),
        )
        .unwrap();
        assert!(render);

        let (render, _) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::SearchCompleted { seq: first, outcome: Ok(vec![movie(1)]) }),
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.store.search_results(), &[movie(2)]);
    }

    #[test]
    fn drag_from_pool_to_tier_ranks_movie() {
        let mut state = state();
        handle_event(&mut state, &Event::AddToPool(movie(1))).unwrap();
        handle_event(&mut state, &Event::DragStart(DragPayload::PoolItem(movie(1)))).unwrap();
        assert!(state.compute_viewmodel().dragging.is_some());

        handle_event(&mut state, &Event::DragEnd(Some(DropTarget::Tier(TierId::S)))).unwrap();

        assert_eq!(state.store.tier(TierId::S).movies, vec![movie(1)]);
        assert!(state.store.pool().is_empty());
        assert!(state.compute_viewmodel().dragging.is_none());
    }

    #[test]
    fn unrank_and_export_defaults() {
        let mut state = state();
        handle_event(&mut state, &Event::Rank { movie: movie(4), tier: TierId::B }).unwrap();
        handle_event(&mut state, &Event::Unrank(4)).unwrap();
        assert_eq!(state.store.pool(), &[movie(4)]);

        let (_, actions) = handle_event(&mut state, &Event::Export { base_name: None }).unwrap();
        assert_eq!(actions, vec![Action::Export { base_name: DEFAULT_EXPORT_NAME.to_string() }]);
    }
}
