//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container, along with
//! methods for movie lookup and UI view model generation. The canonical pool and
//! tier data lives in the [`TierStore`] it owns; everything else here is
//! transient UI state.
//!
//! # State Components
//!
//! - **Store**: Collections, tiers, fetch bookkeeping and persistence
//! - **Drag**: The drag gesture in progress, if any
//! - **Debouncer**: Typed query waiting for its quiet interval
//! - **View**: Which screen is displayed
//! - **Detail**: Data for the detail view, fetched on demand
//!
//! # Example
//!
//! ```rust
//! use watchtier::app::{AppState, TierStore};
//! use watchtier::ui::Theme;
//!
//! let state = AppState::new(TierStore::in_memory(), Theme::default());
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.header.title, " Discover ");
//! ```

use super::debounce::Debouncer;
use super::dnd::DragCoordinator;
use super::modes::View;
use super::store::{Placement, TierStore};
use crate::domain::{genre::genre_by_id, Movie, MovieDetail, MovieId, Tier};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Badge, BoardViewModel, DetailViewModel, DiscoverViewModel, DisplayItem, EmptyState,
    FooterInfo, HeaderInfo, StatusLine, TierRow, UIViewModel, ViewBody,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Central application state container.
///
/// Mutated by the event handler in response to user input and worker responses.
/// View models are computed on demand from state snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Pool, tiers, results and fetch bookkeeping.
    pub store: TierStore,

    /// Drag gesture in progress.
    pub drag: DragCoordinator,

    /// Typed query waiting for its quiet interval.
    pub debouncer: Debouncer,

    /// Displayed screen.
    pub view: View,

    /// Current search input text.
    ///
    /// While non-blank, the discover view shows search results instead of the
    /// browse listing.
    pub query: String,

    /// Data for the detail view, once loaded.
    pub detail: Option<MovieDetail>,

    /// Whether the newest detail request is outstanding.
    pub detail_loading: bool,

    /// One-line feedback from the last user action.
    pub status: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    detail_seq: u64,
}

impl AppState {
    /// Creates application state around an already loaded store.
    #[must_use]
    pub fn new(store: TierStore, theme: Theme) -> Self {
        Self {
            store,
            drag: DragCoordinator::new(),
            debouncer: Debouncer::default(),
            view: View::default(),
            query: String::new(),
            detail: None,
            detail_loading: false,
            status: None,
            theme,
            detail_seq: 0,
        }
    }

    /// Replaces the debouncer, e.g. to use a configured interval.
    #[must_use]
    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// Whether the discover view currently shows search results.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Items the discover view currently lists.
    #[must_use]
    pub fn discover_results(&self) -> &[Movie] {
        if self.is_searching() {
            self.store.search_results()
        } else {
            self.store.browse_results()
        }
    }

    /// Section title of the discover view.
    #[must_use]
    pub fn discover_title(&self) -> String {
        if self.is_searching() {
            return "Search Results".to_string();
        }
        match self.store.active_genre() {
            None => "Trending Now".to_string(),
            Some(id) => genre_by_id(id).map_or_else(
                || format!("Genre {id} Movies"),
                |genre| format!("{} Movies", genre.name),
            ),
        }
    }

    /// Starts a detail lookup for `id` and returns its sequence number.
    ///
    /// Switches to the detail view. The previous detail stays visible only if it
    /// is for the same movie.
    pub fn begin_detail(&mut self, id: MovieId) -> u64 {
        self.detail_seq += 1;
        self.view = View::Detail(id);
        self.detail_loading = true;
        if self.detail.as_ref().is_some_and(|d| d.movie.id != id) {
            self.detail = None;
        }
        self.detail_seq
    }

    /// Applies a detail response; returns whether it was the newest one.
    pub fn finish_detail(&mut self, seq: u64, outcome: Result<MovieDetail, String>) -> bool {
        if seq != self.detail_seq {
            tracing::debug!(seq, latest = self.detail_seq, "stale detail response discarded");
            return false;
        }

        self.detail_loading = false;
        match outcome {
            Ok(detail) => self.detail = Some(detail),
            Err(message) => self.store.record_error(message),
        }
        true
    }

    /// Looks a movie up by id everywhere the UI can show one, including the
    /// detail page and its recommendations.
    #[must_use]
    pub fn find_movie(&self, id: MovieId) -> Option<Movie> {
        if let Some(movie) = self.store.find_movie(id) {
            return Some(movie.clone());
        }
        let detail = self.detail.as_ref()?;
        if detail.movie.id == id {
            return detail.poolable_movie();
        }
        detail.recommendations.iter().find(|m| m.id == id).cloned()
    }

    /// Resolves a user-typed movie reference.
    ///
    /// A number (optionally prefixed with `#`) is taken as an id. Anything else is
    /// fuzzy matched against the titles of every visible movie: tiers, pool,
    /// discover results and recommendations; the best score wins and ties go to
    /// the first candidate in that order.
    #[must_use]
    pub fn resolve_movie_ref(&self, reference: &str) -> Option<Movie> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if let Ok(id) = reference.trim_start_matches('#').parse::<MovieId>() {
            return self.find_movie(id);
        }

        let _span = tracing::debug_span!("resolve_movie_ref", reference).entered();

        let matcher = SkimMatcherV2::default();
        let query = reference.to_lowercase();
        let recommendations = self
            .detail
            .iter()
            .flat_map(|d| d.recommendations.iter());

        let mut best: Option<(i64, &Movie)> = None;
        for movie in self
            .store
            .tiers()
            .iter()
            .flat_map(|t| t.movies.iter())
            .chain(self.store.pool().iter())
            .chain(self.discover_results().iter())
            .chain(recommendations)
        {
            let Some(score) = matcher.fuzzy_match(&movie.title.to_lowercase(), &query) else {
                continue;
            };
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, movie));
            }
        }

        tracing::debug!(found = best.is_some(), "movie reference resolved");
        best.map(|(_, movie)| movie.clone())
    }

    /// Membership badge for `id`.
    #[must_use]
    pub fn badge_for(&self, id: MovieId) -> Option<Badge> {
        match self.store.placement_of(id) {
            Placement::Pool => Some(Badge::Pooled),
            Placement::Tier(tier) => Some(Badge::Ranked(tier)),
            Placement::Unplaced => None,
        }
    }

    /// Computes a renderable UI view model from current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let body = match self.view {
            View::Board => ViewBody::Board(self.compute_board()),
            View::Discover => ViewBody::Discover(self.compute_discover()),
            View::Detail(id) => ViewBody::Detail(self.compute_detail(id)),
        };

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {} ", self.view.title()),
            },
            body,
            footer: self.compute_footer(),
            status: self.compute_status(),
            dragging: self.drag.active_movie().map(|m| m.title.clone()),
        }
    }

    /// Board view model alone; used by export.
    #[must_use]
    pub fn compute_board(&self) -> BoardViewModel {
        let rows = self.store.tiers().iter().map(Self::tier_row).collect();
        let pool = self
            .store
            .pool()
            .iter()
            .map(|m| DisplayItem::new(m, None))
            .collect();

        BoardViewModel { rows, pool }
    }

    fn tier_row(tier: &Tier) -> TierRow {
        TierRow {
            label: tier.label.clone(),
            color: tier.color.clone(),
            items: tier.movies.iter().map(|m| DisplayItem::new(m, None)).collect(),
        }
    }

    fn compute_discover(&self) -> DiscoverViewModel {
        let items: Vec<DisplayItem> = self
            .discover_results()
            .iter()
            .map(|m| DisplayItem::new(m, self.badge_for(m.id)))
            .collect();

        let empty_state = if items.is_empty() && !self.store.is_loading() {
            Some(if self.is_searching() {
                EmptyState {
                    message: "No movies found".to_string(),
                    subtitle: "Try a different title".to_string(),
                }
            } else {
                EmptyState {
                    message: "Nothing to show yet".to_string(),
                    subtitle: "Browse trending movies or pick a genre".to_string(),
                }
            })
        } else {
            None
        };

        DiscoverViewModel {
            section_title: self.discover_title(),
            query: self.query.clone(),
            items,
            page: (!self.is_searching()).then(|| self.store.current_page()),
            is_loading: self.store.is_loading(),
            empty_state,
        }
    }

    fn compute_detail(&self, id: MovieId) -> DetailViewModel {
        let detail = self.detail.as_ref().filter(|d| d.movie.id == id);

        let Some(detail) = detail else {
            return DetailViewModel {
                id,
                title: self
                    .find_movie(id)
                    .map_or_else(|| format!("#{id}"), |m| m.title),
                is_loading: self.detail_loading,
                ..DetailViewModel::default()
            };
        };

        DetailViewModel {
            id,
            title: detail.movie.title.clone(),
            year: detail.release_year().map(str::to_string),
            runtime: detail.runtime.map(|r| format!("{}h {}m", r / 60, r % 60)),
            rating: format!("{:.1}", detail.vote_average),
            genres: detail.genres.join(", "),
            overview: detail.overview.clone(),
            badge: self.badge_for(id),
            can_collect: detail.poolable_movie().is_some(),
            recommendations: detail
                .recommendations
                .iter()
                .map(|m| DisplayItem::new(m, self.badge_for(m.id)))
                .collect(),
            is_loading: self.detail_loading,
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(error) = self.store.last_error() {
            return Some(StatusLine {
                message: format!("Request failed: {error}"),
                is_error: true,
            });
        }
        self.status.as_ref().map(|message| StatusLine {
            message: message.clone(),
            is_error: false,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view {
            View::Discover => {
                "search <q>  trending  genre <name>  next/prev  detail <ref>  add <ref>  board"
            }
            View::Detail(_) => "add  rank <tier>  discover  board",
            View::Board => {
                "rank <ref> <tier>  move <ref> <tier|pool> [before <ref>]  unrank <ref>  remove <ref>  export [name]"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
