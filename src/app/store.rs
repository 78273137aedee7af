//! The collection store: search results, browse results, the unranked pool and
//! the five tier rows.
//!
//! [`TierStore`] is the single owner of canonical pool and tier state. Every
//! mutation takes `&mut self`, so observers only ever see the state before or
//! after it. Effective mutations are written through to the configured
//! [`Storage`] immediately; search and browse results, the loading flag, the
//! active genre and the current page are never persisted.
//!
//! # Invariant
//!
//! Outside a mutation, a movie id appears in at most one of {pool, tier S, A, B,
//! C, D}. Search and browse results are independent views and may overlap with
//! either; [`TierStore::placement_of`] resolves membership for rendering.
//!
//! # Fetches
//!
//! Catalog fetches come in two forms. The `begin_*` / `finish_*` pairs let many
//! requests be in flight at once (the worker path): each request is stamped with
//! an increasing sequence number and a response older than the newest applied
//! response of the same kind is discarded. The `async` helpers
//! ([`TierStore::search_movies`], [`TierStore::fetch_trending`],
//! [`TierStore::fetch_movies_by_genre`]) run one request to completion through
//! the same pair.
//!
//! A failed fetch leaves the previously displayed results in place, clears the
//! loading flag and records the error in [`TierStore::last_error`]. Search, browse
//! and detail failures all follow this policy.

use crate::catalog::CatalogClient;
use crate::domain::error::Result;
use crate::domain::{default_tiers, Movie, MovieId, Tier, TierId};
use crate::storage::{PersistedBoard, Storage};

/// Where a movie currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Pool,
    Tier(TierId),
    Unplaced,
}

/// Result of [`TierStore::add_movie_to_tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierToggle {
    /// The movie was appended to the target tier.
    Placed,
    /// The movie already was in the target tier and has been taken out of it.
    ToggledOff,
}

/// What a search request turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStart {
    /// The query was blank; results were cleared and nothing needs fetching.
    Cleared,
    /// A request must be issued for `query` and answered with `seq`.
    Dispatch { seq: u64, query: String },
}

/// Which browse listing a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKind {
    Trending,
    Genre(u32),
}

impl BrowseKind {
    /// Genre filter recorded in the store, `None` for trending.
    #[must_use]
    pub const fn genre(self) -> Option<u32> {
        match self {
            Self::Trending => None,
            Self::Genre(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn from_genre(genre: Option<u32>) -> Self {
        match genre {
            None => Self::Trending,
            Some(id) => Self::Genre(id),
        }
    }
}

/// A browse request that must be issued and answered with `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseRequest {
    pub seq: u64,
    pub kind: BrowseKind,
    pub page: u32,
}

/// How a catalog response was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A blank search cleared the results without a request.
    Cleared,
    /// Results were replaced with this many movies.
    Applied(usize),
    /// The request failed; previous results were left in place.
    Failed(String),
    /// A newer response had already been applied; this one was discarded.
    Stale,
}

/// Sequence bookkeeping for one kind of request.
#[derive(Debug, Clone, Copy, Default)]
struct RequestTrack {
    /// Newest sequence handed out.
    dispatched: u64,
    /// Newest sequence whose response was applied (or that cleared the results).
    applied: u64,
    /// Whether the newest dispatched request is still outstanding.
    pending: bool,
}

impl RequestTrack {
    fn dispatch(&mut self, seq: u64) {
        self.dispatched = seq;
        self.pending = true;
    }

    /// Records an arrival and reports whether it is fresh enough to apply.
    fn arrive(&mut self, seq: u64) -> bool {
        if seq == self.dispatched {
            self.pending = false;
        }
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }
}

/// Central state container for collections and tier rows.
pub struct TierStore {
    tiers: Vec<Tier>,
    pool: Vec<Movie>,
    search_results: Vec<Movie>,
    browse_results: Vec<Movie>,
    active_genre: Option<u32>,
    current_page: u32,
    last_error: Option<String>,
    next_seq: u64,
    search: RequestTrack,
    browse: RequestTrack,
    storage: Option<Box<dyn Storage>>,
}

impl std::fmt::Debug for TierStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierStore")
            .field("tiers", &self.tiers)
            .field("pool", &self.pool)
            .field("search_results", &self.search_results.len())
            .field("browse_results", &self.browse_results.len())
            .field("active_genre", &self.active_genre)
            .field("current_page", &self.current_page)
            .field("persistent", &self.storage.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TierStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl TierStore {
    /// Creates an empty store that persists nothing.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tiers: default_tiers(),
            pool: Vec::new(),
            search_results: Vec::new(),
            browse_results: Vec::new(),
            active_genre: None,
            current_page: 1,
            last_error: None,
            next_seq: 0,
            search: RequestTrack::default(),
            browse: RequestTrack::default(),
            storage: None,
        }
    }

    /// Creates a store backed by `storage`, loading whatever it holds.
    ///
    /// The loaded board is repaired if it breaks the uniqueness invariant; a
    /// repaired board is written back immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted record cannot be read, or the repaired
    /// record cannot be written back.
    pub fn with_storage(storage: Box<dyn Storage>) -> Result<Self> {
        let _span = tracing::debug_span!("store_load").entered();

        let loaded = storage.load()?;
        let mut store = Self::in_memory();
        store.storage = Some(storage);

        if let Some(board) = loaded {
            let (board, dropped) = board.normalized();
            store.tiers = board.tiers;
            store.pool = board.pool;

            if dropped > 0 {
                tracing::warn!(dropped, "persisted board held duplicate movies, repaired");
                store.persist()?;
            }
        }

        tracing::debug!(
            pool = store.pool.len(),
            ranked = store.ranked_count(),
            "store loaded"
        );
        Ok(store)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// The five tiers, S first.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn tier(&self, id: TierId) -> &Tier {
        &self.tiers[id.index()]
    }

    /// The unranked collection, most recently added first.
    #[must_use]
    pub fn pool(&self) -> &[Movie] {
        &self.pool
    }

    #[must_use]
    pub fn search_results(&self) -> &[Movie] {
        &self.search_results
    }

    #[must_use]
    pub fn browse_results(&self) -> &[Movie] {
        &self.browse_results
    }

    /// Whether the newest search or browse request is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.search.pending || self.browse.pending
    }

    /// Genre of the displayed browse results, `None` for trending.
    #[must_use]
    pub const fn active_genre(&self) -> Option<u32> {
        self.active_genre
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of movies across all tiers.
    #[must_use]
    pub fn ranked_count(&self) -> usize {
        self.tiers.iter().map(|t| t.movies.len()).sum()
    }

    /// Tier and index holding `id`, if it is ranked.
    #[must_use]
    pub fn find_ranked(&self, id: MovieId) -> Option<(TierId, usize)> {
        self.tiers
            .iter()
            .find_map(|t| t.position(id).map(|idx| (t.id, idx)))
    }

    /// Resolves where `id` lives among the persisted containers.
    #[must_use]
    pub fn placement_of(&self, id: MovieId) -> Placement {
        if self.pool.iter().any(|m| m.id == id) {
            return Placement::Pool;
        }
        self.find_ranked(id)
            .map_or(Placement::Unplaced, |(tier, _)| Placement::Tier(tier))
    }

    /// Looks a movie up in every collection: tiers, pool, search and browse
    /// results, in that order.
    #[must_use]
    pub fn find_movie(&self, id: MovieId) -> Option<&Movie> {
        self.tiers
            .iter()
            .flat_map(|t| t.movies.iter())
            .chain(self.pool.iter())
            .chain(self.search_results.iter())
            .chain(self.browse_results.iter())
            .find(|m| m.id == id)
    }

    /// The persisted shape of the current pool and tiers.
    #[must_use]
    pub fn snapshot(&self) -> PersistedBoard {
        PersistedBoard {
            tiers: self.tiers.clone(),
            pool: self.pool.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Pool and tier mutations
    // ---------------------------------------------------------------------

    /// Inserts `movie` at the front of the pool.
    ///
    /// No-op (returns `false`) if the id is already in the pool or any tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn add_to_pool(&mut self, movie: Movie) -> Result<bool> {
        let _span = tracing::debug_span!("add_to_pool", movie_id = movie.id).entered();

        if self.placement_of(movie.id) != Placement::Unplaced {
            tracing::debug!("movie already collected");
            return Ok(false);
        }

        self.pool.insert(0, movie);
        self.persist()?;
        Ok(true)
    }

    /// Removes the movie with `id` from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn remove_from_pool(&mut self, id: MovieId) -> Result<bool> {
        let _span = tracing::debug_span!("remove_from_pool", movie_id = id).entered();

        let before = self.pool.len();
        self.pool.retain(|m| m.id != id);
        if self.pool.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Places `movie` in `tier`, or takes it out if it is already there.
    ///
    /// The id is stripped from the pool and from every tier. The target tier then
    /// receives an append only if it did not hold the movie before the call, so
    /// adding a movie to the tier it already sits in removes it from the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn add_movie_to_tier(&mut self, movie: Movie, tier: TierId) -> Result<TierToggle> {
        let _span = tracing::debug_span!("add_movie_to_tier", movie_id = movie.id, tier = %tier).entered();

        let already_there = self.tier(tier).contains(movie.id);

        self.pool.retain(|m| m.id != movie.id);
        for row in &mut self.tiers {
            row.movies.retain(|m| m.id != movie.id);
        }

        let toggle = if already_there {
            TierToggle::ToggledOff
        } else {
            self.tiers[tier.index()].movies.push(movie);
            TierToggle::Placed
        };

        tracing::debug!(?toggle, "tier placement applied");
        self.persist()?;
        Ok(toggle)
    }

    /// Replaces the movie sequence of `tier` wholesale.
    ///
    /// No membership validation is done; callers supply a reordering of the row
    /// or a row differing by the single movie they are moving.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn update_tier_movies(&mut self, tier: TierId, movies: Vec<Movie>) -> Result<bool> {
        let _span = tracing::debug_span!("update_tier_movies", tier = %tier, len = movies.len()).entered();

        let row = &mut self.tiers[tier.index()];
        if row.movies == movies {
            return Ok(false);
        }
        row.movies = movies;

        self.persist()?;
        Ok(true)
    }

    /// Replaces two rows at once and persists a single time.
    ///
    /// Used for cross-tier drops, where the source row loses the movie the
    /// destination row gains. Both rows change in memory before the save, so a
    /// failed save never leaves the movie in neither row.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn move_between(
        &mut self,
        from: TierId,
        source: Vec<Movie>,
        to: TierId,
        destination: Vec<Movie>,
    ) -> Result<bool> {
        let _span = tracing::debug_span!("move_between", from = %from, to = %to).entered();

        if from == to {
            return self.update_tier_movies(to, destination);
        }
        if self.tiers[from.index()].movies == source && self.tiers[to.index()].movies == destination {
            return Ok(false);
        }
        self.tiers[from.index()].movies = source;
        self.tiers[to.index()].movies = destination;

        self.persist()?;
        Ok(true)
    }

    /// Removes the movie with `id` from `tier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn remove_movie_from_tier(&mut self, id: MovieId, tier: TierId) -> Result<bool> {
        let _span = tracing::debug_span!("remove_movie_from_tier", movie_id = id, tier = %tier).entered();

        let row = &mut self.tiers[tier.index()];
        let before = row.movies.len();
        row.movies.retain(|m| m.id != id);
        if row.movies.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Moves `movie` out of `tier` and onto the front of the pool.
    ///
    /// The pool insert is skipped if the movie is already pooled or still ranked
    /// in a different tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn unrank_movie(&mut self, movie: Movie, tier: TierId) -> Result<bool> {
        let _span = tracing::debug_span!("unrank_movie", movie_id = movie.id, tier = %tier).entered();

        let row = &mut self.tiers[tier.index()];
        let before = row.movies.len();
        row.movies.retain(|m| m.id != movie.id);
        let removed = row.movies.len() != before;

        let pooled = if self.placement_of(movie.id) == Placement::Unplaced {
            self.pool.insert(0, movie);
            true
        } else {
            false
        };

        if !removed && !pooled {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Moves every ranked movie into the pool, then empties all tiers.
    ///
    /// Ranked movies are appended after the current pool in tier order (S first),
    /// skipping ids the pool already holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn reset_tier_list(&mut self) -> Result<bool> {
        let _span = tracing::debug_span!("reset_tier_list", ranked = self.ranked_count()).entered();

        if self.ranked_count() == 0 {
            return Ok(false);
        }

        for row in &mut self.tiers {
            for movie in row.movies.drain(..) {
                if !self.pool.iter().any(|m| m.id == movie.id) {
                    self.pool.push(movie);
                }
            }
        }

        tracing::debug!(pool = self.pool.len(), "tiers emptied into pool");
        self.persist()?;
        Ok(true)
    }

    /// Empties the pool, the tiers and all results, restoring default tier
    /// definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn reset_all(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("reset_all").entered();

        self.tiers = default_tiers();
        self.pool.clear();
        self.search_results.clear();
        self.browse_results.clear();
        self.last_error = None;

        // Results from requests issued before the reset must not reappear.
        let seq = self.take_seq();
        self.search.arrive(seq);
        self.browse.arrive(seq);
        self.search.pending = false;
        self.browse.pending = false;

        self.persist()
    }

    // ---------------------------------------------------------------------
    // Catalog fetches
    // ---------------------------------------------------------------------

    /// Starts a search for `query`.
    ///
    /// A blank query clears the search results immediately and supersedes any
    /// search still in flight.
    pub fn begin_search(&mut self, query: &str) -> SearchStart {
        let query = query.trim();
        let seq = self.take_seq();

        if query.is_empty() {
            self.search_results.clear();
            self.search.arrive(seq);
            self.search.pending = false;
            tracing::debug!("blank query, search results cleared");
            return SearchStart::Cleared;
        }

        self.search.dispatch(seq);
        tracing::debug!(seq, query, "search dispatched");
        SearchStart::Dispatch {
            seq,
            query: query.to_string(),
        }
    }

    /// Applies the response to search request `seq`.
    ///
    /// `outcome` carries already normalized movies (posterless items removed).
    pub fn finish_search(&mut self, seq: u64, outcome: std::result::Result<Vec<Movie>, String>) -> FetchOutcome {
        let _span = tracing::debug_span!("finish_search", seq).entered();

        if !self.search.arrive(seq) {
            tracing::debug!(applied = self.search.applied, "stale search response discarded");
            return FetchOutcome::Stale;
        }

        match outcome {
            Ok(movies) => {
                let count = movies.len();
                self.search_results = movies;
                self.last_error = None;
                tracing::debug!(count, "search results replaced");
                FetchOutcome::Applied(count)
            }
            Err(message) => {
                tracing::warn!(error = %message, "search failed");
                self.last_error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Starts a browse request for `kind` at `page` (pages start at 1).
    pub fn begin_browse(&mut self, kind: BrowseKind, page: u32) -> BrowseRequest {
        let seq = self.take_seq();
        let page = page.max(1);
        self.browse.dispatch(seq);
        tracing::debug!(seq, ?kind, page, "browse dispatched");
        BrowseRequest { seq, kind, page }
    }

    /// Applies the response to browse `request`.
    ///
    /// On success the browse results are replaced and the request's genre and page
    /// become the active ones.
    pub fn finish_browse(
        &mut self,
        request: BrowseRequest,
        outcome: std::result::Result<Vec<Movie>, String>,
    ) -> FetchOutcome {
        let _span = tracing::debug_span!("finish_browse", seq = request.seq).entered();

        if !self.browse.arrive(request.seq) {
            tracing::debug!(applied = self.browse.applied, "stale browse response discarded");
            return FetchOutcome::Stale;
        }

        match outcome {
            Ok(movies) => {
                let count = movies.len();
                self.browse_results = movies;
                self.active_genre = request.kind.genre();
                self.current_page = request.page;
                self.last_error = None;
                tracing::debug!(count, page = request.page, "browse results replaced");
                FetchOutcome::Applied(count)
            }
            Err(message) => {
                tracing::warn!(error = %message, "browse fetch failed");
                self.last_error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Records a failure outside search and browse (detail lookups).
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "catalog request failed");
        self.last_error = Some(message);
    }

    /// Searches the catalog and replaces the search results.
    pub async fn search_movies(&mut self, catalog: &dyn CatalogClient, query: &str) -> FetchOutcome {
        match self.begin_search(query) {
            SearchStart::Cleared => FetchOutcome::Cleared,
            SearchStart::Dispatch { seq, query } => {
                let outcome = catalog
                    .search(&query)
                    .await
                    .map(|page| page.into_movies(catalog.image_base_url()))
                    .map_err(|e| e.to_string());
                self.finish_search(seq, outcome)
            }
        }
    }

    /// Fetches a page of this week's trending movies into the browse results.
    pub async fn fetch_trending(&mut self, catalog: &dyn CatalogClient, page: u32) -> FetchOutcome {
        let request = self.begin_browse(BrowseKind::Trending, page);
        let outcome = fetch_browse_page(catalog, request).await;
        self.finish_browse(request, outcome)
    }

    /// Fetches a page of popular movies in `genre_id` into the browse results.
    pub async fn fetch_movies_by_genre(
        &mut self,
        catalog: &dyn CatalogClient,
        genre_id: u32,
        page: u32,
    ) -> FetchOutcome {
        let request = self.begin_browse(BrowseKind::Genre(genre_id), page);
        let outcome = fetch_browse_page(catalog, request).await;
        self.finish_browse(request, outcome)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn take_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Writes pool and tiers through to storage, if any.
    fn persist(&mut self) -> Result<()> {
        let board = self.snapshot();
        let Some(storage) = self.storage.as_mut() else {
            return Ok(());
        };
        if let Err(e) = storage.save(&board) {
            tracing::error!(error = %e, "failed to persist tier list");
            return Err(e);
        }
        Ok(())
    }
}

/// Runs the catalog call a browse request stands for and normalizes the page.
pub async fn fetch_browse_page(
    catalog: &dyn CatalogClient,
    request: BrowseRequest,
) -> std::result::Result<Vec<Movie>, String> {
    let page = match request.kind {
        BrowseKind::Trending => catalog.trending(request.page).await,
        BrowseKind::Genre(genre_id) => catalog.discover(genre_id, request.page).await,
    };
    page.map(|p| p.into_movies(catalog.image_base_url()))
        .map_err(|e| e.to_string())
}
