//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use watchtier::domain::{Movie, TierId};
//! use watchtier::ui::viewmodel::{Badge, DisplayItem};
//!
//! let movie = Movie::new(603, "The Matrix", "https://img/m.jpg");
//! let item = DisplayItem::new(&movie, Some(Badge::Ranked(TierId::S)));
//! assert_eq!(item.badge.map(|b| b.label()), Some("S".to_string()));
//! ```

use crate::domain::{Movie, MovieId, TierId};

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Header information (view title).
    pub header: HeaderInfo,

    /// The screen-specific content.
    pub body: ViewBody,

    /// Footer information (command hints).
    pub footer: FooterInfo,

    /// Feedback or error line shown above the footer.
    pub status: Option<StatusLine>,

    /// Title of the movie being dragged, for the drag overlay.
    pub dragging: Option<String>,
}

/// Screen-specific content.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    Board(BoardViewModel),
    Discover(DiscoverViewModel),
    Detail(DetailViewModel),
}

/// Where a listed movie already is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Pooled,
    Ranked(TierId),
}

impl Badge {
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Pooled => "pool".to_string(),
            Self::Ranked(tier) => tier.to_string(),
        }
    }
}

/// One movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: MovieId,
    pub title: String,
    pub badge: Option<Badge>,
}

impl DisplayItem {
    #[must_use]
    pub fn new(movie: &Movie, badge: Option<Badge>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            badge,
        }
    }
}

/// The five tier rows followed by the unranked pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewModel {
    pub rows: Vec<TierRow>,
    pub pool: Vec<DisplayItem>,
}

/// A single tier row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRow {
    pub label: String,

    /// Hex color of the row label.
    pub color: String,

    pub items: Vec<DisplayItem>,
}

/// Search results or a browse listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverViewModel {
    /// "Search Results", "Trending Now" or "<Genre> Movies".
    pub section_title: String,

    /// Current search input.
    pub query: String,

    pub items: Vec<DisplayItem>,

    /// Page of the browse listing; `None` while showing search results.
    pub page: Option<u32>,

    pub is_loading: bool,

    /// Shown instead of the list when it is empty.
    pub empty_state: Option<EmptyState>,
}

/// One movie in depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: MovieId,
    pub title: String,
    pub year: Option<String>,

    /// Formatted as `"2h 16m"`.
    pub runtime: Option<String>,

    /// Average vote with one decimal.
    pub rating: String,

    /// Comma-separated genre names.
    pub genres: String,

    pub overview: String,
    pub badge: Option<Badge>,

    /// Whether the movie can be added to the pool (it has a poster).
    pub can_collect: bool,

    pub recommendations: Vec<DisplayItem>,
    pub is_loading: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current view.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Status line below the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}
