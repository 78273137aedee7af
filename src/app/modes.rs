//! View state types for the application.
//!
//! The application shows one of three views at a time. Switching views never
//! touches the collections; it only changes what the renderer draws and which
//! catalog requests the handler issues.
//!
//! # Example
//!
//! ```rust
//! use watchtier::app::modes::View;
//!
//! let view = View::Detail(603);
//! assert_eq!(view.title(), "Movie Detail");
//! ```

use crate::domain::MovieId;

/// Which screen is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Search and browse listings.
    ///
    /// Shows search results while a query is active, otherwise the trending or
    /// genre listing for the current page.
    #[default]
    Discover,

    /// Detail page of one movie with its recommendations.
    Detail(MovieId),

    /// The five tier rows and the unranked pool.
    Board,
}

impl View {
    /// Header title of the view.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Discover => "Discover",
            Self::Detail(_) => "Movie Detail",
            Self::Board => "Tier List",
        }
    }
}
