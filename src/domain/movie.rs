//! Movie and tier domain models.
//!
//! This module defines the values that flow through every layer of the crate: the
//! minimal [`Movie`] shape produced by the catalog, the fixed set of [`TierId`]s,
//! and the [`Tier`] rows that hold ranked movies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog-assigned movie identifier.
pub type MovieId = u64;

/// A movie as known to the tier list.
///
/// Immutable once fetched; identity is `id`. The poster is stored as a fully
/// renderable URL. On disk the URL lives under the `poster_path` key so the
/// persisted layout keeps the field names it has always had.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(rename = "poster_path")]
    pub poster_url: String,
}

impl Movie {
    /// Creates a movie value.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchtier::domain::Movie;
    ///
    /// let movie = Movie::new(27205, "Inception", "https://image.tmdb.org/t/p/w500/inception.jpg");
    /// assert_eq!(movie.id, 27205);
    /// ```
    #[must_use]
    pub fn new(id: MovieId, title: impl Into<String>, poster_url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_url: poster_url.into(),
        }
    }
}

/// Identity of one of the five fixed tier rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierId {
    S,
    A,
    B,
    C,
    D,
}

impl TierId {
    /// All tiers, best first. This is also the display and storage order.
    pub const ALL: [Self; 5] = [Self::S, Self::A, Self::B, Self::C, Self::D];

    /// Single-letter name of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Default display color of the tier row.
    #[must_use]
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::S => "#ef4444",
            Self::A => "#f97316",
            Self::B => "#eab308",
            Self::C => "#84cc16",
            Self::D => "#22c55e",
        }
    }

    /// Position of the tier in [`TierId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(format!("unknown tier '{other}', expected one of S, A, B, C, D")),
        }
    }
}

/// One ranked row of the tier list.
///
/// Tier identity, label and color are fixed; only `movies` changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    pub label: String,
    pub color: String,
    pub movies: Vec<Movie>,
}

impl Tier {
    /// Creates an empty tier with its default label and color.
    #[must_use]
    pub fn empty(id: TierId) -> Self {
        Self {
            id,
            label: id.as_str().to_string(),
            color: id.default_color().to_string(),
            movies: Vec::new(),
        }
    }

    /// Returns whether the tier holds a movie with `id`.
    #[must_use]
    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    /// Index of the movie with `id` within the row.
    #[must_use]
    pub fn position(&self, id: MovieId) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }
}

/// The five tiers in their default, empty state.
///
/// # Examples
///
/// ```
/// use watchtier::domain::{default_tiers, TierId};
///
/// let tiers = default_tiers();
/// assert_eq!(tiers.len(), 5);
/// assert_eq!(tiers[0].id, TierId::S);
/// assert!(tiers.iter().all(|t| t.movies.is_empty()));
/// ```
#[must_use]
pub fn default_tiers() -> Vec<Tier> {
    TierId::ALL.into_iter().map(Tier::empty).collect()
}

/// Extended information shown on the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie: Movie,
    pub overview: String,
    pub vote_average: f64,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub backdrop_url: Option<String>,
    pub genres: Vec<String>,
    /// Up to five recommended movies, posterless entries already removed.
    pub recommendations: Vec<Movie>,
}

impl MovieDetail {
    /// Release year, taken from the `YYYY-MM-DD` release date.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }
}
