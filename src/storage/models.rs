//! Persisted record layout.
//!
//! Only the pool and the tier rows are persisted. Search results, browse results
//! and every loading/paging flag are ephemeral and never reach this type.

use crate::domain::{default_tiers, Movie, MovieId, Tier, TierId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The single persisted record.
///
/// # File Format
///
/// ```json
/// {
///   "tiers": [
///     { "id": "S", "label": "S", "color": "#ef4444",
///       "movies": [{ "id": 603, "title": "The Matrix", "poster_path": "https://..." }] }
///   ],
///   "pool": [{ "id": 27205, "title": "Inception", "poster_path": "https://..." }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBoard {
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,

    #[serde(default)]
    pub pool: Vec<Movie>,
}

impl Default for PersistedBoard {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            pool: Vec::new(),
        }
    }
}

impl PersistedBoard {
    /// Rebuilds a well-formed board from whatever was on disk.
    ///
    /// Tier definitions always come from the built-in defaults; only the movie
    /// sequences are taken from the record, matched by tier id. Unknown or
    /// repeated tier entries are ignored. A movie id may appear only once across
    /// all tiers and the pool: tiers are scanned S to D, then the pool, and later
    /// duplicates are dropped.
    ///
    /// Returns the repaired board and the number of dropped duplicates.
    #[must_use]
    pub fn normalized(self) -> (Self, usize) {
        let mut seen: HashSet<MovieId> = HashSet::new();
        let mut dropped = 0;
        let mut tiers = default_tiers();
        let mut filled: HashSet<TierId> = HashSet::new();

        for record in self.tiers {
            if !filled.insert(record.id) {
                continue;
            }
            let slot = &mut tiers[record.id.index()];
            for movie in record.movies {
                if seen.insert(movie.id) {
                    slot.movies.push(movie);
                } else {
                    dropped += 1;
                }
            }
        }

        let mut pool = Vec::with_capacity(self.pool.len());
        for movie in self.pool {
            if seen.insert(movie.id) {
                pool.push(movie);
            } else {
                dropped += 1;
            }
        }

        (Self { tiers, pool }, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> Movie {
        Movie::new(id, format!("Movie {id}"), format!("https://img/{id}.jpg"))
    }

    #[test]
    fn normalized_drops_cross_container_duplicates() {
        let mut a = Tier::empty(TierId::A);
        a.movies = vec![movie(1), movie(2)];
        let mut c = Tier::empty(TierId::C);
        c.movies = vec![movie(2)];
        let board = PersistedBoard {
            tiers: vec![c, a],
            pool: vec![movie(1), movie(3)],
        };

        let (fixed, dropped) = board.normalized();

        assert_eq!(dropped, 2);
        assert_eq!(fixed.tiers[TierId::A.index()].movies, vec![movie(1), movie(2)]);
        assert!(fixed.tiers[TierId::C.index()].movies.is_empty());
        assert_eq!(fixed.pool, vec![movie(3)]);
    }

    #[test]
    fn missing_fields_default_to_empty_board() {
        let board: PersistedBoard = serde_json::from_str("{}").unwrap();
        assert_eq!(board, PersistedBoard::default());
    }

    #[test]
    fn tier_definitions_come_from_defaults() {
        let mut s = Tier::empty(TierId::S);
        s.label = "Best".to_string();
        s.color = "#000000".to_string();
        let (fixed, _) = PersistedBoard { tiers: vec![s], pool: vec![] }.normalized();
        assert_eq!(fixed.tiers[0], Tier::empty(TierId::S));
        assert_eq!(fixed.tiers.len(), 5);
    }
}
