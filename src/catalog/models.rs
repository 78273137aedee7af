//! Raw catalog response shapes and their normalization.
//!
//! The catalog returns far more fields than the tier list needs. These types
//! deserialize only what is used, and the `into_*` conversions apply the one rule
//! every collection relies on: an item without a poster image is dropped.

use crate::domain::{Movie, MovieDetail, MovieId};
use serde::Deserialize;

/// Base URL poster and backdrop references are appended to.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Maximum number of recommendations kept for the detail view.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// One page of movie results, as returned by search, discover, trending and
/// recommendations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<RawMovie>,
}

/// A single result item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawGenre {
    pub id: u32,
    pub name: String,
}

/// Response of the single-movie detail endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
}

/// Joins an image reference onto the image base URL.
///
/// Returns `None` for a missing or blank reference.
#[must_use]
pub fn image_url(image_base_url: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    Some(format!("{}{path}", image_base_url.trim_end_matches('/')))
}

impl RawMovie {
    /// Converts to a [`Movie`], or `None` if the item has no poster.
    #[must_use]
    pub fn into_movie(self, image_base_url: &str) -> Option<Movie> {
        let poster_url = image_url(image_base_url, self.poster_path.as_deref())?;
        Some(Movie {
            id: self.id,
            title: self.title.unwrap_or_default(),
            poster_url,
        })
    }
}

impl RawMoviePage {
    /// Normalizes every result, dropping posterless items and keeping order.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchtier::catalog::RawMoviePage;
    ///
    /// let page: RawMoviePage = serde_json::from_str(r#"{
    ///     "page": 1,
    ///     "results": [
    ///         {"id": 1, "title": "Kept", "poster_path": "/kept.jpg"},
    ///         {"id": 2, "title": "Dropped", "poster_path": null}
    ///     ]
    /// }"#).unwrap();
    ///
    /// let movies = page.into_movies("https://img");
    /// assert_eq!(movies.len(), 1);
    /// assert_eq!(movies[0].poster_url, "https://img/kept.jpg");
    /// ```
    #[must_use]
    pub fn into_movies(self, image_base_url: &str) -> Vec<Movie> {
        let total = self.results.len();
        let movies: Vec<Movie> = self
            .results
            .into_iter()
            .filter_map(|raw| raw.into_movie(image_base_url))
            .collect();

        if movies.len() != total {
            tracing::trace!(
                dropped = total - movies.len(),
                "filtered results without poster"
            );
        }
        movies
    }
}

impl RawMovieDetail {
    /// Builds the detail view model data.
    ///
    /// A detail without a poster still renders; its `movie.poster_url` is empty
    /// and [`MovieDetail::poolable_movie`] refuses to hand it to the pool.
    #[must_use]
    pub fn into_detail(self, image_base_url: &str, recommendations: RawMoviePage) -> MovieDetail {
        let poster_url = image_url(image_base_url, self.poster_path.as_deref()).unwrap_or_default();
        let mut recommendations = recommendations.into_movies(image_base_url);
        recommendations.truncate(MAX_RECOMMENDATIONS);

        MovieDetail {
            movie: Movie {
                id: self.id,
                title: self.title.unwrap_or_default(),
                poster_url,
            },
            overview: self.overview.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or_default(),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            runtime: self.runtime.filter(|r| *r > 0),
            backdrop_url: image_url(image_base_url, self.backdrop_path.as_deref()),
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            recommendations,
        }
    }
}

impl MovieDetail {
    /// The movie in a shape fit for the pool, if it has a poster.
    #[must_use]
    pub fn poolable_movie(&self) -> Option<Movie> {
        (!self.movie.poster_url.is_empty()).then(|| self.movie.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_poster_is_filtered_like_null() {
        let raw = RawMovie {
            id: 9,
            title: Some("Blank".to_string()),
            poster_path: Some("  ".to_string()),
        };
        assert!(raw.into_movie(IMAGE_BASE_URL).is_none());
    }

    #[test]
    fn detail_keeps_five_recommendations_with_posters() {
        let detail: RawMovieDetail = serde_json::from_str(
            r#"{"id": 603, "title": "The Matrix", "poster_path": "/m.jpg",
                "backdrop_path": null, "overview": "Neo", "vote_average": 8.2,
                "release_date": "1999-03-30", "runtime": 136,
                "genres": [{"id": 28, "name": "Action"}]}"#,
        )
        .unwrap();
        let mut results: Vec<RawMovie> = (1..=8)
            .map(|id| RawMovie {
                id,
                title: Some(format!("R{id}")),
                poster_path: Some(format!("/r{id}.jpg")),
            })
            .collect();
        results[0].poster_path = None;
        let recs = RawMoviePage { page: 1, total_pages: 1, results };

        let detail = detail.into_detail("https://img", recs);

        assert_eq!(detail.movie.poster_url, "https://img/m.jpg");
        assert_eq!(detail.backdrop_url, None);
        assert_eq!(detail.genres, vec!["Action".to_string()]);
        let ids: Vec<MovieId> = detail.recommendations.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn posterless_detail_is_not_poolable() {
        let detail: RawMovieDetail =
            serde_json::from_str(r#"{"id": 1, "title": "No Poster"}"#).unwrap();
        let detail = detail.into_detail(IMAGE_BASE_URL, RawMoviePage::default());
        assert!(detail.poolable_movie().is_none());
    }
}
