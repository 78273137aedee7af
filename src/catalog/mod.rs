//! Remote movie catalog access.
//!
//! # Modules
//!
//! - `client`: The [`CatalogClient`] seam and its TMDB implementation
//! - `models`: Raw response shapes and poster-filtering normalization

pub mod client;
pub mod models;

pub use client::{CatalogClient, TmdbClient};
pub use models::{image_url, RawMovie, RawMovieDetail, RawMoviePage, IMAGE_BASE_URL};
