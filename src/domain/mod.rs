//! Domain layer for WatchTier.
//!
//! This module contains the core domain types, independent of the HTTP catalog,
//! the terminal front end and the persistence format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie, tier and detail models
//! - [`genre`]: Browse filters
//!
//! # Examples
//!
//! ```
//! use watchtier::domain::{Movie, Result, TierId};
//!
//! fn pick() -> Result<(Movie, TierId)> {
//!     Ok((Movie::new(603, "The Matrix", "https://img/matrix.jpg"), "s".parse().unwrap()))
//! }
//! ```

pub mod error;
pub mod genre;
pub mod movie;

pub use error::{Result, WatchTierError};
pub use genre::{Genre, GENRES};
pub use movie::{default_tiers, Movie, MovieDetail, MovieId, Tier, TierId};
