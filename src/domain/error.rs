//! Error types for WatchTier.
//!
//! This module defines the centralized error type [`WatchTierError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Mutation misuse (unknown ids, invalid reorder indices) is never an error: store
//! operations report those as explicit no-op results instead.

use thiserror::Error;

/// The main error type for WatchTier operations.
///
/// Consolidates every failure that can escape a library call, from persistence
/// and catalog requests to configuration problems. Variants wrapping foreign
/// errors use `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use watchtier::domain::WatchTierError;
///
/// fn validate_config() -> Result<(), WatchTierError> {
///     Err(WatchTierError::Config("missing api_key".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum WatchTierError {
    /// Persisting or loading the pool and tiers failed.
    ///
    /// The string describes what went wrong (serialization, invalid file
    /// contents, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP transport failed or the catalog answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered, but the response could not be used.
    ///
    /// Covers malformed bodies and missing mandatory fields on detail lookups.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The catalog worker could not accept or deliver a message.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the config file is malformed or a required value such as the
    /// API key is absent.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for WatchTier operations.
pub type Result<T> = std::result::Result<T, WatchTierError>;
