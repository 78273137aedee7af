//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over persistence
//! backends. The collection store writes through it on every effective mutation,
//! so the trait only needs the two operations that use case requires.

use crate::domain::error::Result;
use crate::storage::models::PersistedBoard;

/// Abstraction over persistent storage backends for the pool and tier rows.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
///
/// # Examples
///
/// ```no_run
/// use watchtier::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/tier-list-storage.json"))?;
/// let board = storage.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Reads the persisted board.
    ///
    /// Returns `Ok(None)` if nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<PersistedBoard>>;

    /// Replaces the persisted board.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn save(&mut self, board: &PersistedBoard) -> Result<()>;
}
