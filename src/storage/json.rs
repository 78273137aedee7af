//! JSON file-based storage backend.
//!
//! This module provides a human-readable storage implementation using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) so the
//! record is never left half written.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the whole record once
//! - **Write**: serializes and writes the whole record on every mutation
//! - **Best for**: personal collections of a few hundred movies

use crate::domain::error::{Result, WatchTierError};
use crate::storage::backend::Storage;
use crate::storage::models::PersistedBoard;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// Keeps a copy of the last written board so that saves which would not change
/// the file are skipped.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the collection store, which
/// has a single owner.
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Board as last read from or written to disk.
    last_written: Option<PersistedBoard>,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// Parent directories are created automatically. The file itself is only
    /// created on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use watchtier::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/tier-list-storage.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tracing::debug!(parent = ?parent, "creating parent directory");
                std::fs::create_dir_all(parent)?;
            }
        }

        let last_written = if file_path.exists() {
            Some(Self::load_from_file(&file_path)?)
        } else {
            tracing::debug!("no persisted board yet");
            None
        };

        Ok(Self {
            file_path,
            last_written,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the board from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<PersistedBoard> {
        let contents = std::fs::read_to_string(path)?;
        let board: PersistedBoard = serde_json::from_str(&contents)
            .map_err(|e| WatchTierError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            tiers = board.tiers.len(),
            pool = board.pool.len(),
            "loaded storage data"
        );

        Ok(board)
    }

    /// Writes the board to disk using an atomic rename.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    fn write_to_file(&self, board: &PersistedBoard) -> Result<()> {
        let json = serde_json::to_string_pretty(board)
            .map_err(|e| WatchTierError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        Ok(())
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<Option<PersistedBoard>> {
        let _span = tracing::debug_span!("json_load", path = ?self.file_path).entered();

        if self.file_path.exists() {
            Self::load_from_file(&self.file_path).map(Some)
        } else {
            Ok(None)
        }
    }

    fn save(&mut self, board: &PersistedBoard) -> Result<()> {
        let _span = tracing::debug_span!("json_save",
            pool = board.pool.len(),
            ranked = board.tiers.iter().map(|t| t.movies.len()).sum::<usize>()
        ).entered();

        if self.last_written.as_ref() == Some(board) {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        self.write_to_file(board)?;
        self.last_written = Some(board.clone());

        tracing::debug!("storage saved successfully");
        Ok(())
    }
}
