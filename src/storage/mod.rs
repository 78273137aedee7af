//! Storage layer for the persisted pool and tier rows.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: The persisted record layout

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use models::PersistedBoard;

/// File name of the persisted record inside the data directory.
pub const STORAGE_FILE_NAME: &str = "tier-list-storage.json";
