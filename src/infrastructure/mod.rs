//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where WatchTier keeps its files: the data directory
//! holding the persisted tier list and the log, and the config file.

pub mod paths;

pub use paths::{default_config_path, default_data_dir, expand_tilde};
