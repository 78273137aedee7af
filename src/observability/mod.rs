//! Structured logging to a rotating file in the data directory.
//!
//! The interactive shell owns the terminal, so log output never goes to
//! stdout or stderr. Instead events are formatted by the `tracing_subscriber`
//! fmt layer and appended to `watchtier.log`:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingLog → watchtier.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `~/.local/share/watchtier/watchtier.log` by default
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Filtering**: `RUST_LOG`, then `trace_level` from config, then `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::RotatingLog;
pub use init::{init_tracing, LOG_FILE_NAME};
