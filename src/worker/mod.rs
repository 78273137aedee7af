//! Background worker for catalog requests.
//!
//! The worker keeps network I/O off the event loop. Requests are posted as
//! [`WorkerMessage`]s and answered asynchronously with [`WorkerResponse`]s, which
//! the runtime feeds back into the event handler.
//!
//! # Architecture
//!
//! - `messages`: Sequence-stamped request/response protocol types
//! - `handler`: Task-per-request worker and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{fetch_detail, handle_message, CatalogWorker};
pub use messages::{WorkerMessage, WorkerResponse};
