//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or worker
//! responses. Actions bridge pure state transitions and effectful operations like
//! network requests or writing an export file.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued together. The runtime executes them in
//! order.
//!
//! # Example
//!
//! ```rust
//! use watchtier::app::Action;
//! use watchtier::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::Detail { seq: 1, id: 603 }),
//!     Action::Export { base_name: "tier-list".to_string() },
//! ];
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a catalog request to the background worker.
    ///
    /// The response arrives later as an `Event::Worker`.
    PostToWorker(WorkerMessage),

    /// Writes the plain board rendering to `<export dir>/<base_name>.txt`.
    Export {
        /// File name without extension.
        base_name: String,
    },
}
