//! Worker message types for catalog requests.
//!
//! This module defines the request and response protocol between the event
//! handler and the background catalog worker. Search, browse and detail requests
//! carry the sequence number the store handed out for them, and their responses
//! echo it back so the store can discard responses that arrive after a newer one.
//! Lookups are awaited by the command that posted them and need no sequence.

use crate::app::store::BrowseRequest;
use crate::domain::{Movie, MovieDetail, MovieId};

/// Messages sent from the event handler to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Free-text movie search.
    Search {
        /// Sequence stamped by the store.
        seq: u64,

        /// Trimmed, non-empty query.
        query: String,
    },

    /// Trending or genre listing page.
    Browse {
        /// Request stamped by the store, carrying kind and page.
        request: BrowseRequest,
    },

    /// Movie detail plus recommendations.
    Detail {
        /// Sequence stamped by the application state.
        seq: u64,

        /// Movie to describe.
        id: MovieId,
    },

    /// A single movie resolved for the collection; leaves the detail view alone.
    Lookup { id: MovieId },
}

impl WorkerMessage {
    /// Short name used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::Browse { .. } => "browse",
            Self::Detail { .. } => "detail",
            Self::Lookup { .. } => "lookup",
        }
    }
}

/// Responses sent from the worker back to the event loop.
///
/// Failures are carried as display strings; the store records them for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// A search finished.
    SearchCompleted {
        seq: u64,

        /// Normalized results, or the failure message.
        outcome: Result<Vec<Movie>, String>,
    },

    /// A browse page finished.
    BrowseCompleted {
        request: BrowseRequest,

        /// Normalized results, or the failure message.
        outcome: Result<Vec<Movie>, String>,
    },

    /// A detail lookup finished.
    DetailCompleted {
        seq: u64,
        id: MovieId,

        /// Detail with up to five recommendations, or the failure message.
        outcome: Result<MovieDetail, String>,
    },

    /// A lookup finished. `None` means the movie has no poster and cannot be
    /// collected.
    LookupCompleted {
        id: MovieId,
        outcome: Result<Option<Movie>, String>,
    },
}
