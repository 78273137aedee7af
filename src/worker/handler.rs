//! Background catalog worker.
//!
//! Each posted message is served by its own tokio task so that a slow request
//! never blocks the event loop or the requests behind it. Responses come back on
//! an unbounded channel in completion order, which is not necessarily dispatch
//! order; the store sorts that out by sequence number.

use crate::app::store::fetch_browse_page;
use crate::catalog::{CatalogClient, RawMoviePage};
use crate::domain::{MovieDetail, MovieId};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Handle used to post catalog requests.
///
/// Cloning is cheap; clones share the client and the response channel. Every
/// posted message produces exactly one response.
#[derive(Clone)]
pub struct CatalogWorker {
    catalog: Arc<dyn CatalogClient>,
    responses: mpsc::UnboundedSender<WorkerResponse>,
}

impl CatalogWorker {
    /// Creates a worker and the receiver its responses arrive on.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogClient>) -> (Self, mpsc::UnboundedReceiver<WorkerResponse>) {
        let (responses, rx) = mpsc::unbounded_channel();
        (Self { catalog, responses }, rx)
    }

    /// Spawns a task serving `message`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn post(&self, message: WorkerMessage) {
        let span = tracing::debug_span!("worker_handle_message", kind = message.kind());
        let catalog = Arc::clone(&self.catalog);
        let responses = self.responses.clone();

        tokio::spawn(
            async move {
                let response = handle_message(catalog.as_ref(), message).await;
                if responses.send(response).is_err() {
                    tracing::debug!("event loop gone, response dropped");
                }
            }
            .instrument(span),
        );
    }
}

/// Serves one message against `catalog`.
pub async fn handle_message(catalog: &dyn CatalogClient, message: WorkerMessage) -> WorkerResponse {
    match message {
        WorkerMessage::Search { seq, query } => {
            let outcome = catalog
                .search(&query)
                .await
                .map(|page| page.into_movies(catalog.image_base_url()))
                .map_err(|e| e.to_string());
            log_outcome("search", outcome.as_ref().map(Vec::len));
            WorkerResponse::SearchCompleted { seq, outcome }
        }

        WorkerMessage::Browse { request } => {
            let outcome = fetch_browse_page(catalog, request).await;
            log_outcome("browse", outcome.as_ref().map(Vec::len));
            WorkerResponse::BrowseCompleted { request, outcome }
        }

        WorkerMessage::Detail { seq, id } => {
            let outcome = fetch_detail(catalog, id).await;
            log_outcome("detail", outcome.as_ref().map(|d| d.recommendations.len()));
            WorkerResponse::DetailCompleted { seq, id, outcome }
        }

        WorkerMessage::Lookup { id } => {
            let outcome = catalog
                .detail(id)
                .await
                .map(|raw| {
                    raw.into_detail(catalog.image_base_url(), RawMoviePage::default())
                        .poolable_movie()
                })
                .map_err(|e| e.to_string());
            log_outcome("lookup", outcome.as_ref().map(|m| usize::from(m.is_some())));
            WorkerResponse::LookupCompleted { id, outcome }
        }
    }
}

/// Fetches a movie and its recommendations concurrently.
///
/// A failed recommendations call degrades to an empty list; a failed detail call
/// fails the whole lookup.
pub async fn fetch_detail(catalog: &dyn CatalogClient, id: MovieId) -> Result<MovieDetail, String> {
    let (detail, recommendations) = tokio::join!(catalog.detail(id), catalog.recommendations(id));

    let detail = detail.map_err(|e| e.to_string())?;
    let recommendations = recommendations.unwrap_or_else(|e| {
        tracing::warn!(movie_id = id, error = %e, "recommendations unavailable");
        RawMoviePage::default()
    });

    Ok(detail.into_detail(catalog.image_base_url(), recommendations))
}

fn log_outcome(operation: &str, outcome: Result<usize, &String>) {
    match outcome {
        Ok(count) => tracing::debug!(operation, count, "catalog request successful"),
        Err(e) => tracing::debug!(operation, error = %e, "catalog request failed"),
    }
}
