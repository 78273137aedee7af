//! HTTP client for the movie metadata catalog.
//!
//! [`CatalogClient`] is the seam the rest of the crate talks to. It is object safe
//! (boxed futures) so the worker can share one client across tasks and tests can
//! substitute an in-memory catalog. [`TmdbClient`] is the real implementation: one
//! GET per call, fixed `api_key` and `language` parameters, no caching or retry.

use super::models::{RawMovieDetail, RawMoviePage};
use crate::domain::error::{Result, WatchTierError};
use crate::domain::MovieId;
use crate::Config;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use tracing::Instrument;

/// Request/response access to the movie catalog.
///
/// Every method issues exactly one request. Failures (transport errors, non-2xx
/// statuses, malformed bodies) surface as `Err`; recovery is the caller's job.
pub trait CatalogClient: Send + Sync {
    /// Free-text movie search.
    fn search(&self, query: &str) -> BoxFuture<'_, Result<RawMoviePage>>;

    /// Genre-filtered discovery, most popular first.
    fn discover(&self, genre_id: u32, page: u32) -> BoxFuture<'_, Result<RawMoviePage>>;

    /// Movies trending this week.
    fn trending(&self, page: u32) -> BoxFuture<'_, Result<RawMoviePage>>;

    /// Single movie detail.
    fn detail(&self, id: MovieId) -> BoxFuture<'_, Result<RawMovieDetail>>;

    /// Recommendations for a movie.
    fn recommendations(&self, id: MovieId) -> BoxFuture<'_, Result<RawMoviePage>>;

    /// Base URL poster references are joined onto.
    fn image_base_url(&self) -> &str;
}

/// [`CatalogClient`] backed by the TMDB v3 REST API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    image_base_url: String,
}

impl TmdbClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WatchTierError::Config`] if no API key is configured, or an HTTP
    /// error if the underlying client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                WatchTierError::Config(
                    "no catalog API key; set api_key in config.toml or TMDB_API_KEY".to_string(),
                )
            })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("watchtier/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(base_url = %config.api_base_url, language = %config.language, "catalog client created");

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
            image_base_url: config.image_base_url.clone(),
        })
    }

    /// Issues a GET and decodes the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let span = tracing::debug_span!("catalog_get", path = %path);

        async {
            let response = self
                .http
                .get(&url)
                .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
                .query(params)
                .send()
                .await?;

            let status = response.status();
            tracing::debug!(status = status.as_u16(), "catalog responded");

            let bytes = response.error_for_status()?.bytes().await?;
            decode_body(path, &bytes)
        }
        .instrument(span)
        .await
    }
}

/// Decodes a 2xx body; a shape the catalog should never send is a catalog error.
fn decode_body<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "malformed catalog response");
        WatchTierError::Catalog(format!("malformed response from {path}: {e}"))
    })
}

impl CatalogClient for TmdbClient {
    fn search(&self, query: &str) -> BoxFuture<'_, Result<RawMoviePage>> {
        let query = query.to_string();
        Box::pin(async move { self.get("/search/movie", &[("query", query)]).await })
    }

    fn discover(&self, genre_id: u32, page: u32) -> BoxFuture<'_, Result<RawMoviePage>> {
        Box::pin(async move {
            self.get(
                "/discover/movie",
                &[
                    ("with_genres", genre_id.to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await
        })
    }

    fn trending(&self, page: u32) -> BoxFuture<'_, Result<RawMoviePage>> {
        Box::pin(async move {
            self.get("/trending/movie/week", &[("page", page.to_string())])
                .await
        })
    }

    fn detail(&self, id: MovieId) -> BoxFuture<'_, Result<RawMovieDetail>> {
        Box::pin(async move { self.get(&format!("/movie/{id}"), &[]).await })
    }

    fn recommendations(&self, id: MovieId) -> BoxFuture<'_, Result<RawMoviePage>> {
        Box::pin(async move { self.get(&format!("/movie/{id}/recommendations"), &[]).await })
    }

    fn image_base_url(&self) -> &str {
        &self.image_base_url
    }
}
