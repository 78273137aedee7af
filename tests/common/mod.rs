//! Shared test fixtures: an in-memory catalog and state builders.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use watchtier::app::{AppState, TierStore};
use watchtier::catalog::models::RawGenre;
use watchtier::catalog::{CatalogClient, RawMovie, RawMovieDetail, RawMoviePage};
use watchtier::domain::MovieId;
use watchtier::runtime::Runtime;
use watchtier::{initialize, Config, Result, Theme, WatchTierError};

pub const IMAGE_BASE: &str = "https://img.test/w500";

pub fn raw(id: MovieId, title: &str) -> RawMovie {
    RawMovie {
        id,
        title: Some(title.to_string()),
        poster_path: Some(format!("/{id}.jpg")),
    }
}

pub fn posterless(id: MovieId, title: &str) -> RawMovie {
    RawMovie {
        id,
        title: Some(title.to_string()),
        poster_path: None,
    }
}

pub fn detail(id: MovieId, title: &str) -> RawMovieDetail {
    RawMovieDetail {
        id,
        title: Some(title.to_string()),
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: None,
        overview: Some(format!("{title} overview")),
        vote_average: Some(8.1),
        release_date: Some("1999-10-15".to_string()),
        runtime: Some(139),
        genres: vec![RawGenre {
            id: 18,
            name: "Drama".to_string(),
        }],
    }
}

fn page(results: Vec<RawMovie>) -> RawMoviePage {
    RawMoviePage {
        page: 1,
        total_pages: 1,
        results,
    }
}

/// Catalog answering from canned data, recording every call.
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<String, (Duration, Vec<RawMovie>)>,
    trending: HashMap<u32, Vec<RawMovie>>,
    genres: HashMap<(u32, u32), Vec<RawMovie>>,
    details: HashMap<MovieId, RawMovieDetail>,
    recommendations: HashMap<MovieId, Vec<RawMovie>>,
    failing: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, delay: Duration, results: Vec<RawMovie>) -> Self {
        self.searches.insert(query.to_string(), (delay, results));
        self
    }

    pub fn with_trending(mut self, page: u32, results: Vec<RawMovie>) -> Self {
        self.trending.insert(page, results);
        self
    }

    pub fn with_genre(mut self, genre_id: u32, page: u32, results: Vec<RawMovie>) -> Self {
        self.genres.insert((genre_id, page), results);
        self
    }

    pub fn with_detail(mut self, detail: RawMovieDetail, recommendations: Vec<RawMovie>) -> Self {
        self.recommendations.insert(detail.id, recommendations);
        self.details.insert(detail.id, detail);
        self
    }

    /// Every request fails with a catalog error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing {
            return Err(WatchTierError::Catalog(format!("{call}: service unavailable")));
        }
        Ok(())
    }
}

impl CatalogClient for FakeCatalog {
    fn search(&self, query: &str) -> BoxFuture<'_, Result<RawMoviePage>> {
        let query = query.to_string();
        Box::pin(async move {
            self.record(format!("search:{query}"))?;
            let (delay, results) = self.searches.get(&query).cloned().unwrap_or_default();
            tokio::time::sleep(delay).await;
            Ok(page(results))
        })
    }

    fn discover(&self, genre_id: u32, page_no: u32) -> BoxFuture<'_, Result<RawMoviePage>> {
        Box::pin(async move {
            self.record(format!("discover:{genre_id}:{page_no}"))?;
            Ok(page(
                self.genres.get(&(genre_id, page_no)).cloned().unwrap_or_default(),
            ))
        })
    }

    fn trending(&self, page_no: u32) -> BoxFuture<'_, Result<RawMoviePage>> {
        Box::pin(async move {
            self.record(format!("trending:{page_no}"))?;
            Ok(page(self.trending.get(&page_no).cloned().unwrap_or_default()))
        })
    }

    fn detail(&self, id: MovieId) -> BoxFuture<'_, Result<RawMovieDetail>> {
        Box::pin(async move {
            self.record(format!("detail:{id}"))?;
            self.details
                .get(&id)
                .cloned()
                .ok_or_else(|| WatchTierError::Catalog(format!("movie {id} not found")))
        })
    }

    fn recommendations(&self, id: MovieId) -> BoxFuture<'_, Result<RawMoviePage>> {
        Box::pin(async move {
            self.record(format!("recommendations:{id}"))?;
            Ok(page(self.recommendations.get(&id).cloned().unwrap_or_default()))
        })
    }

    fn image_base_url(&self) -> &str {
        IMAGE_BASE
    }
}

/// Runtime over in-memory state exporting into `export_dir`.
pub fn runtime(catalog: &Arc<FakeCatalog>, export_dir: &Path) -> Runtime {
    let state = AppState::new(TierStore::in_memory(), Theme::default());
    Runtime::new(state, Arc::clone(catalog) as Arc<dyn CatalogClient>, export_dir.to_path_buf())
}

/// Runtime over state persisted in `data_dir`.
pub fn persistent_runtime(catalog: &Arc<FakeCatalog>, data_dir: &Path) -> Runtime {
    let config = Config {
        data_dir: Some(data_dir.to_path_buf()),
        ..Config::default()
    };
    let state = initialize(&config).unwrap();
    Runtime::new(state, Arc::clone(catalog) as Arc<dyn CatalogClient>, data_dir.join("exports"))
}
