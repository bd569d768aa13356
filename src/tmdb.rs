use std::{num::NonZeroU32, sync::Arc};

use axum::http::StatusCode;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Movie;

/// Cutoff applied to raw search results before mapping.
pub const MAX_SEARCH_RESULTS: usize = 5;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("could not reach the movie catalog, try again later")]
    Unavailable(#[source] reqwest::Error),
    #[error("movie catalog returned status {0}")]
    Status(StatusCode),
    #[error("movie catalog returned an unexpected response")]
    Malformed,
}

impl TmdbError {
    pub fn status(&self) -> StatusCode {
        match self {
            TmdbError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            TmdbError::Status(code) => *code,
            TmdbError::Malformed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, limiter }
    }

    /// Searches the catalog and returns up to [`MAX_SEARCH_RESULTS`]
    /// normalized movies, none of them rated.
    ///
    /// Every failure mode comes back as a [`TmdbError`]; no raw
    /// transport or decode errors escape.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, TmdbError> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", "en-US"),
                ("page", "1"),
            ])
            .send()
            .await
            .map_err(TmdbError::Unavailable)?;

        let status = resp.status();
        if !status.is_success() {
            debug!(query = %query, status = %status, "catalog search failed upstream");
            return Err(TmdbError::Status(status));
        }

        let body: serde_json::Value = resp.json().await.map_err(|err| {
            warn!(query = %query, error = %err, "catalog search body was not valid JSON");
            TmdbError::Malformed
        })?;

        let Some(results) = body.get("results").and_then(|v| v.as_array()) else {
            warn!(query = %query, "catalog search body has no results array");
            return Err(TmdbError::Malformed);
        };

        let mut movies = Vec::with_capacity(results.len().min(MAX_SEARCH_RESULTS));
        for raw in results.iter().take(MAX_SEARCH_RESULTS) {
            let hit: SearchMovie = serde_json::from_value(raw.clone()).map_err(|err| {
                warn!(query = %query, error = %err, "catalog search result has unexpected shape");
                TmdbError::Malformed
            })?;
            movies.push(normalize(hit));
        }

        debug!(query = %query, results = movies.len(), "catalog search completed");
        Ok(movies)
    }
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i32,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
}

fn normalize(raw: SearchMovie) -> Movie {
    Movie {
        id: raw.id,
        title: raw.title,
        year: release_year(raw.release_date.as_deref()),
        poster_path: poster_url(raw.poster_path.as_deref()),
        rating: None,
    }
}

fn release_year(release_date: Option<&str>) -> Option<String> {
    release_date.filter(|d| !d.is_empty()).map(|d| d.chars().take(4).collect())
}

fn poster_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty()).map(|p| format!("{POSTER_BASE_URL}{p}"))
}
