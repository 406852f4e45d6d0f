//! Client for the third-party track search endpoint

use reqwest::Client;
use serde::Deserialize;

use super::error::{SyncError, SyncResult};
use super::track::{ApiTrack, Track};

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: Option<TrackPage>,
}

#[derive(Debug, Default, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<ApiTrack>,
}

/// Keyword and trending queries against the search provider
#[derive(Clone, Debug)]
pub struct SearchClient {
    http: Client,
    search_url: String,
    trending_query: String,
}

impl SearchClient {
    pub fn new(search_url: impl Into<String>, trending_query: impl Into<String>) -> Self {
        Self::with_http(Client::new(), search_url, trending_query)
    }

    pub fn with_http(
        http: Client,
        search_url: impl Into<String>,
        trending_query: impl Into<String>,
    ) -> Self {
        Self {
            http,
            search_url: search_url.into(),
            trending_query: trending_query.into(),
        }
    }

    /// Search tracks by keyword. A blank keyword runs the trending query.
    /// Never returns more than `limit` tracks.
    pub async fn search(&self, keyword: &str, limit: usize) -> SyncResult<Vec<Track>> {
        let keyword = keyword.trim();
        let query = if keyword.is_empty() {
            self.trending_query.as_str()
        } else {
            keyword
        };
        let limit_param = limit.to_string();

        tracing::debug!(query, limit, "API: search");

        let response = self
            .http
            .get(&self.search_url)
            .query(&[("q", query), ("type", "track"), ("limit", limit_param.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Search endpoint returned an error");
            return Err(SyncError::Network(format!("Search returned status {}", status)));
        }

        let data: SearchResponse = response.json().await?;
        let tracks: Vec<Track> = data
            .tracks
            .unwrap_or_default()
            .items
            .into_iter()
            .take(limit)
            .map(Track::from)
            .collect();

        tracing::info!(query, count = tracks.len(), "Search completed");
        Ok(tracks)
    }

    pub async fn trending(&self, limit: usize) -> SyncResult<Vec<Track>> {
        self.search("", limit).await
    }
}
