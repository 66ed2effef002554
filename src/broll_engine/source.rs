// SYNOID B-Roll Video Sources
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Provider access for stock footage search:
// 1. RemoteSource: Pexels-compatible paginated search over HTTPS
// 2. MockSource (see mock.rs): synthetic clips when no credential is configured
//
// Sources are fail-soft. Transport and validation errors are logged here and
// surface to callers as an empty page.

use crate::broll_engine::mock::MockSource;
use crate::broll_engine::types::{SearchQuery, VideoPage, VideoRecord, MAX_PAGE_SIZE};
use crate::config::BrollConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};
use url::Url;

/// Fields every provider video object must carry.
pub const REQUIRED_VIDEO_FIELDS: [&str; 4] = ["id", "duration", "width", "height"];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid API response: {0}")]
    Validation(String),
}

/// Anything that can answer a paginated video search.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Fetch one page. Never fails: errors become an empty `Failed` page.
    async fn fetch(&self, query: &SearchQuery) -> VideoPage;

    /// Short label for logs ("remote", "mock").
    fn name(&self) -> &'static str;
}

/// Pick the source once from configuration: mock when the credential is absent or blank.
pub fn select_source(config: &BrollConfig) -> Result<Box<dyn VideoSource>, FetchError> {
    match config.credential() {
        Some(key) => {
            info!("[SOURCE] Using remote provider at {}", config.api_url);
            Ok(Box::new(RemoteSource::new(config.api_url.clone(), key, config.timeout)?))
        }
        None => {
            info!("[SOURCE] No provider credential configured, using mock source");
            Ok(Box::new(MockSource::new()))
        }
    }
}

pub struct RemoteSource {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RemoteSource {
    pub fn new(base_url: Url, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url.as_str().trim_end_matches('/'))
    }

    /// One request, with errors preserved.
    pub async fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<VideoRecord>, FetchError> {
        let url = self.search_url();
        let per_page = query.page_size.min(MAX_PAGE_SIZE);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query.term.clone()),
                ("per_page", per_page.to_string()),
                ("page", query.page.to_string()),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|source| FetchError::Transport { url, source })?;

        parse_search_response(&body)
    }
}

#[async_trait]
impl VideoSource for RemoteSource {
    async fn fetch(&self, query: &SearchQuery) -> VideoPage {
        info!(
            "[SOURCE] Fetching videos for query: '{}', page: {}, per_page: {}",
            query.term, query.page, query.page_size
        );

        match self.try_fetch(query).await {
            Ok(videos) => {
                info!("[SOURCE] Successfully fetched {} videos", videos.len());
                VideoPage::delivered(videos)
            }
            Err(err @ FetchError::Validation(_)) => {
                error!("[SOURCE] Error in API response for '{}' page {}: {}", query.term, query.page, err);
                VideoPage::failed()
            }
            Err(err) => {
                error!("[SOURCE] Error fetching videos for '{}' page {}: {:?}", query.term, query.page, err);
                VideoPage::failed()
            }
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    id: u64,
    duration: u32,
    width: u32,
    height: u32,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(default)]
    name: Option<String>,
}

/// Check the response shape and normalize every video.
/// Title comes from the uploader name, description from the canonical URL.
pub fn parse_search_response(body: &Value) -> Result<Vec<VideoRecord>, FetchError> {
    let videos = body
        .get("videos")
        .ok_or_else(|| FetchError::Validation("'videos' key not found".to_string()))?
        .as_array()
        .ok_or_else(|| FetchError::Validation("'videos' is not a list".to_string()))?;

    videos
        .iter()
        .enumerate()
        .map(|(index, video)| {
            let missing: Vec<&str> = REQUIRED_VIDEO_FIELDS
                .iter()
                .copied()
                .filter(|field| video.get(field).is_none())
                .collect();
            if !missing.is_empty() {
                return Err(FetchError::Validation(format!(
                    "video #{} is missing required keys {:?}",
                    index, missing
                )));
            }

            let raw: RawVideo = serde_json::from_value(video.clone()).map_err(|e| {
                FetchError::Validation(format!("video #{} is malformed: {}", index, e))
            })?;

            Ok(VideoRecord {
                id: raw.id,
                duration: raw.duration,
                width: raw.width,
                height: raw.height,
                title: raw.user.and_then(|u| u.name).unwrap_or_default(),
                description: raw.url.unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_enriches_records() {
        let body = json!({
            "page": 1,
            "videos": [
                {
                    "id": 1448735,
                    "duration": 32,
                    "width": 4096,
                    "height": 2160,
                    "url": "https://www.pexels.com/video/video-of-forest-1448735/",
                    "user": { "id": 574687, "name": "Ruvim Miksanskiy" }
                },
                { "id": 7, "duration": 5, "width": 1280, "height": 720 }
            ]
        });

        let videos = parse_search_response(&body).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title, "Ruvim Miksanskiy");
        assert_eq!(
            videos[0].description,
            "https://www.pexels.com/video/video-of-forest-1448735/"
        );
        assert_eq!(videos[1].title, "");
        assert_eq!(videos[1].description, "");
    }

    #[test]
    fn test_parse_rejects_missing_videos_key() {
        let err = parse_search_response(&json!({ "page": 1 })).unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
        assert!(err.to_string().contains("'videos' key not found"));
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let err = parse_search_response(&json!({ "videos": "nope" })).unwrap_err();
        assert!(err.to_string().contains("not a list"));
    }

    #[test]
    fn test_parse_rejects_missing_duration() {
        let body = json!({
            "videos": [
                { "id": 1, "duration": 10, "width": 1920, "height": 1080 },
                { "id": 2, "width": 1920, "height": 1080 }
            ]
        });
        let err = parse_search_response(&body).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let body = json!({ "videos": [ { "id": "abc", "duration": 10, "width": 1, "height": 1 } ] });
        assert!(matches!(
            parse_search_response(&body),
            Err(FetchError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_empty_list() {
        let videos = parse_search_response(&json!({ "videos": [] })).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn test_select_source_by_credential() {
        let mut config = BrollConfig::default();
        assert_eq!(select_source(&config).unwrap().name(), "mock");

        config.api_key = Some("  ".to_string());
        assert_eq!(select_source(&config).unwrap().name(), "mock");

        config.api_key = Some("secret".to_string());
        assert_eq!(select_source(&config).unwrap().name(), "remote");
    }

    #[tokio::test]
    async fn test_unreachable_provider_returns_empty_page() {
        let source = RemoteSource::new(
            Url::parse("http://127.0.0.1:9/videos").unwrap(),
            "secret",
            Duration::from_secs(2),
        )
        .unwrap();

        let page = source.fetch(&SearchQuery::first_page("nature")).await;
        assert!(page.is_empty());
        assert_eq!(page.outcome, crate::broll_engine::types::PageOutcome::Failed);
    }
}
