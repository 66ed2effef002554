// SYNOID B-Roll Mock Source
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Offline stand-in for the stock footage provider. Shape is fixed, content is random.

use crate::broll_engine::source::VideoSource;
use crate::broll_engine::types::{SearchQuery, VideoPage, VideoRecord, MAX_PAGE_SIZE};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::info;

pub const MIN_MOCK_DURATION: u32 = 5;
pub const MAX_MOCK_DURATION: u32 = 60;

/// Common 16:9 delivery resolutions.
pub const MOCK_RESOLUTIONS: [(u32, u32); 3] = [(1280, 720), (1920, 1080), (3840, 2160)];

pub struct MockSource {
    rng: Mutex<StdRng>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible clips, e.g. `StdRng::seed_from_u64(42)`.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn generate(&self, query: &SearchQuery) -> Vec<VideoRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let offset = u64::from(query.page.saturating_sub(1)) * u64::from(MAX_PAGE_SIZE);

        (0..query.page_size)
            .map(|i| {
                let (width, height) = *MOCK_RESOLUTIONS
                    .choose(&mut *rng)
                    .unwrap_or(&MOCK_RESOLUTIONS[0]);
                VideoRecord {
                    id: offset + u64::from(i),
                    duration: rng.gen_range(MIN_MOCK_DURATION..=MAX_MOCK_DURATION),
                    width,
                    height,
                    title: format!("Mock Video {} about {}", i, query.term),
                    description: format!(
                        "This is a mock video description for {} content. Video number {}.",
                        query.term, i
                    ),
                }
            })
            .collect()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoSource for MockSource {
    async fn fetch(&self, query: &SearchQuery) -> VideoPage {
        info!(
            "[MOCK] Generating mock videos for query: '{}', page: {}, per_page: {}",
            query.term, query.page, query.page_size
        );
        VideoPage::delivered(self.generate(query))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broll_engine::types::PageOutcome;

    #[tokio::test]
    async fn test_mock_page_shape() {
        let source = MockSource::seeded(7);
        let page = source.fetch(&SearchQuery::new("nature", 1, 12)).await;

        assert_eq!(page.outcome, PageOutcome::Delivered);
        assert_eq!(page.videos.len(), 12);
        for (i, video) in page.videos.iter().enumerate() {
            assert!((MIN_MOCK_DURATION..=MAX_MOCK_DURATION).contains(&video.duration));
            assert!(MOCK_RESOLUTIONS.contains(&(video.width, video.height)));
            assert_eq!(video.title, format!("Mock Video {} about nature", i));
            assert!(video.description.contains("nature"));
        }
    }

    #[tokio::test]
    async fn test_mock_is_reproducible_with_seed() {
        let query = SearchQuery::new("city", 2, 15);
        let a = MockSource::seeded(42).fetch(&query).await;
        let b = MockSource::seeded(42).fetch(&query).await;
        assert_eq!(a, b);
        assert_eq!(a.videos[0].id, 15);
    }

    #[tokio::test]
    async fn test_mock_page_zero_is_treated_as_first() {
        let query = SearchQuery {
            term: "river".to_string(),
            page: 0,
            page_size: 3,
        };
        let page = MockSource::seeded(3).fetch(&query).await;
        let ids: Vec<u64> = page.videos.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_mock_never_runs_dry() {
        let source = MockSource::seeded(1);
        for page in 1..=5 {
            let result = source.fetch(&SearchQuery::new("ocean", page, 3)).await;
            assert_eq!(result.videos.len(), 3);
        }
    }
}
