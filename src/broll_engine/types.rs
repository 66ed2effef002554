// SYNOID B-Roll Types
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use serde::{Deserialize, Serialize};

/// Largest page the provider will serve.
pub const MAX_PAGE_SIZE: u32 = 15;

/// Normalized video metadata used throughout ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: u64,
    /// Seconds
    pub duration: u32,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub description: String,
}

/// One paginated request against a video source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    /// Page is clamped to >= 1 and page size to 1..=MAX_PAGE_SIZE.
    pub fn new(term: &str, page: u32, page_size: u32) -> Self {
        Self {
            term: term.to_string(),
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// First page at the provider's maximum size.
    pub fn first_page(term: &str) -> Self {
        Self::new(term, 1, MAX_PAGE_SIZE)
    }
}

/// Why a page looks the way it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Delivered,
    /// The provider answered but had nothing left.
    Exhausted,
    /// Transport or validation failure, already logged by the source.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPage {
    pub videos: Vec<VideoRecord>,
    pub outcome: PageOutcome,
}

impl VideoPage {
    pub fn delivered(videos: Vec<VideoRecord>) -> Self {
        if videos.is_empty() {
            return Self::exhausted();
        }
        Self {
            videos,
            outcome: PageOutcome::Delivered,
        }
    }

    pub fn exhausted() -> Self {
        Self {
            videos: Vec::new(),
            outcome: PageOutcome::Exhausted,
        }
    }

    pub fn failed() -> Self {
        Self {
            videos: Vec::new(),
            outcome: PageOutcome::Failed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
