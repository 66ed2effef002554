// SYNOID B-Roll Relevance Ranker
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::broll_engine::types::VideoRecord;
use std::cmp::Reverse;
use std::fmt;
use tracing::{info, warn};

pub const TITLE_WEIGHT: f64 = 0.6;
pub const DESCRIPTION_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Shortest first
    Duration,
    /// Widest first
    Width,
    /// Tallest first
    Height,
    #[default]
    Relevance,
}

impl SortKey {
    /// Unknown names fall back to relevance with a warning.
    pub fn parse(name: &str) -> Self {
        match name {
            "duration" => SortKey::Duration,
            "width" => SortKey::Width,
            "height" => SortKey::Height,
            "relevance" => SortKey::Relevance,
            other => {
                warn!("[RANKER] Unknown sort criteria: {}. Defaulting to relevance.", other);
                SortKey::Relevance
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Duration => "duration",
            SortKey::Width => "width",
            SortKey::Height => "height",
            SortKey::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Words in `text` whose lowercase form contains the whole lowercase query.
fn match_count(text: &str, query: &str) -> usize {
    text.split_whitespace()
        .filter(|word| word.to_lowercase().contains(query))
        .count()
}

/// 0.6 x matching title words + 0.4 x matching description words.
pub fn relevance_score(video: &VideoRecord, query: &str) -> f64 {
    let query = query.to_lowercase();
    let title_hits = match_count(&video.title, &query);
    let description_hits = match_count(&video.description, &query);

    title_hits as f64 * TITLE_WEIGHT + description_hits as f64 * DESCRIPTION_WEIGHT
}

/// Stable sort by the named criteria. Ties keep their input order.
pub fn sort_videos(videos: Vec<VideoRecord>, sort_by: &str, query: &str) -> Vec<VideoRecord> {
    let key = SortKey::parse(sort_by);
    info!("[RANKER] Sorting {} videos by: {}", videos.len(), key);
    sort_by_key(videos, key, query)
}

pub fn sort_by_key(mut videos: Vec<VideoRecord>, key: SortKey, query: &str) -> Vec<VideoRecord> {
    match key {
        SortKey::Duration => videos.sort_by_key(|v| v.duration),
        SortKey::Width => videos.sort_by_key(|v| Reverse(v.width)),
        SortKey::Height => videos.sort_by_key(|v| Reverse(v.height)),
        SortKey::Relevance => {
            let mut scored: Vec<(f64, VideoRecord)> = videos
                .into_iter()
                .map(|v| (relevance_score(&v, query), v))
                .collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            return scored.into_iter().map(|(_, v)| v).collect();
        }
    }
    videos
}
