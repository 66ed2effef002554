// SYNOID B-Roll Engine
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Finds stock footage for narration: keyword extraction, provider search, ranking.

pub mod analyzer;
pub mod lexicon;
pub mod mock;
pub mod pipeline;
pub mod ranker;
pub mod source;
pub mod types;

pub use analyzer::TextAnalyzer;
pub use mock::MockSource;
pub use pipeline::BrollPipeline;
pub use ranker::{relevance_score, sort_videos, SortKey};
pub use source::{select_source, FetchError, RemoteSource, VideoSource};
pub use types::{PageOutcome, SearchQuery, VideoPage, VideoRecord};
