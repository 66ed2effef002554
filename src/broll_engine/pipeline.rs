// SYNOID B-Roll Pipeline
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Script -> keywords -> paginated fetch until quota -> ranked clip list.
// Fully sequential: every page is awaited before the next request goes out.

use crate::broll_engine::analyzer::{dedupe, TextAnalyzer};
use crate::broll_engine::ranker::sort_videos;
use crate::broll_engine::source::VideoSource;
use crate::broll_engine::types::{PageOutcome, SearchQuery, VideoRecord, MAX_PAGE_SIZE};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_RESULTS: usize = 50;

pub struct BrollPipeline {
    source: Box<dyn VideoSource>,
    analyzer: Arc<TextAnalyzer>,
}

impl BrollPipeline {
    pub fn new(source: Box<dyn VideoSource>, analyzer: Arc<TextAnalyzer>) -> Self {
        Self { source, analyzer }
    }

    /// Fetch clips for a single search term and rank them against it.
    ///
    /// Relevance is scored against `query` itself. Ranking against an empty
    /// query would count every word as a match and favour the longest text.
    pub async fn fetch_and_sort(&self, query: &str, sort_by: &str, max_results: usize) -> Vec<VideoRecord> {
        info!(
            "[BROLL] Fetching and sorting videos for query: '{}', sort_by: {}, max_results: {}",
            query, sort_by, max_results
        );
        info!("[BROLL] Using {} fetch function", self.source.name());

        let mut collected = Vec::new();
        self.collect_for_term(query, max_results, &mut collected).await;

        let sorted = sort_videos(collected, sort_by, query);
        info!("[BROLL] Fetched and sorted {} videos", sorted.len());
        sorted
    }

    /// Extract keywords from a narration script, fetch clips per keyword and rank them.
    pub async fn fetch_and_sort_script(&self, script: &str, sort_by: &str, max_results: usize) -> Vec<VideoRecord> {
        info!(
            "[BROLL] Processing script ({} chars), sort_by: {}, max_results: {}",
            script.len(),
            sort_by,
            max_results
        );
        info!("[BROLL] Using {} fetch function", self.source.name());

        let per_sentence = self.analyzer.keywords_by_sentence(script);
        let all_keywords = dedupe(per_sentence.iter().flatten().cloned());
        info!(
            "[BROLL] {} sentences, {} distinct keywords",
            per_sentence.len(),
            all_keywords.len()
        );

        let mut collected = Vec::new();
        'sentences: for keywords in &per_sentence {
            for keyword in keywords {
                if collected.len() >= max_results {
                    break 'sentences;
                }
                self.collect_for_term(keyword, max_results, &mut collected).await;
            }
        }

        let query = all_keywords.join(" ");
        debug!("[BROLL] Ranking query: '{}'", query);

        let sorted = sort_videos(collected, sort_by, &query);
        info!("[BROLL] Fetched and sorted {} videos", sorted.len());
        sorted
    }

    /// Page through one term until the quota is met or the source comes back empty.
    async fn collect_for_term(&self, term: &str, max_results: usize, collected: &mut Vec<VideoRecord>) {
        let mut page = 1;

        while collected.len() < max_results {
            let remaining = max_results - collected.len();
            let page_size = remaining.min(MAX_PAGE_SIZE as usize) as u32;
            let result = self.source.fetch(&SearchQuery::new(term, page, page_size)).await;

            match result.outcome {
                PageOutcome::Delivered => {}
                PageOutcome::Exhausted => {
                    info!("[BROLL] No more videos for '{}' after fetching {} videos", term, collected.len());
                    break;
                }
                PageOutcome::Failed => {
                    warn!("[BROLL] Fetch failed for '{}' page {}, moving on", term, page);
                    break;
                }
            }

            // Never overshoot the quota, even if a source ignores the page size.
            let take = remaining.min(result.videos.len());
            collected.extend(result.videos.into_iter().take(take));
            page += 1;
        }
    }
}
