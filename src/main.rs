// SYNOID B-Roll Finder Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Demonstration run: one plain query and one narration script.

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use synoid_broll::broll_engine::pipeline::DEFAULT_MAX_RESULTS;
use synoid_broll::broll_engine::{select_source, BrollPipeline, TextAnalyzer, VideoRecord};
use synoid_broll::config::BrollConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXAMPLE_QUERY: &str = "nature";
const EXAMPLE_SCRIPT: &str = "The sun rises over quiet mountains. \
    Hikers climb the rocky trail while eagles circle above the valley. \
    At dusk, the crew packs the cameras and drives home.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Log panics instead of crashing silently
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        tracing::error!("[BROLL PANIC] at {}: {}", location, message);
    }));

    info!("--- SYNOID B-ROLL FINDER v{} ---", env!("CARGO_PKG_VERSION"));

    let config = BrollConfig::from_env()?;

    // Linguistic resources must be present before anything else runs.
    let analyzer = Arc::new(TextAnalyzer::load(&config)?);
    let source = select_source(&config).context("Failed to initialize video source")?;
    let pipeline = BrollPipeline::new(source, analyzer.clone());

    let videos = pipeline.fetch_and_sort(EXAMPLE_QUERY, "relevance", DEFAULT_MAX_RESULTS).await;
    info!("Fetched and sorted videos for query: '{}'", EXAMPLE_QUERY);
    log_videos(&videos);

    info!("Script categories: {:?}", analyzer.classify(EXAMPLE_SCRIPT));
    let videos = pipeline.fetch_and_sort_script(EXAMPLE_SCRIPT, "duration", 20).await;
    info!("Fetched and sorted {} videos for the example script", videos.len());
    log_videos(&videos);

    Ok(())
}

fn log_videos(videos: &[VideoRecord]) {
    for video in videos {
        info!(
            "ID: {}, Title: {}, Duration: {}s, Width: {}px, Height: {}px",
            video.id, video.title, video.duration, video.width, video.height
        );
        debug!("Description: {}", video.description);
    }
}
