// SYNOID B-Roll Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Resolved once at startup and handed to the analyzer and the video source.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const API_KEY_VAR: &str = "PEXELS_API_KEY";
pub const API_URL_VAR: &str = "PEXELS_API_URL";
pub const TIMEOUT_VAR: &str = "BROLL_TIMEOUT_SECS";
pub const LEXICON_VAR: &str = "BROLL_LEXICON_PATH";

pub const DEFAULT_API_URL: &str = "https://api.pexels.com/videos";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct BrollConfig {
    /// Provider credential. `None` or blank selects mock mode.
    pub api_key: Option<String>,
    pub api_url: Url,
    pub timeout: Duration,
    /// Extra lexicon entries merged over the embedded tagger lexicon.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for BrollConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            lexicon_path: None,
        }
    }
}

impl BrollConfig {
    /// Read configuration from the process environment.
    /// Call `dotenv().ok()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            api_key: lookup(API_KEY_VAR),
            ..Self::default()
        };

        if let Some(raw) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_url = Url::parse(raw.trim())
                .with_context(|| format!("{} is not a valid URL: {}", API_URL_VAR, raw))?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds: {}", TIMEOUT_VAR, raw))?;
            config.timeout = Duration::from_secs(secs.max(1));
        }

        config.lexicon_path = lookup(LEXICON_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// The credential, if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn is_mock_mode(&self) -> bool {
        self.credential().is_none()
    }
}
