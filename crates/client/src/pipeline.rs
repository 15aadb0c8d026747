//! End-to-end pipeline: validate, fetch (cached), decode, extract, merge.

use std::path::Path;

use articled_core::{AppConfig, Error, OutputFormat, PageCache};

use crate::extract::{ExtractionMerger, NormalizedRecord};
use crate::fetch::{CachedFetcher, FetchClient, FetchConfig, FetchOptions, is_http_url};

/// Drives one URL (or local path) from input to normalized record.
///
/// Produces no side effects beyond the cached fetch: the record itself is
/// never persisted, only the raw page bytes are.
pub struct Pipeline {
    fetcher: CachedFetcher,
    merger: ExtractionMerger,
    force: bool,
}

impl Pipeline {
    /// Build a pipeline from application configuration, with the default
    /// extraction engines.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        Self::with_merger(config, ExtractionMerger::with_defaults())
    }

    /// Build a pipeline with a custom merger (e.g. with the metadata
    /// capability marked unavailable).
    pub fn with_merger(config: &AppConfig, merger: ExtractionMerger) -> Result<Self, Error> {
        let client = FetchClient::new(FetchConfig::from(config))?;
        let cache = PageCache::new(&config.cache_dir);
        Ok(Self {
            fetcher: CachedFetcher::new(client, cache),
            merger,
            // CACHE_DISABLE forces every fetch onto the network; fetched
            // pages are still written back to the cache.
            force: !config.cache_enabled(),
        })
    }

    /// Process one input and return its normalized record.
    ///
    /// Validation happens before any network or cache access: the format
    /// must be `html` or `markdown` (`Error::Config`), and the input must
    /// be an HTTP(S) URL or an existing local path (`Error::InvalidUrl`).
    pub async fn run(&self, url: &str, output_format: &str) -> Result<NormalizedRecord, Error> {
        let format: OutputFormat = output_format.parse()?;
        validate_input(url)?;

        let bytes = self
            .fetcher
            .get_with(url, FetchOptions { force: self.force, ..Default::default() })
            .await?;
        tracing::debug!(url, bytes = bytes.len(), "page loaded");

        let text = String::from_utf8_lossy(&bytes);

        self.merger.extract(&text, url, format)
    }
}

/// Input must look like an HTTP(S) URL or name an existing local file.
fn validate_input(url: &str) -> Result<(), Error> {
    if is_http_url(url) {
        // Well-formedness check only; reachability is the fetcher's problem.
        url::Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        return Ok(());
    }

    if Path::new(url).exists() {
        return Ok(());
    }

    Err(Error::InvalidUrl(format!("{url}: not an http(s) URL and no such local file")))
}
