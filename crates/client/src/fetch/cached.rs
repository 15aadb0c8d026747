//! Cache-or-fetch orchestration.
//!
//! A cache hit short-circuits the network entirely; a miss fetches,
//! persists the raw bytes, and appends one index record. Cached entries are
//! valid forever; staleness is the caller's responsibility via `force`.
//! Local paths bypass the cache and are read directly.

use std::path::{Path, PathBuf};

use articled_core::{Error, PageCache, cache_key};

use super::{FetchClient, is_http_url};

/// Per-call options for [`CachedFetcher::get_with`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Fetch from the network even when a cached entry exists.
    pub force: bool,

    /// Persist fetched bytes to the cache. Defaults to on.
    pub no_store: bool,

    /// Explicit cache file path, replacing the hash-derived location.
    ///
    /// When set, the index record is keyed by the file's basename rather
    /// than the URL hash, so the index will not correctly attribute this
    /// entry's URL. Known index limitation.
    pub filename: Option<PathBuf>,
}

/// Fetcher that consults a [`PageCache`] before touching the network.
pub struct CachedFetcher {
    client: FetchClient,
    cache: PageCache,
}

impl CachedFetcher {
    pub fn new(client: FetchClient, cache: PageCache) -> Self {
        Self { client, cache }
    }

    /// The underlying page cache.
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Fetch `url` with default options: cache consulted, cache written.
    pub async fn get(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.get_with(url, FetchOptions::default()).await
    }

    /// Fetch `url`, honoring `opts`.
    ///
    /// Cache-hit returns the stored bytes without network I/O. Cache-miss
    /// (or `force`) fetches and, unless `no_store` is set, writes the entry
    /// and appends its index record. Each URL is handled sequentially with
    /// no retry on any failure.
    pub async fn get_with(&self, url: &str, opts: FetchOptions) -> Result<Vec<u8>, Error> {
        if !is_http_url(url) {
            // Local files are never cached.
            let response = self.client.fetch(url).await?;
            return Ok(response.bytes.to_vec());
        }

        let (cache, key) = match &opts.filename {
            Some(path) => {
                let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
                let name = path
                    .file_name()
                    .ok_or_else(|| Error::Storage(format!("invalid cache filename {}", path.display())))?
                    .to_string_lossy()
                    .into_owned();
                (PageCache::new(parent), name)
            }
            None => (self.cache.clone(), cache_key(url)),
        };

        if !opts.force
            && let Some(bytes) = cache.read(&key).await?
        {
            tracing::debug!(url, key, "cache hit");
            return Ok(bytes);
        }

        tracing::debug!(url, key, force = opts.force, "cache miss, fetching");
        let response = self.client.fetch(url).await?;

        if !opts.no_store {
            cache.ensure_ready().await?;
            cache.write(&key, url, &response.bytes).await?;
        }

        Ok(response.bytes.to_vec())
    }
}
