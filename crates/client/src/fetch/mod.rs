//! HTTP fetch pipeline with browser-emulation headers.
//!
//! ### Request Shape
//! - Single GET per call, redirects followed transparently.
//! - A fixed browser-emulation header set is sent on every request; some
//!   sites serve stripped or blocked pages to anything that smells like a
//!   bot. Compressed transfer encodings are negotiated and decoded by
//!   reqwest.
//! - Max body bytes: 5MB (configurable). No retries on any failure path.
//!
//! ### Local-Path Fallback
//! - Input that does not start with `http://`/`https://` degrades to a
//!   direct read of the input as a local filename.

pub mod cached;

use bytes::Bytes;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};

pub use cached::{CachedFetcher, FetchOptions};

use articled_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: a real Firefox UA)
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 10)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0"
                .to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 10,
        }
    }
}

impl From<&articled_core::AppConfig> for FetchConfig {
    fn from(cfg: &articled_core::AppConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            max_bytes: cfg.max_bytes,
            timeout: cfg.timeout(),
            max_redirects: cfg.max_redirects,
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL (or local path) requested
    pub url: String,
    /// The final URL after redirects; equals `url` for local reads
    pub final_url: String,
    /// HTTP status code; `OK` for local reads
    pub status: StatusCode,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// Whether the input looks like something we should fetch over HTTP.
pub fn is_http_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Fixed browser-emulation headers sent on every request, captured from a
/// real Firefox session. `Accept-Encoding` and `Connection` are managed by
/// the transport.
fn browser_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(header::COOKIE, header::HeaderValue::from_static("js=y"));
    headers.insert("service-worker", header::HeaderValue::from_static("script"));
    headers.insert("sec-fetch-dest", header::HeaderValue::from_static("serviceworker"));
    headers.insert("sec-fetch-mode", header::HeaderValue::from_static("same-origin"));
    headers.insert("sec-fetch-site", header::HeaderValue::from_static("same-origin"));
    headers.insert(header::PRAGMA, header::HeaderValue::from_static("no-cache"));
    headers.insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-cache"));
    headers
}

/// HTTP fetch client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(browser_headers())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL (or read a local path), returning raw bytes and metadata.
    ///
    /// HTTP(S) inputs go over the network with redirects followed; anything
    /// else is read from disk as a filename.
    pub async fn fetch(&self, url: &str) -> Result<FetchResponse, Error> {
        if is_http_url(url) {
            self.fetch_http(url).await
        } else {
            self.read_local(url).await
        }
    }

    async fn fetch_http(&self, url: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::Network(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());

        Ok(FetchResponse { url: url.to_string(), final_url, status, bytes, fetch_ms })
    }

    async fn read_local(&self, path: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::LocalRead { path: path.to_string(), source: e })?;

        tracing::debug!("read local file {} ({} bytes)", path, bytes.len());

        Ok(FetchResponse {
            url: path.to_string(),
            final_url: path.to_string(),
            status: StatusCode::OK,
            bytes: Bytes::from(bytes),
            fetch_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
