//! Unified error types for articled.
//!
//! Every failure in the pipeline maps to exactly one of these variants and
//! propagates to the caller unchanged; nothing is retried or recovered
//! internally. The one recoverable condition (metadata extractor absent)
//! is modeled as an `Option`, not an error.

/// Unified error type for the fetch-cache-extract pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cache directory or cache files are unusable.
    #[error("STORAGE_ERROR: {0}")]
    Storage(String),

    /// Network fetch failed (connect, timeout, or non-success status).
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Local-path fallback read failed.
    #[error("LOCAL_READ_ERROR: {path}: {source}")]
    LocalRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Structural content extractor could not process the input.
    #[error("EXTRACT_FAILED: {0}")]
    Extract(String),

    /// Invalid configuration, including an unrecognized output format.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// Input is neither an HTTP(S) URL nor an existing local path.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch response exceeded the configured size cap.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),
}
