//! Client code for articled.
//!
//! This crate provides the HTTP fetch pipeline, cached fetching, content
//! extraction, and the end-to-end pipeline consumed by the CLI.

pub mod extract;
pub mod fetch;
pub mod pipeline;

pub use extract::{
    ContentExtractor, ExtractionMerger, MetaTagExtractor, MetadataBundle, MetadataExtractor, NoMetadataExtractor,
    NormalizedRecord, ReadableExtractor, StructuralContent,
};

pub use fetch::{CachedFetcher, FetchClient, FetchConfig, FetchOptions, FetchResponse};

pub use pipeline::Pipeline;
