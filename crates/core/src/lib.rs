//! Core types and shared functionality for articled.
//!
//! This crate provides:
//! - File-backed page cache with content-addressed keys
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{PageCache, cache_key};
pub use config::{AppConfig, OutputFormat};
pub use error::Error;
