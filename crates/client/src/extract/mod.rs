//! Readable content extraction and two-source merge.
//!
//! Two external capabilities feed one normalized record:
//!
//! - The structural extractor (Readability-style) isolates the main article
//!   HTML and supplies the `content` field unconditionally, but loses the
//!   document head and with it most metadata.
//! - The metadata extractor reads title/author/date from the page head; its
//!   own notion of content is unreliable and never used.
//!
//! The merge rules and fallback live in [`merge`]. Both capabilities sit
//! behind traits so the engines can be swapped without touching the merge
//! code, and so the metadata capability can be absent at runtime.

pub mod merge;
pub mod metadata;
pub mod record;

use scraper::{Html, Selector};

use articled_core::Error;

pub use merge::ExtractionMerger;
pub use metadata::{MetaTagExtractor, MetadataBundle, MetadataExtractor, NoMetadataExtractor};
pub use record::NormalizedRecord;

/// Output of the structural content extractor.
#[derive(Debug, Clone)]
pub struct StructuralContent {
    /// Main article content as cleaned HTML.
    pub content_html: String,
    /// Cleaned-up title, boilerplate (site name, separators) stripped.
    pub short_title: String,
    /// The document's full, unmodified title.
    pub full_title: String,
}

/// Stable extractor trait for structural content extraction.
///
/// This allows swapping the extraction engine later without changing
/// pipeline code.
pub trait ContentExtractor: Send + Sync {
    /// Isolate the main readable article from a full HTML document.
    fn extract(&self, html: &str, url: Option<&str>) -> Result<StructuralContent, Error>;
}

/// dom_smoothie-based (Readability.js port) extractor implementation.
pub struct ReadableExtractor {
    version: &'static str,
}

impl ReadableExtractor {
    pub fn new() -> Self {
        Self { version: "dom_smoothie@0.14" }
    }

    /// Engine identifier, for logging.
    pub fn version(&self) -> &'static str {
        self.version
    }
}

impl Default for ReadableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for ReadableExtractor {
    fn extract(&self, html: &str, url: Option<&str>) -> Result<StructuralContent, Error> {
        if html.trim().is_empty() {
            return Err(Error::Extract("empty document".into()));
        }

        // The full <title> has to be recovered before Readability runs; the
        // parsed article no longer carries the document head.
        let full_title = document_title(html);

        let mut readability = dom_smoothie::Readability::new(html, url, None)
            .map_err(|e| Error::Extract(format!("failed to parse HTML: {}", e)))?;
        let article = readability
            .parse()
            .map_err(|e| Error::Extract(format!("extraction failed: {}", e)))?;

        let short_title = article.title.to_string();
        let full_title = full_title.unwrap_or_else(|| short_title.clone());

        tracing::debug!(engine = self.version, title = %short_title, "structural extraction done");

        Ok(StructuralContent { content_html: article.content.to_string(), short_title, full_title })
    }
}

/// Raw text of the document's `<title>` element, if present and non-empty.
fn document_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let text: String = doc.select(&selector).next()?.text().collect();
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
