//! The fixed output record shape.

use serde::{Deserialize, Serialize};

/// Normalized extraction result, one per processed URL.
///
/// Always carries all fourteen fields: values the pipeline does not compute
/// are serialized as explicit nulls (or their hard-coded constants), never
/// omitted, so downstream consumers can rely on the shape regardless of
/// which extraction path supplied the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date_published: Option<String>,
    /// Not produced by this pipeline.
    pub dek: Option<String>,
    /// Not produced by this pipeline.
    pub lead_image_url: Option<String>,
    /// Article content, HTML or Markdown depending on the requested format.
    pub content: String,
    /// Pagination is not implemented.
    pub next_page_url: Option<String>,
    /// Echo of the input URL or path.
    pub url: String,
    /// Not computed.
    pub domain: Option<String>,
    pub excerpt: Option<String>,
    /// Not computed; always 0.
    pub word_count: u32,
    /// Hard coded.
    pub direction: String,
    /// Hard coded.
    pub total_pages: u32,
    /// Hard coded.
    pub rendered_pages: u32,
}
