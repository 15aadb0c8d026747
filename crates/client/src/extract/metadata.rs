//! Optional metadata extraction capability.
//!
//! The metadata extractor is a runtime-checked optional dependency: the
//! pipeline is wired with either [`MetaTagExtractor`] (available) or
//! [`NoMetadataExtractor`] (unavailable), chosen once at startup. Absence
//! is never an error; the merge step falls back to titles from the
//! structural extractor.

use scraper::{Html, Selector};

/// Metadata pulled from a page's head.
///
/// Dates pass through as opaque strings exactly as the page declared them;
/// no parsing or normalization is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBundle {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl MetadataBundle {
    /// A bundle with no usable field counts as absent.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.date.is_none() && self.description.is_none()
    }

    /// Bundle synthesized from structural titles when no metadata is
    /// available: `title` from the cleaned title, `description` from the
    /// full document title, author and date null.
    pub fn from_structural(structural: &super::StructuralContent) -> Self {
        Self {
            title: Some(structural.short_title.clone()),
            author: None,
            date: None,
            description: Some(structural.full_title.clone()),
        }
    }
}

/// Best-effort metadata capability.
pub trait MetadataExtractor: Send + Sync {
    /// Extract metadata from a page, or `None` when the capability is
    /// unavailable or finds nothing usable.
    fn extract(&self, html: &str, url: &str) -> Option<MetadataBundle>;
}

/// Meta-tag based extractor: Open Graph, Twitter cards, Dublin Core, and
/// plain `<meta name=...>` fields, first value wins per field.
pub struct MetaTagExtractor;

impl MetadataExtractor for MetaTagExtractor {
    fn extract(&self, html: &str, url: &str) -> Option<MetadataBundle> {
        let doc = Html::parse_document(html);
        let selector = Selector::parse("meta").ok()?;

        let mut bundle = MetadataBundle::default();

        for meta in doc.select(&selector) {
            let name = meta
                .value()
                .attr("name")
                .or_else(|| meta.value().attr("property"))
                .or_else(|| meta.value().attr("itemprop"))
                .unwrap_or_default()
                .to_lowercase();

            let content = meta.value().attr("content").unwrap_or_default().trim();

            if name.is_empty() || content.is_empty() {
                continue;
            }

            match name.as_str() {
                "author" | "article:author" | "dc.creator" | "byl" | "parsely-author" => {
                    if bundle.author.is_none() {
                        bundle.author = Some(content.to_string());
                    }
                }

                "og:title" | "twitter:title" | "dc.title" | "parsely-title" | "title" => {
                    if bundle.title.is_none() {
                        bundle.title = Some(content.to_string());
                    }
                }

                "description" | "og:description" | "twitter:description" | "dc.description" => {
                    if bundle.description.is_none() {
                        bundle.description = Some(content.to_string());
                    }
                }

                "article:published_time" | "article:published" | "date" | "dc.date" | "dc.date.issued"
                | "datepublished" | "parsely-pub-date" | "pubdate" | "publish_date" | "publishdate" => {
                    if bundle.date.is_none() {
                        bundle.date = Some(content.to_string());
                    }
                }

                _ => {}
            }
        }

        if bundle.is_empty() {
            tracing::debug!(url, "no usable metadata found");
            None
        } else {
            Some(bundle)
        }
    }
}

/// Stand-in used when the metadata capability is absent from the runtime.
pub struct NoMetadataExtractor;

impl MetadataExtractor for NoMetadataExtractor {
    fn extract(&self, _html: &str, _url: &str) -> Option<MetadataBundle> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const META_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Raw Title</title>
            <meta property="og:title" content="OG Title">
            <meta name="author" content="Jane Doe">
            <meta property="article:published_time" content="2023-07-01T12:00:00Z">
            <meta name="description" content="A page about things.">
        </head>
        <body><p>body</p></body>
        </html>
    "#;

    #[test]
    fn test_meta_tag_extraction() {
        let bundle = MetaTagExtractor.extract(META_HTML, "https://example.com").unwrap();
        assert_eq!(bundle.title.as_deref(), Some("OG Title"));
        assert_eq!(bundle.author.as_deref(), Some("Jane Doe"));
        assert_eq!(bundle.date.as_deref(), Some("2023-07-01T12:00:00Z"));
        assert_eq!(bundle.description.as_deref(), Some("A page about things."));
    }

    #[test]
    fn test_first_value_wins() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="First">
                <meta name="twitter:title" content="Second">
            </head><body></body></html>
        "#;
        let bundle = MetaTagExtractor.extract(html, "https://example.com").unwrap();
        assert_eq!(bundle.title.as_deref(), Some("First"));
    }

    #[test]
    fn test_no_usable_metadata_is_none() {
        let html = "<html><head><title>Only A Title Tag</title></head><body></body></html>";
        assert!(MetaTagExtractor.extract(html, "https://example.com").is_none());
    }

    #[test]
    fn test_empty_content_attributes_skipped() {
        let html = r#"<html><head><meta name="author" content="  "></head><body></body></html>"#;
        assert!(MetaTagExtractor.extract(html, "https://example.com").is_none());
    }

    #[test]
    fn test_unavailable_extractor_returns_none() {
        assert!(NoMetadataExtractor.extract(META_HTML, "https://example.com").is_none());
    }

    #[test]
    fn test_from_structural_synthesis() {
        let structural = crate::extract::StructuralContent {
            content_html: "<p>body</p>".to_string(),
            short_title: "Cleaned Title".to_string(),
            full_title: "Cleaned Title - Site Name".to_string(),
        };
        let bundle = MetadataBundle::from_structural(&structural);
        assert_eq!(bundle.title.as_deref(), Some("Cleaned Title"));
        assert_eq!(bundle.description.as_deref(), Some("Cleaned Title - Site Name"));
        assert!(bundle.author.is_none());
        assert!(bundle.date.is_none());
    }

    #[test]
    fn test_bundle_is_empty() {
        assert!(MetadataBundle::default().is_empty());
        let partial = MetadataBundle { date: Some("2023".into()), ..Default::default() };
        assert!(!partial.is_empty());
    }
}
