//! Two-source reconciliation into one normalized record.
//!
//! Merge policy:
//!
//! - The structural extractor supplies `content` unconditionally; the
//!   metadata extractor's content is never used.
//! - If the metadata bundle is present, its `title`/`author`/`date` are
//!   taken as-is, even when individually null.
//! - If it is absent, a bundle is synthesized from the structural titles:
//!   `title = short_title`, `description = full_title`, author and date
//!   null.
//! - Markdown output converts the structural HTML; HTML output passes it
//!   through verbatim.

use articled_core::{Error, OutputFormat};

use super::metadata::{MetadataBundle, MetadataExtractor};
use super::record::NormalizedRecord;
use super::{ContentExtractor, MetaTagExtractor, ReadableExtractor};

/// Runs both extraction capabilities and merges their outputs.
pub struct ExtractionMerger {
    content: Box<dyn ContentExtractor>,
    metadata: Box<dyn MetadataExtractor>,
}

impl ExtractionMerger {
    pub fn new(content: Box<dyn ContentExtractor>, metadata: Box<dyn MetadataExtractor>) -> Self {
        Self { content, metadata }
    }

    /// Merger wired with the default engines: dom_smoothie for content,
    /// meta tags for metadata.
    pub fn with_defaults() -> Self {
        Self::new(Box::new(ReadableExtractor::new()), Box::new(MetaTagExtractor))
    }

    /// Extract `text` and assemble the normalized record.
    ///
    /// # Errors
    ///
    /// Returns `Error::Extract` when the structural extractor cannot
    /// process the input at all. Metadata failure is non-fatal and only
    /// triggers the fallback synthesis.
    pub fn extract(&self, text: &str, url: &str, format: OutputFormat) -> Result<NormalizedRecord, Error> {
        // Metadata first; a `None` here is the one recoverable condition in
        // the pipeline.
        let bundle = self.metadata.extract(text, url).filter(|b| !b.is_empty());

        let structural = self.content.extract(text, Some(url))?;

        let bundle = bundle.unwrap_or_else(|| {
            tracing::debug!(url, "metadata unavailable, synthesizing from structural titles");
            MetadataBundle::from_structural(&structural)
        });

        let content = match format {
            OutputFormat::Html => structural.content_html,
            OutputFormat::Markdown => htmd::convert(&structural.content_html)
                .map_err(|e| Error::Extract(format!("markdown conversion failed: {}", e)))?,
        };

        Ok(NormalizedRecord {
            title: bundle.title,
            author: bundle.author,
            date_published: bundle.date,
            dek: None,
            lead_image_url: None,
            content,
            next_page_url: None,
            url: url.to_string(),
            domain: None,
            excerpt: None,
            word_count: 0,
            direction: "ltr".to_string(),
            total_pages: 1,
            rendered_pages: 1,
        })
    }
}

impl Default for ExtractionMerger {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::NoMetadataExtractor;
    use crate::extract::StructuralContent;

    const PAGE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Full Page Title - Some Site</title>
            <meta property="og:title" content="Meta Title">
            <meta name="author" content="Jane Doe">
            <meta property="article:published_time" content="2023-07-01">
        </head>
        <body>
            <article>
                <h1>Heading</h1>
                <p>This is the main article body with a good amount of prose so the
                   structural extractor has something to hold on to. More sentences
                   follow to push the content above the extraction threshold used by
                   the readability scoring pass.</p>
                <p>Another solid paragraph of article text, with commas, periods, and
                   enough length that the scoring pass keeps it in the final content
                   rather than discarding it as boilerplate.</p>
                <p>A closing paragraph rounds out the article and keeps the overall
                   character count comfortably above the minimum.</p>
            </article>
        </body>
        </html>
    "#;

    /// Fixed-output structural extractor for exercising merge rules in
    /// isolation from the real engine.
    struct FixedContent;

    impl ContentExtractor for FixedContent {
        fn extract(&self, _html: &str, _url: Option<&str>) -> Result<StructuralContent, Error> {
            Ok(StructuralContent {
                content_html: "<p>fixed body</p>".to_string(),
                short_title: "Short Title".to_string(),
                full_title: "Full Title - Site".to_string(),
            })
        }
    }

    #[test]
    fn test_metadata_present_used_as_is() {
        let merger = ExtractionMerger::with_defaults();
        let record = merger
            .extract(PAGE_HTML, "https://example.com/a", OutputFormat::Html)
            .unwrap();

        assert_eq!(record.title.as_deref(), Some("Meta Title"));
        assert_eq!(record.author.as_deref(), Some("Jane Doe"));
        assert_eq!(record.date_published.as_deref(), Some("2023-07-01"));
        assert!(record.content.contains("main article body"));
    }

    #[test]
    fn test_metadata_partial_no_further_fallback() {
        // Bundle present but author-less: author stays null, title is NOT
        // replaced by the structural title.
        let html = PAGE_HTML.replace(r#"<meta name="author" content="Jane Doe">"#, "");
        let merger = ExtractionMerger::with_defaults();
        let record = merger.extract(&html, "https://example.com/a", OutputFormat::Html).unwrap();

        assert_eq!(record.title.as_deref(), Some("Meta Title"));
        assert!(record.author.is_none());
    }

    #[test]
    fn test_metadata_absent_synthesizes_from_structural() {
        let merger = ExtractionMerger::new(Box::new(FixedContent), Box::new(NoMetadataExtractor));
        let record = merger
            .extract(PAGE_HTML, "https://example.com/a", OutputFormat::Html)
            .unwrap();

        assert_eq!(record.title.as_deref(), Some("Short Title"));
        assert!(record.author.is_none());
        assert!(record.date_published.is_none());
    }

    #[test]
    fn test_markdown_matches_conversion_of_html_output() {
        let merger = ExtractionMerger::with_defaults();
        let html_record = merger
            .extract(PAGE_HTML, "https://example.com/a", OutputFormat::Html)
            .unwrap();
        let md_record = merger
            .extract(PAGE_HTML, "https://example.com/a", OutputFormat::Markdown)
            .unwrap();

        assert_eq!(md_record.content, htmd::convert(&html_record.content).unwrap());
        assert!(!md_record.content.contains("<p>"));
    }

    #[test]
    fn test_record_constants_regardless_of_input() {
        let merger = ExtractionMerger::new(Box::new(FixedContent), Box::new(NoMetadataExtractor));
        let record = merger
            .extract("<html></html>", "https://example.com", OutputFormat::Html)
            .unwrap();

        assert_eq!(record.direction, "ltr");
        assert_eq!(record.total_pages, 1);
        assert_eq!(record.rendered_pages, 1);
        assert_eq!(record.word_count, 0);
        assert!(record.dek.is_none());
        assert!(record.lead_image_url.is_none());
        assert!(record.next_page_url.is_none());
        assert!(record.domain.is_none());
        assert!(record.excerpt.is_none());
        assert_eq!(record.url, "https://example.com");
    }

    #[test]
    fn test_unparseable_input_is_extract_error() {
        let merger = ExtractionMerger::with_defaults();
        let result = merger.extract("", "https://example.com", OutputFormat::Html);
        assert!(matches!(result, Err(Error::Extract(_))));
    }
}
