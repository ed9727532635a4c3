//! Split job: copy a selection of pages out of one document.

use std::time::Instant;

use crate::config::CompressionLevel;
use crate::document::SourceDocument;
use crate::error::{AssembleError, JobFailure, Result};
use crate::merge::JobStatistics;
use crate::merge::pages::OutputDocument;
use crate::output::progress::{ProgressReporter, ProgressTracker};
use crate::range::PageRange;

/// Result of a successful split.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// The serialized output document.
    pub bytes: Vec<u8>,
    /// The pages that were copied, ascending.
    pub pages: PageRange,
    /// Statistics about the split.
    pub statistics: JobStatistics,
}

/// Extracts pages from a single document into a new one.
#[derive(Debug, Clone, Default)]
pub struct SplitJob {
    compression: CompressionLevel,
}

impl SplitJob {
    /// Create a split job with standard compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression applied to the output.
    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Copy `pages` out of `document`.
    ///
    /// The source is parsed once. Pages are appended in ascending page order
    /// regardless of how the range was written, and progress is reported after
    /// each page as `pages copied / pages requested`.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::SplitFailed`] if `pages` is empty, if the
    /// document cannot be parsed, or if a requested page does not exist.
    pub async fn run(
        &self,
        document: &SourceDocument,
        pages: &PageRange,
        progress: &mut dyn ProgressReporter,
    ) -> Result<SplitOutput> {
        let fail = |cause: JobFailure| AssembleError::split_failed(document.name(), cause);

        if pages.is_empty() {
            return Err(fail(JobFailure::EmptySelection));
        }

        let start = Instant::now();
        let parsed = document.parse_blocking().await.map_err(fail)?;

        let mut output = OutputDocument::new();
        let imported = output.import(parsed).map_err(fail)?;
        let mut tracker = ProgressTracker::new(progress, pages.len());

        for page in pages.iter() {
            let page_id = imported.page_id(page).ok_or_else(|| {
                fail(JobFailure::PageOutOfBounds {
                    page,
                    page_count: imported.page_count(),
                })
            })?;

            output.append_page(page_id).map_err(fail)?;
            log::debug!("Copied page {page} of {}", document.name());
            tracker.advance();
        }

        let total_pages = output.page_count();
        let bytes = output.finish(self.compression).map_err(fail)?;

        tracker.finish();

        let statistics = JobStatistics {
            documents: 1,
            total_pages,
            input_size: document.size(),
            output_size: bytes.len() as u64,
            elapsed: start.elapsed(),
        };

        log::info!(
            "Extracted pages {} of {} ({} pages)",
            pages,
            document.name(),
            total_pages
        );

        Ok(SplitOutput {
            bytes,
            pages: pages.clone(),
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::pages::tests::{page_labels, sample_pdf};
    use crate::output::progress::NoProgress;

    fn ten_pages() -> SourceDocument {
        SourceDocument::new("ten.pdf", sample_pdf("p", 10))
    }

    #[tokio::test]
    async fn test_split_follows_ascending_order() {
        let doc = ten_pages();
        let range = PageRange::parse("5,1-3", 10).unwrap();

        let output = SplitJob::new()
            .run(&doc, &range, &mut NoProgress)
            .await
            .unwrap();

        assert_eq!(output.statistics.total_pages, 4);
        assert_eq!(page_labels(&output.bytes), vec!["p-1", "p-2", "p-3", "p-5"]);
    }

    #[tokio::test]
    async fn test_split_reports_progress_per_page() {
        let doc = ten_pages();
        let range = PageRange::parse("2,4", 10).unwrap();
        let mut seen = Vec::new();
        let mut sink = |p: f64| seen.push(p);

        SplitJob::new().run(&doc, &range, &mut sink).await.unwrap();

        assert_eq!(seen, vec![50.0, 100.0]);
    }

    #[tokio::test]
    async fn test_split_empty_range_fails() {
        let doc = ten_pages();
        let range = PageRange::parse("20-30", 10).unwrap();

        let result = SplitJob::new().run(&doc, &range, &mut NoProgress).await;

        assert!(matches!(
            result,
            Err(AssembleError::SplitFailed {
                cause: JobFailure::EmptySelection,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_split_range_parsed_for_larger_document_fails() {
        let doc = SourceDocument::new("three.pdf", sample_pdf("t", 3));
        let range = PageRange::parse("2-5", 5).unwrap();
        let mut seen = Vec::new();
        let mut sink = |p: f64| seen.push(p);

        let result = SplitJob::new().run(&doc, &range, &mut sink).await;

        assert!(matches!(
            result,
            Err(AssembleError::SplitFailed {
                cause: JobFailure::PageOutOfBounds { page: 4, page_count: 3 },
                ..
            })
        ));
        assert!(seen.iter().all(|p| *p < 100.0));
    }

    #[tokio::test]
    async fn test_split_unparseable_document_fails() {
        let doc = SourceDocument::new("junk.pdf", b"definitely not a pdf".to_vec());
        let range = PageRange::parse("1", 1).unwrap();

        let result = SplitJob::new().run(&doc, &range, &mut NoProgress).await;

        match result {
            Err(AssembleError::SplitFailed { document, .. }) => assert_eq!(document, "junk.pdf"),
            other => panic!("expected SplitFailed, got {other:?}"),
        }
    }
}
