//! Merge job: concatenate every page of every selected document.

use std::time::Instant;

use crate::config::CompressionLevel;
use crate::document::SourceDocument;
use crate::error::{AssembleError, JobFailure, Result};
use crate::merge::JobStatistics;
use crate::merge::pages::OutputDocument;
use crate::output::progress::{ProgressReporter, ProgressTracker};

/// Names the merged document in failures that happen after every input
/// was imported.
const OUTPUT_LABEL: &str = "output";

fn output_failed(cause: JobFailure) -> AssembleError {
    AssembleError::merge_failed(OUTPUT_LABEL, cause)
}

/// Result of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The serialized output document.
    pub bytes: Vec<u8>,
    /// Statistics about the merge.
    pub statistics: JobStatistics,
}

/// Combines an ordered list of documents into one.
#[derive(Debug, Clone, Default)]
pub struct MergeJob {
    compression: CompressionLevel,
}

impl MergeJob {
    /// Create a merge job with standard compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression applied to the output.
    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Merge `documents` in order.
    ///
    /// All pages of each document are appended in their original order, and
    /// documents follow the order of the slice. Progress is reported after each
    /// document as `documents processed / total documents`.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::NoFilesToMerge`] for an empty slice, and
    /// [`AssembleError::MergeFailed`] if any document cannot be parsed or
    /// copied. A failed merge returns no bytes at all.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfassemble::document::SourceDocument;
    /// # use pdfassemble::merge::MergeJob;
    /// # async fn example(a: SourceDocument, b: SourceDocument) -> pdfassemble::Result<()> {
    /// let output = MergeJob::new()
    ///     .run(&[a, b], &mut |percent: f64| println!("{percent:.0}%"))
    ///     .await?;
    /// println!("{} pages", output.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(
        &self,
        documents: &[SourceDocument],
        progress: &mut dyn ProgressReporter,
    ) -> Result<MergeOutput> {
        if documents.is_empty() {
            return Err(AssembleError::NoFilesToMerge);
        }

        let start = Instant::now();
        let mut output = OutputDocument::new();
        let mut tracker = ProgressTracker::new(progress, documents.len());

        for (idx, source) in documents.iter().enumerate() {
            log::debug!(
                "[{}/{}] Processing: {}",
                idx + 1,
                documents.len(),
                source.name()
            );

            let parsed = source
                .parse_blocking()
                .await
                .map_err(|err| AssembleError::merge_failed(source.name(), err))?;

            let imported = output
                .import(parsed)
                .map_err(|err| AssembleError::merge_failed(source.name(), err))?;

            for page_id in imported.page_ids() {
                output
                    .append_page(page_id)
                    .map_err(|err| AssembleError::merge_failed(source.name(), err))?;
            }

            log::debug!("  → {} pages added", imported.page_count());
            tracker.advance();
        }

        let total_pages = output.page_count();
        let bytes = output.finish(self.compression).map_err(output_failed)?;

        tracker.finish();

        let statistics = JobStatistics {
            documents: documents.len(),
            total_pages,
            input_size: documents.iter().map(SourceDocument::size).sum(),
            output_size: bytes.len() as u64,
            elapsed: start.elapsed(),
        };

        log::info!(
            "Merged {} document(s) into {} pages ({})",
            statistics.documents,
            statistics.total_pages,
            statistics.format_output_size()
        );

        Ok(MergeOutput { bytes, statistics })
    }
}
