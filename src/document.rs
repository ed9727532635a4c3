//! Source documents.

use lopdf::Document;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{AssembleError, JobFailure, Result};
use crate::merge::pages::{DocumentSummary, summarize};

/// An input PDF: a name plus its immutable byte content.
///
/// Cloning is cheap; clones share the same buffer and the same cached page
/// count.
#[derive(Clone)]
pub struct SourceDocument {
    name: String,
    content: Arc<[u8]>,
    page_count: Arc<OnceLock<usize>>,
}

impl SourceDocument {
    /// Create a source document from a name and its raw bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            page_count: Arc::new(OnceLock::new()),
        }
    }

    /// Display name, usually the file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    /// Size of the raw content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Number of pages, parsed on first use and cached afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::FailedToLoadPdf`] if the bytes are not a readable PDF.
    pub fn page_count(&self) -> Result<usize> {
        if let Some(count) = self.page_count.get() {
            return Ok(*count);
        }

        let document = self
            .parse()
            .map_err(|err| AssembleError::failed_to_load_pdf(&self.name, err))?;

        Ok(self.record_page_count(document.get_pages().len()))
    }

    /// Number of pages, parsing on tokio's blocking pool when not yet cached.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::FailedToLoadPdf`] if the bytes are not a readable PDF.
    pub async fn page_count_blocking(&self) -> Result<usize> {
        if let Some(count) = self.page_count.get() {
            return Ok(*count);
        }

        let document = self
            .parse_blocking()
            .await
            .map_err(|err| AssembleError::failed_to_load_pdf(&self.name, err))?;
        Ok(document.get_pages().len())
    }

    /// Version, page count and first page size of the document.
    pub fn summary(&self) -> Result<DocumentSummary> {
        let document = self
            .parse()
            .map_err(|err| AssembleError::failed_to_load_pdf(&self.name, err))?;
        let summary = summarize(&document);
        self.record_page_count(summary.page_count);
        Ok(summary)
    }

    /// [`summary`](Self::summary), parsed on tokio's blocking pool.
    pub async fn summary_blocking(&self) -> Result<DocumentSummary> {
        let document = self
            .parse_blocking()
            .await
            .map_err(|err| AssembleError::failed_to_load_pdf(&self.name, err))?;
        Ok(summarize(&document))
    }

    /// Parse the bytes into a fresh [`Document`].
    ///
    /// Every call yields an independent document, so one source can be read
    /// by several jobs or several times within the same job.
    pub(crate) fn parse(&self) -> std::result::Result<Document, JobFailure> {
        Ok(Document::load_mem(&self.content)?)
    }

    /// Parse on tokio's blocking pool.
    pub(crate) async fn parse_blocking(&self) -> std::result::Result<Document, JobFailure> {
        let content = Arc::clone(&self.content);
        let document = tokio::task::spawn_blocking(move || Document::load_mem(&content)).await??;
        self.record_page_count(document.get_pages().len());
        Ok(document)
    }

    fn record_page_count(&self, count: usize) -> usize {
        *self.page_count.get_or_init(|| count)
    }
}

impl fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDocument")
            .field("name", &self.name)
            .field("size", &self.content.len())
            .field("page_count", &self.page_count.get())
            .finish()
    }
}
