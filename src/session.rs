//! The UI-facing session.
//!
//! A front end (the CLI here, a desktop or web shell elsewhere) turns user
//! actions into [`UiEvent`]s. [`Session`] owns the selection list, runs the
//! requested job, hands the result to an [`OutputDispatcher`], and answers
//! every event with a [`StatusMessage`] that can be shown to the user as is.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::{CompressionLevel, MERGED_FILENAME, split_filename};
use crate::document::SourceDocument;
use crate::error::AssembleError;
use crate::io::{OutputDispatcher, is_pdf_name};
use crate::merge::{JobStatistics, MergeJob, SplitJob};
use crate::output::progress::ProgressReporter;
use crate::range::PageRange;
use crate::selection::SelectionList;

/// A change to the order of the selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    /// Swap with the previous entry.
    MoveUp(usize),
    /// Swap with the next entry.
    MoveDown(usize),
    /// Drop the entry.
    Remove(usize),
}

/// Something the user asked for.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Files were picked. Non-PDF files are ignored.
    FilesSelected(Vec<SourceDocument>),
    /// The list was reordered or an entry removed.
    ListReordered(Reorder),
    /// Merge everything currently selected.
    MergeRequested,
    /// Extract pages from one document.
    SplitRequested {
        /// The document to extract from.
        document: SourceDocument,
        /// Page range expression as typed.
        expression: String,
    },
}

/// Outcome of an event, phrased for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusMessage {
    /// The selection changed.
    SelectionUpdated {
        /// Documents now selected, in order.
        documents: Vec<String>,
        /// Inputs ignored because they are not PDFs.
        skipped: usize,
    },
    /// Nothing to work on.
    NoPdfFiles,
    /// A merge finished and was saved.
    Merged {
        /// Where the output was saved.
        path: PathBuf,
        /// Documents merged.
        documents: usize,
        /// Pages in the output.
        pages: usize,
    },
    /// A split finished and was saved.
    Split {
        /// Where the output was saved.
        path: PathBuf,
        /// The pages extracted, in canonical range form.
        pages: String,
        /// Pages in the output.
        page_count: usize,
    },
    /// The range text was rejected before any work started.
    InvalidRange {
        /// Explanation.
        message: String,
    },
    /// The list operation referenced a missing entry.
    SelectionError {
        /// Explanation.
        message: String,
    },
    /// The merge job aborted.
    MergeFailed {
        /// Explanation.
        message: String,
    },
    /// The split job aborted.
    SplitFailed {
        /// Explanation.
        message: String,
    },
    /// The job succeeded but the output could not be saved.
    SaveFailed {
        /// Explanation.
        message: String,
    },
}

impl StatusMessage {
    /// True for every failure status.
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Self::SelectionUpdated { .. } | Self::Merged { .. } | Self::Split { .. }
        )
    }

    /// Process exit code for this status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SelectionUpdated { .. } | Self::Merged { .. } | Self::Split { .. } => 0,
            Self::NoPdfFiles | Self::InvalidRange { .. } | Self::SelectionError { .. } => 1,
            Self::SaveFailed { .. } => 5,
            Self::MergeFailed { .. } | Self::SplitFailed { .. } => 6,
        }
    }

    /// Serialize as a single JSON object.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(r#"{{"status":"error","message":"failed to encode status: {err}"}}"#)
        })
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionUpdated { documents, skipped } => {
                write!(f, "{} PDF file(s) selected", documents.len())?;
                if *skipped > 0 {
                    write!(f, " ({skipped} non-PDF file(s) ignored)")?;
                }
                Ok(())
            }
            Self::NoPdfFiles => write!(f, "No PDF files found"),
            Self::Merged {
                path,
                documents,
                pages,
            } => write!(
                f,
                "Merged {documents} file(s) into {pages} page(s) and saved {}",
                path.display()
            ),
            Self::Split {
                path,
                pages,
                page_count,
            } => write!(
                f,
                "Extracted page(s) {pages} ({page_count} page(s)) and saved {}",
                path.display()
            ),
            Self::InvalidRange { message } => write!(f, "{message}"),
            Self::SelectionError { message } => write!(f, "Selection not changed: {message}"),
            Self::MergeFailed { message } => {
                write!(f, "PDF merge failed, please try again: {message}")
            }
            Self::SplitFailed { message } => {
                write!(f, "Page extraction failed, please try again: {message}")
            }
            Self::SaveFailed { message } => write!(f, "Saving failed, please try again: {message}"),
        }
    }
}

/// Owns the selection and turns UI events into jobs and status messages.
pub struct Session<D: OutputDispatcher> {
    selection: SelectionList,
    dispatcher: D,
    merge_job: MergeJob,
    split_job: SplitJob,
    merged_filename: String,
    split_filename: Option<String>,
    last_statistics: Option<JobStatistics>,
}

impl<D: OutputDispatcher> Session<D> {
    /// Create a session that saves through `dispatcher`.
    pub fn new(dispatcher: D) -> Self {
        Self {
            selection: SelectionList::new(),
            dispatcher,
            merge_job: MergeJob::new(),
            split_job: SplitJob::new(),
            merged_filename: MERGED_FILENAME.to_string(),
            split_filename: None,
            last_statistics: None,
        }
    }

    /// Set the compression used by both jobs.
    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.merge_job = MergeJob::new().with_compression(compression);
        self.split_job = SplitJob::new().with_compression(compression);
        self
    }

    /// File name used for merged output.
    pub fn with_merged_filename(mut self, filename: impl Into<String>) -> Self {
        self.merged_filename = filename.into();
        self
    }

    /// File name used for split output instead of `<stem>_pages.pdf`.
    pub fn with_split_filename(mut self, filename: impl Into<String>) -> Self {
        self.split_filename = Some(filename.into());
        self
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionList {
        &self.selection
    }

    /// The dispatcher output is saved through.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Statistics of the most recent job that produced output.
    ///
    /// Set even when saving that output failed; cleared when a job fails.
    pub fn last_statistics(&self) -> Option<&JobStatistics> {
        self.last_statistics.as_ref()
    }

    /// Handle one event.
    ///
    /// Jobs started by the event report progress to `progress`.
    pub async fn handle(
        &mut self,
        event: UiEvent,
        progress: &mut dyn ProgressReporter,
    ) -> StatusMessage {
        match event {
            UiEvent::FilesSelected(files) => self.select_files(files),
            UiEvent::ListReordered(reorder) => self.reorder(reorder),
            UiEvent::MergeRequested => self.merge(progress).await,
            UiEvent::SplitRequested {
                document,
                expression,
            } => self.split(document, &expression, progress).await,
        }
    }

    fn select_files(&mut self, files: Vec<SourceDocument>) -> StatusMessage {
        let total = files.len();
        let pdfs: Vec<SourceDocument> = files
            .into_iter()
            .filter(|doc| {
                let keep = is_pdf_name(doc.name());
                if !keep {
                    log::warn!("Ignoring non-PDF input: {}", doc.name());
                }
                keep
            })
            .collect();
        let skipped = total - pdfs.len();

        if pdfs.is_empty() && self.selection.is_empty() {
            return StatusMessage::NoPdfFiles;
        }

        self.selection.add(pdfs);
        self.selection_updated(skipped)
    }

    fn reorder(&mut self, reorder: Reorder) -> StatusMessage {
        let result = match reorder {
            Reorder::MoveUp(index) => self.selection.move_up(index),
            Reorder::MoveDown(index) => self.selection.move_down(index),
            Reorder::Remove(index) => self.selection.remove(index).map(drop),
        };

        match result {
            Ok(()) => self.selection_updated(0),
            Err(err) => StatusMessage::SelectionError {
                message: err.to_string(),
            },
        }
    }

    async fn merge(&mut self, progress: &mut dyn ProgressReporter) -> StatusMessage {
        if self.selection.is_empty() {
            return StatusMessage::NoPdfFiles;
        }

        let snapshot = self.selection.snapshot();
        log::info!("Merging {} PDF file(s)", snapshot.len());

        self.last_statistics = None;
        let output = match self.merge_job.run(&snapshot, progress).await {
            Ok(output) => output,
            Err(err) => {
                log::error!("PDF merge failed: {err}");
                return StatusMessage::MergeFailed {
                    message: err.to_string(),
                };
            }
        };

        self.last_statistics = Some(output.statistics.clone());

        match self.dispatcher.dispatch(&output.bytes, &self.merged_filename) {
            Ok(path) => StatusMessage::Merged {
                path,
                documents: output.statistics.documents,
                pages: output.statistics.total_pages,
            },
            Err(err) => save_failed(err),
        }
    }

    async fn split(
        &mut self,
        document: SourceDocument,
        expression: &str,
        progress: &mut dyn ProgressReporter,
    ) -> StatusMessage {
        let page_count = match document.page_count_blocking().await {
            Ok(count) => count,
            Err(err) => {
                return StatusMessage::SplitFailed {
                    message: err.to_string(),
                };
            }
        };

        let total_pages = u32::try_from(page_count).unwrap_or(u32::MAX);
        let pages = match PageRange::parse(expression, total_pages) {
            Ok(pages) if pages.is_empty() => {
                return StatusMessage::InvalidRange {
                    message: AssembleError::invalid_range(
                        expression,
                        format!("no page in range; document has {page_count} page(s)"),
                    )
                    .to_string(),
                };
            }
            Ok(pages) => pages,
            Err(err) => {
                return StatusMessage::InvalidRange {
                    message: err.to_string(),
                };
            }
        };

        self.last_statistics = None;
        let output = match self.split_job.run(&document, &pages, progress).await {
            Ok(output) => output,
            Err(err) => {
                log::error!("Page extraction failed: {err}");
                return StatusMessage::SplitFailed {
                    message: err.to_string(),
                };
            }
        };

        self.last_statistics = Some(output.statistics.clone());

        let filename = self
            .split_filename
            .clone()
            .unwrap_or_else(|| split_filename(document.name()));

        match self.dispatcher.dispatch(&output.bytes, &filename) {
            Ok(path) => StatusMessage::Split {
                path,
                pages: output.pages.to_string(),
                page_count: output.statistics.total_pages,
            },
            Err(err) => save_failed(err),
        }
    }

    fn selection_updated(&self, skipped: usize) -> StatusMessage {
        StatusMessage::SelectionUpdated {
            documents: self
                .selection
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            skipped,
        }
    }
}

fn save_failed(err: AssembleError) -> StatusMessage {
    log::error!("Saving output failed: {err}");
    StatusMessage::SaveFailed {
        message: err.to_string(),
    }
}
