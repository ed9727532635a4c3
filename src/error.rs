//! Error types for pdfassemble.
//!
//! Every fallible operation in the crate returns [`AssembleError`]. Errors are
//! grouped so callers can tell a user-correctable mistake (a bad page range)
//! apart from a failed job or a failed save.
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed page ranges, invalid configuration
//! - **Job Errors**: a merge or split aborted because a source could not be processed
//! - **Selection Errors**: list mutations with an index that does not exist
//! - **Output Errors**: the finished document could not be persisted

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfassemble operations.
pub type Result<T> = std::result::Result<T, AssembleError>;

/// Main error type for pdfassemble operations.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// The page range expression could not be parsed.
    #[error("Invalid page range '{expression}': {reason}")]
    InvalidRange {
        /// The expression as entered by the user.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A selection list operation referenced a position that does not exist.
    #[error("Index {index} is out of range for a selection of {len} document(s)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// No documents were provided for merging.
    #[error("No PDF documents selected for merging")]
    NoFilesToMerge,

    /// A merge job aborted.
    #[error("Merge failed at '{document}': {cause}")]
    MergeFailed {
        /// Name of the source document being processed, or `output` when
        /// the merged document itself could not be serialized.
        document: String,
        /// Underlying cause.
        #[source]
        cause: JobFailure,
    },

    /// A split job aborted.
    #[error("Page extraction from '{document}' failed: {cause}")]
    SplitFailed {
        /// Name of the source document.
        document: String,
        /// Underlying cause.
        #[source]
        cause: JobFailure,
    },

    /// A source document could not be inspected outside of a job.
    #[error("Failed to load PDF: {document}\n  Reason: {cause}")]
    FailedToLoadPdf {
        /// Name of the source document.
        document: String,
        /// Underlying cause.
        #[source]
        cause: JobFailure,
    },

    /// The finished document could not be saved.
    #[error("Failed to save {filename}\n  Reason: {source}")]
    PersistFailed {
        /// Requested output filename.
        filename: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

/// Why a merge or split job stopped.
#[derive(Debug, thiserror::Error)]
pub enum JobFailure {
    /// The PDF library rejected the bytes or a structural lookup failed.
    #[error(transparent)]
    Pdf(#[from] lopdf::Error),

    /// The document parsed but its page tree is unusable.
    #[error("{0}")]
    Structure(String),

    /// No pages were requested.
    #[error("no pages selected")]
    EmptySelection,

    /// A requested page does not exist in the parsed document.
    #[error("page {page} does not exist (document has {page_count} pages)")]
    PageOutOfBounds {
        /// Requested 1-based page number.
        page: u32,
        /// Pages actually present.
        page_count: usize,
    },

    /// The background parse task did not complete.
    #[error("parse task did not complete: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl AssembleError {
    /// Create an InvalidRange error.
    pub fn invalid_range(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(document: impl Into<String>, cause: impl Into<JobFailure>) -> Self {
        Self::MergeFailed {
            document: document.into(),
            cause: cause.into(),
        }
    }

    /// Create a SplitFailed error.
    pub fn split_failed(document: impl Into<String>, cause: impl Into<JobFailure>) -> Self {
        Self::SplitFailed {
            document: document.into(),
            cause: cause.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(document: impl Into<String>, cause: impl Into<JobFailure>) -> Self {
        Self::FailedToLoadPdf {
            document: document.into(),
            cause: cause.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether the user can fix this by editing their input and retrying.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. }
                | Self::InvalidConfig { .. }
                | Self::NoFilesToMerge
                | Self::OutputExists { .. }
                | Self::FileNotFound { .. }
                | Self::NotAFile { .. }
        )
    }

    /// Whether a job ran and aborted.
    pub fn is_job_failure(&self) -> bool {
        matches!(self, Self::MergeFailed { .. } | Self::SplitFailed { .. })
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidRange { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::NoFilesToMerge => 1,
            Self::IndexOutOfRange { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::PersistFailed { .. } => 5,
            Self::Io { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::SplitFailed { .. } => 6,
        }
    }
}

impl From<&str> for JobFailure {
    fn from(message: &str) -> Self {
        Self::Structure(message.to_string())
    }
}

impl From<String> for JobFailure {
    fn from(message: String) -> Self {
        Self::Structure(message)
    }
}
