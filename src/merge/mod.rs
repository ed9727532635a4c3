//! Document assembly jobs.
//!
//! - [`MergeJob`] concatenates whole documents in list order.
//! - [`SplitJob`] copies a page selection out of one document.
//!
//! Both jobs are all-or-nothing: they either return the complete output
//! bytes or an error, never a partial document.

pub mod merger;
pub mod pages;
pub mod splitter;

pub use merger::{MergeJob, MergeOutput};
pub use pages::{DocumentSummary, OutputDocument};
pub use splitter::{SplitJob, SplitOutput};

use serde::Serialize;
use std::time::Duration;

use crate::utils::format_file_size;

/// Statistics about a finished job.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatistics {
    /// Number of source documents read.
    pub documents: usize,
    /// Pages in the output document.
    pub total_pages: usize,
    /// Total size of the inputs in bytes.
    pub input_size: u64,
    /// Size of the output in bytes.
    pub output_size: u64,
    /// Wall time spent in the job.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl JobStatistics {
    /// Input size as a human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Output size as a human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}
