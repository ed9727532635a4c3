//! User-facing output.
//!
//! - [`progress`] defines the progress callback jobs report through, plus a
//!   terminal progress bar implementing it.
//! - [`formatter`] prints status messages honouring quiet and verbose modes.

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{NoProgress, ProgressBar, ProgressReporter, ProgressTracker};
