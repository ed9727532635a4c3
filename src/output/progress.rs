//! Progress reporting.
//!
//! Jobs report completion as a percentage through the [`ProgressReporter`]
//! trait. Any `FnMut(f64)` closure is a reporter, which is what most callers
//! use; the CLI plugs in the terminal [`ProgressBar`].
//!
//! # Examples
//!
//! ```
//! use pdfassemble::output::progress::{ProgressReporter, ProgressTracker};
//!
//! let mut seen = Vec::new();
//! let mut sink = |percent: f64| seen.push(percent);
//! let mut tracker = ProgressTracker::new(&mut sink, 4);
//! for _ in 0..4 {
//!     tracker.advance();
//! }
//! tracker.finish();
//! assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::Instant;

use crate::utils::format_duration;

/// A sink for percentage-complete updates in `[0, 100]`.
///
/// Calls are fire-and-forget. Within one job the values never decrease, and
/// 100 is only reached when the job succeeds.
pub trait ProgressReporter {
    /// Receive the current completion percentage.
    fn report(&mut self, percent: f64);
}

impl<F> ProgressReporter for F
where
    F: FnMut(f64),
{
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// A reporter that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _percent: f64) {}
}

/// Turns "one more unit done" into monotonic percentages for a reporter.
///
/// The last unit is held back: 100 is only reported by [`finish`], which
/// the job calls once its output is complete.
///
/// [`finish`]: ProgressTracker::finish
pub struct ProgressTracker<'a> {
    reporter: &'a mut dyn ProgressReporter,
    total: usize,
    completed: usize,
    last: f64,
}

impl<'a> ProgressTracker<'a> {
    /// Track `total` units of work.
    pub fn new(reporter: &'a mut dyn ProgressReporter, total: usize) -> Self {
        Self {
            reporter,
            total,
            completed: 0,
            last: 0.0,
        }
    }

    /// Mark one more unit complete and report the new percentage.
    pub fn advance(&mut self) {
        self.completed = (self.completed + 1).min(self.total);
        if self.completed < self.total {
            self.emit(self.percent());
        }
    }

    /// Report 100, consuming the tracker.
    pub fn finish(mut self) {
        self.completed = self.total;
        self.emit(100.0);
    }

    fn emit(&mut self, percent: f64) {
        // Never step backwards.
        if percent > self.last {
            self.last = percent;
            self.reporter.report(percent);
        }
    }

    /// Units completed so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// `completed / total * 100`, clamped to `[0, 100]`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Terminal progress bar: `label [=========>          ] 45% 3s`.
pub struct ProgressBar {
    /// Optional label shown before the bar.
    message: Option<String>,
    /// Last percentage received.
    percent: f64,
    /// Start time of the operation.
    start_time: Instant,
    /// Whether anything is drawn.
    enabled: bool,
    /// Bar width in characters.
    width: usize,
}

impl ProgressBar {
    /// Create a progress bar that draws to stderr when it is a terminal.
    pub fn new() -> Self {
        Self {
            message: None,
            percent: 0.0,
            start_time: Instant::now(),
            enabled: io::stderr().is_terminal(),
            width: 40,
        }
    }

    /// Create a progress bar that never draws.
    pub fn disabled() -> Self {
        let mut bar = Self::new();
        bar.enabled = false;
        bar
    }

    /// Set the label shown before the bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Last percentage received.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Clear the bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            eprint!("\r\x1b[K");
            io::stderr().flush().ok();
        }
    }

    /// Finish the line so later output starts on a fresh one.
    pub fn finish(&self) {
        if self.enabled {
            eprintln!();
        }
    }

    fn render(&self) -> String {
        let filled = ((self.percent / 100.0) * self.width as f64).round() as usize;
        let filled = filled.min(self.width);
        let empty = self.width - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let mut parts = vec![
            bar,
            format!("{:.0}%", self.percent),
            format_duration(self.start_time.elapsed()),
        ];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ProgressBar {
    fn report(&mut self, percent: f64) {
        self.percent = percent.clamp(0.0, 100.0);
        if self.enabled {
            eprint!("\r{}", self.render());
            io::stderr().flush().ok();
        }
    }
}
