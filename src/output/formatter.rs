//! Message formatting and display.
//!
//! Everything the user reads on the terminal goes through
//! [`OutputFormatter`], which honours `--quiet` and `--verbose`.
//!
//! # Examples
//!
//! ```
//! use pdfassemble::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Reading 3 file(s)...");
//! formatter.success("Merged 3 file(s)");
//! formatter.error("Something went wrong");
//! ```

use std::io;

use crate::config::Config;
use crate::document::SourceDocument;
use crate::error::Result;
use crate::merge::{DocumentSummary, JobStatistics};
use crate::session::StatusMessage;

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Debug => "\x1b[36m",
        }
    }
}

/// Output formatter with configurable verbosity.
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    ///
    /// JSON mode silences everything except the final status.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet || config.json, config.verbose && !config.json)
    }

    /// Create a quiet formatter (only errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message. Always displayed.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message to stderr. Always displayed.
    pub fn error(&self, message: &str) {
        let level = MessageLevel::Error;
        if self.colored {
            eprintln!("{}{}{message}\x1b[0m", level.color(), level.prefix());
        } else {
            eprintln!("{}{message}", level.prefix());
        }
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Format a message with its level prefix, without color.
    pub fn format_message(level: MessageLevel, message: &str) -> String {
        format!("{}{message}", level.prefix())
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let color = level.color();
        if self.colored && !color.is_empty() {
            println!("{color}{}{message}\x1b[0m", level.prefix());
        } else {
            println!("{}", Self::format_message(level, message));
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a labelled detail line. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a numbered list item. Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// List documents in order with their page counts.
    ///
    /// `summaries` pairs with `documents` by position. Unreadable documents
    /// are listed with the reason instead of aborting the listing. In verbose
    /// mode each entry is followed by its page size and object count.
    pub fn document_list(
        &self,
        documents: &[SourceDocument],
        summaries: &[Result<DocumentSummary>],
    ) {
        for (i, (document, summary)) in documents.iter().zip(summaries).enumerate() {
            self.list_item(i + 1, &describe_document(document, summary));

            if let Ok(summary) = summary {
                log::debug!(
                    "{}: PDF {}, {} page(s), {} object(s), first page {}",
                    document.name(),
                    summary.version,
                    summary.page_count,
                    summary.object_count,
                    format_page_size(summary.first_page_size)
                );
                for (label, value) in summary_details(summary) {
                    self.detail(label, &value);
                }
            }
        }
    }

    /// Print job statistics. Only shown in verbose mode.
    pub fn statistics(&self, stats: &JobStatistics) {
        self.detail("Documents", &stats.documents.to_string());
        self.detail("Pages", &stats.total_pages.to_string());
        self.detail("Input size", &stats.format_input_size());
        self.detail("Output size", &stats.format_output_size());
        self.detail("Time", &crate::utils::format_duration(stats.elapsed));
    }

    /// Print a final status, as success or error depending on its kind.
    pub fn status(&self, status: &StatusMessage) {
        let message = status.to_string();
        if status.is_error() {
            self.error(&message);
        } else {
            self.success(&message);
        }
    }

    /// True if non-quiet mode.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// One-line description of a listed document.
pub fn describe_document(document: &SourceDocument, summary: &Result<DocumentSummary>) -> String {
    match summary {
        Ok(summary) => format!(
            "{} ({} page(s), PDF {}, {})",
            document.name(),
            summary.page_count,
            summary.version,
            crate::utils::format_file_size(document.size())
        ),
        Err(err) => format!("{} (unreadable: {err})", document.name()),
    }
}

/// Verbose detail lines for a document summary.
pub fn summary_details(summary: &DocumentSummary) -> Vec<(&'static str, String)> {
    vec![
        ("First page", format_page_size(summary.first_page_size)),
        ("Objects", summary.object_count.to_string()),
    ]
}

fn format_page_size(size: Option<(f32, f32)>) -> String {
    match size {
        Some((width, height)) => format!("{width:.0} x {height:.0} pt"),
        None => "inherited".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompressionLevel, Operation, OverwriteMode};
    use std::path::PathBuf;

    fn config(quiet: bool, verbose: bool, json: bool) -> Config {
        Config {
            operation: Operation::Merge {
                inputs: vec![PathBuf::from("a.pdf")],
            },
            output: PathBuf::from("merged.pdf"),
            dry_run: false,
            verbose,
            quiet,
            json,
            overwrite_mode: OverwriteMode::NoClobber,
            compression: CompressionLevel::Standard,
        }
    }

    #[test]
    fn test_quiet_formatter() {
        let formatter = OutputFormatter::quiet();
        assert!(formatter.is_quiet());
        assert!(!formatter.is_verbose());
        assert!(!formatter.should_print());
    }

    #[test]
    fn test_verbose_formatter() {
        let formatter = OutputFormatter::verbose();
        assert!(!formatter.is_quiet());
        assert!(formatter.is_verbose());
    }

    #[test]
    fn test_json_mode_is_quiet() {
        let formatter = OutputFormatter::from_config(&config(false, true, true));
        assert!(formatter.is_quiet());
        assert!(!formatter.is_verbose());
    }

    #[test]
    fn test_from_config_plain() {
        let formatter = OutputFormatter::from_config(&config(false, false, false));
        assert!(formatter.should_print());
        assert!(!formatter.is_verbose());
    }

    #[test]
    fn test_format_message_prefixes() {
        assert_eq!(
            OutputFormatter::format_message(MessageLevel::Success, "done"),
            "✓ done"
        );
        assert_eq!(
            OutputFormatter::format_message(MessageLevel::Error, "bad"),
            "✗ bad"
        );
        assert_eq!(
            OutputFormatter::format_message(MessageLevel::Info, "plain"),
            "plain"
        );
    }

    #[test]
    fn test_document_list_with_unreadable_document() {
        let formatter = OutputFormatter::quiet();
        let document = SourceDocument::new("junk.pdf", b"junk".to_vec());
        let summaries = vec![document.summary()];
        // Must not panic on junk input.
        formatter.document_list(std::slice::from_ref(&document), &summaries);
        assert!(describe_document(&document, &summaries[0]).starts_with("junk.pdf (unreadable: "));
    }

    #[test]
    fn test_verbose_summary_details() {
        let summary = DocumentSummary {
            version: "1.7".to_string(),
            page_count: 3,
            object_count: 12,
            first_page_size: Some((612.0, 792.0)),
        };
        let document = SourceDocument::new("letter.pdf", vec![0u8; 2048]);

        assert_eq!(
            describe_document(&document, &Ok(summary.clone())),
            "letter.pdf (3 page(s), PDF 1.7, 2.00 KB)"
        );
        assert_eq!(
            summary_details(&summary),
            vec![
                ("First page", "612 x 792 pt".to_string()),
                ("Objects", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_size_without_media_box() {
        assert_eq!(format_page_size(None), "inherited");
    }
}
