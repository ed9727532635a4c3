//! Configuration module for pdfassemble.
//!
//! The CLI is turned into a validated [`Config`] before anything is read or
//! written. This module handles:
//! - Validation of argument combinations
//! - Application of defaults (output file names)
//! - Log level selection

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AssembleError, Result};

/// Default file name of a merged document.
pub const MERGED_FILENAME: &str = "merged.pdf";

/// Compression applied to the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Streams are written as they are.
    None,
    /// Uncompressed streams are Flate-compressed.
    #[default]
    Standard,
}

impl FromStr for CompressionLevel {
    type Err = AssembleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            _ => Err(AssembleError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace an existing file.
    Force,
    /// Never overwrite, error if the file exists (default).
    #[default]
    NoClobber,
}

/// What the run should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Concatenate all inputs in order.
    Merge {
        /// Input paths or glob patterns, in merge order.
        inputs: Vec<PathBuf>,
    },
    /// Extract a page range from one input.
    Split {
        /// The source PDF.
        input: PathBuf,
        /// Page range expression, parsed once the page count is known.
        pages: String,
    },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Merge or split, with its inputs.
    pub operation: Operation,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Dry run mode - validate and show the plan without writing output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the final status as JSON.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified for a merge
    /// - Verbose and quiet modes are both enabled
    /// - The split page range is blank
    /// - The output path has no file name or is not a `.pdf` file
    pub fn validate(&self) -> Result<()> {
        match &self.operation {
            Operation::Merge { inputs } if inputs.is_empty() => {
                return Err(AssembleError::NoFilesToMerge);
            }
            Operation::Split { pages, .. } if pages.trim().is_empty() => {
                return Err(AssembleError::invalid_range(
                    pages.as_str(),
                    "page range cannot be empty",
                ));
            }
            _ => {}
        }

        if self.verbose && self.quiet {
            return Err(AssembleError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.output.file_name().is_none() {
            return Err(AssembleError::invalid_config(format!(
                "Output path has no file name: {}",
                self.output.display()
            )));
        }

        if !crate::io::is_pdf_name(&self.output.to_string_lossy()) {
            return Err(AssembleError::invalid_config(format!(
                "Output must be a .pdf file: {}",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// Directory the output is written into.
    pub fn output_dir(&self) -> &Path {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// File name of the output.
    pub fn output_filename(&self) -> String {
        self.output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| MERGED_FILENAME.to_string())
    }

    /// Log level implied by `--verbose` and `--quiet`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}

/// Default output name for pages extracted from `input`: `<stem>_pages.pdf`.
pub fn split_filename(input: &str) -> String {
    let stem = Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "document".to_string());
    format!("{stem}_pages.pdf")
}
