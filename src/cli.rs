//! CLI argument parsing for pdfassemble.
//!
//! Defines the command-line interface with `clap` and turns it into a
//! validated [`Config`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfassemble::config::{
    CompressionLevel, Config, MERGED_FILENAME, Operation, OverwriteMode, split_filename,
};
use pdfassemble::error::Result;

/// Merge PDF files or extract pages from one.
#[derive(Parser, Debug)]
#[command(name = "pdfassemble")]
#[command(version)]
#[command(about = "Merge PDF files or extract page ranges", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// What to do.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files in the order given
    ///
    /// Directories expand to the PDF files below them, sorted by name.
    /// Glob patterns expand alphabetically.
    ///
    /// Examples:
    ///   pdfassemble merge a.pdf b.pdf -o book.pdf
    ///   pdfassemble merge 'chapter*.pdf'
    Merge {
        /// Input PDF files, directories or glob patterns
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        /// Output PDF file path [default: merged.pdf]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract a page range into a new PDF
    ///
    /// Pages are 1-based and always come out in ascending order.
    ///
    /// Examples:
    ///   pdfassemble split report.pdf --pages 1-3,5
    ///   pdfassemble split report.pdf --pages 8-12 -o tail.pdf
    Split {
        /// Source PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Page range, e.g. "1-3,5,7-8"
        #[arg(short, long, value_name = "RANGE")]
        pages: String,

        /// Output PDF file path [default: <INPUT stem>_pages.pdf]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Flags shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Dry run - resolve inputs and show the plan without writing output
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show details about each PDF
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing output file
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite an existing output file (default)
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for the output PDF
    ///
    /// - none: streams are written as they are
    /// - standard: uncompressed streams are compressed (default)
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard"])]
    pub compression: String,

    /// Print the final status as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is unknown or the
    /// resulting configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.global.compression)?;

        let overwrite_mode = match (self.global.force, self.global.no_clobber) {
            (true, _) => OverwriteMode::Force,
            (false, true) | (false, false) => OverwriteMode::NoClobber,
        };

        let (operation, output) = match &self.command {
            Command::Merge { inputs, output } => (
                Operation::Merge {
                    inputs: inputs.clone(),
                },
                output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(MERGED_FILENAME)),
            ),
            Command::Split {
                input,
                pages,
                output,
            } => {
                let default_output = || {
                    PathBuf::from(split_filename(&input.file_name().map_or_else(
                        || input.to_string_lossy(),
                        |name| name.to_string_lossy(),
                    )))
                };
                (
                    Operation::Split {
                        input: input.clone(),
                        pages: pages.clone(),
                    },
                    output.clone().unwrap_or_else(default_output),
                )
            }
        };

        let config = Config {
            operation,
            output,
            dry_run: self.global.dry_run,
            verbose: self.global.verbose,
            quiet: self.global.quiet,
            json: self.global.json,
            overwrite_mode,
            compression,
        };

        config.validate()?;
        Ok(config)
    }
}
