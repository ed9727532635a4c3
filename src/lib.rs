//! pdfassemble - Merge PDF files and extract page ranges.
//!
//! This library provides the assembly engine behind the `pdfassemble`
//! binary. It supports:
//!
//! - Merging whole documents in a user-chosen order
//! - Extracting a page range such as `"1-3,5"` into a new document
//! - An ordered, editable selection of source documents
//! - Progress reporting through a plain callback
//! - Pluggable persistence of the finished bytes
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfassemble::document::SourceDocument;
//! use pdfassemble::merge::MergeJob;
//!
//! # async fn example() -> pdfassemble::Result<()> {
//! let documents = vec![
//!     SourceDocument::new("a.pdf", std::fs::read("a.pdf")?),
//!     SourceDocument::new("b.pdf", std::fs::read("b.pdf")?),
//! ];
//!
//! let mut progress = |percent: f64| println!("{percent:.0}%");
//! let output = MergeJob::new().run(&documents, &mut progress).await?;
//! println!("Created {} page document", output.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Split through a session
//!
//! ```no_run
//! use pdfassemble::config::OverwriteMode;
//! use pdfassemble::io::{FileDispatcher, read_source};
//! use pdfassemble::output::NoProgress;
//! use pdfassemble::session::{Session, UiEvent};
//! use std::path::Path;
//!
//! # async fn example() -> pdfassemble::Result<()> {
//! let document = read_source(Path::new("report.pdf")).await?;
//! let mut session = Session::new(FileDispatcher::new("out", OverwriteMode::Force));
//!
//! let status = session
//!     .handle(
//!         UiEvent::SplitRequested {
//!             document,
//!             expression: "1-3,5".to_string(),
//!         },
//!         &mut NoProgress,
//!     )
//!     .await;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod range;
pub mod selection;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use document::SourceDocument;
pub use error::{AssembleError, Result};
pub use range::PageRange;
pub use selection::SelectionList;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
