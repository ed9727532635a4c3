//! Input and output boundaries.
//!
//! - [`reader`] resolves user inputs into files and loads them.
//! - [`writer`] persists finished documents through an [`OutputDispatcher`].

pub mod reader;
pub mod writer;

pub use reader::{collect_input_paths, is_pdf_name, read_source, read_sources};
pub use writer::{FileDispatcher, OutputDispatcher};
