//! Input resolution and loading.
//!
//! Turns what the user typed (file paths, glob patterns, directories) into an
//! ordered list of files, and reads them into [`SourceDocument`]s.
//!
//! # Examples
//!
//! ```no_run
//! use pdfassemble::io::reader::{collect_input_paths, read_sources};
//!
//! # async fn example() -> pdfassemble::Result<()> {
//! let paths = collect_input_paths(["chapters/", "appendix-*.pdf"])?;
//! let documents = read_sources(&paths).await?;
//! println!("Loaded {} documents", documents.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::SourceDocument;
use crate::error::{AssembleError, Result};

/// Whether a file name has a `.pdf` extension (case-insensitive).
pub fn is_pdf_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Expand inputs into an ordered list of file paths.
///
/// - A directory expands to every `.pdf` file below it, sorted by path.
/// - A pattern containing `*`, `?` or `[` is expanded with `glob`; matches
///   come back in alphabetical order and directories are skipped.
/// - Anything else must be an existing file.
///
/// The relative order of the inputs themselves is preserved.
///
/// # Errors
///
/// Returns an error if a literal path does not exist or is not a file, or if
/// a glob pattern is malformed.
pub fn collect_input_paths<T>(inputs: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<Path>,
{
    let mut resolved_paths = Vec::new();

    for input in inputs {
        let input = input.as_ref();

        if input.is_dir() {
            resolved_paths.extend(collect_directory(input)?);
        } else if is_glob_pattern(input) {
            resolved_paths.extend(collect_pattern(input)?);
        } else {
            check_path_exists(input)?;
            resolved_paths.push(input.to_path_buf());
        }
    }

    Ok(resolved_paths)
}

/// Check that a path exists and is a regular file.
pub fn check_path_exists(path: &Path) -> Result<()> {
    if !path.try_exists()? {
        return Err(AssembleError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(AssembleError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Read one file into a source document named after the file.
pub async fn read_source(path: &Path) -> Result<SourceDocument> {
    let content = tokio::fs::read(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AssembleError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AssembleError::from(err)
        }
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    log::debug!("Read {} ({} bytes)", path.display(), content.len());
    Ok(SourceDocument::new(name, content))
}

/// Read several files, keeping their order.
pub async fn read_sources(paths: &[PathBuf]) -> Result<Vec<SourceDocument>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        documents.push(read_source(path).await?);
    }
    Ok(documents)
}

fn is_glob_pattern(path: &Path) -> bool {
    path.to_string_lossy()
        .chars()
        .any(|c| matches!(c, '*' | '?' | '['))
}

fn collect_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            AssembleError::from(std::io::Error::other(format!(
                "Failed to walk {}: {err}",
                dir.display()
            )))
        })?;

        if entry.file_type().is_file() && is_pdf_name(&entry.file_name().to_string_lossy()) {
            paths.push(entry.into_path());
        }
    }

    if paths.is_empty() {
        log::warn!("No PDF files found in {}", dir.display());
    }

    Ok(paths)
}

fn collect_pattern(pattern: &Path) -> Result<Vec<PathBuf>> {
    let pattern = pattern.to_string_lossy();
    let mut paths = Vec::new();

    let entries = glob::glob(&pattern).map_err(|err| {
        AssembleError::invalid_config(format!("Invalid glob pattern '{pattern}': {err}"))
    })?;

    for entry in entries {
        let path = entry.map_err(|err| AssembleError::from(std::io::Error::from(err)))?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        log::warn!("Pattern '{pattern}' matched no files");
    }

    Ok(paths)
}
