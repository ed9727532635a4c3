//! Persisting finished documents.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::OverwriteMode;
use crate::error::{AssembleError, Result};

/// Receives finished output bytes and a file name, and persists them.
///
/// A dispatch failure never changes the outcome of the job that produced
/// the bytes; callers report it separately.
pub trait OutputDispatcher {
    /// Persist `bytes` under `filename`, returning where they ended up.
    fn dispatch(&self, bytes: &[u8], filename: &str) -> Result<PathBuf>;
}

/// Writes output files into a directory.
#[derive(Debug, Clone)]
pub struct FileDispatcher {
    dir: PathBuf,
    overwrite_mode: OverwriteMode,
}

impl FileDispatcher {
    /// Create a dispatcher writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>, overwrite_mode: OverwriteMode) -> Self {
        Self {
            dir: dir.into(),
            overwrite_mode,
        }
    }

    /// The target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        // Ensure the containing directory exists.
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;

        // Flush so write errors surface here rather than on drop.
        writer.flush()?;

        Ok(())
    }
}

impl OutputDispatcher for FileDispatcher {
    fn dispatch(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let path = self.dir.join(filename);

        if self.overwrite_mode == OverwriteMode::NoClobber && path.exists() {
            return Err(AssembleError::OutputExists { path });
        }

        Self::write(&path, bytes).map_err(|source| AssembleError::PersistFailed {
            filename: filename.to_string(),
            source,
        })?;

        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
