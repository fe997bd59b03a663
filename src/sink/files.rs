//! Filesystem sink
//!
//! Writes each downloaded blob to `<dir>/<id>.<extension>`.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Blob writer naming files by their source identifier
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    extension: String,
    files_written: usize,
}

impl FileSink {
    /// Create the sink, creating the target directory if needed
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            extension: extension.into(),
            files_written: 0,
        })
    }

    /// Write one blob, returning the path it landed at
    pub fn write_blob(&mut self, id: impl std::fmt::Display, content: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(format!("{id}.{}", self.extension));
        std::fs::write(&path, content)?;
        self.files_written += 1;
        debug!(bytes = content.len(), "wrote {}", path.display());
        Ok(path)
    }

    /// Number of files written
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
