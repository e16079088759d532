//! File channels for export and import
//!
//! [`DirectorySink`] writes backups into a directory, [`FileSource`] reads a
//! backup from disk and [`TextSource`] wraps text that has already been
//! received (an upload, a test fixture).

use crate::core::error::StorageError;
use crate::core::{ExportSink, ImportSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes export files into a directory, creating it when missing
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn write_file(&self, file_name: &str, contents: &str) -> Result<(), StorageError> {
        let path = self.dir.join(file_name);
        let io_error = |e: std::io::Error| StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        std::fs::write(&path, contents).map_err(io_error)?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "export file written");
        Ok(())
    }
}

/// Import file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImportSource for FileSource {
    async fn read_text(&self) -> Result<String, StorageError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
    }
}

/// Import payload that is already in memory
#[derive(Debug, Clone)]
pub struct TextSource(pub String);

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait]
impl ImportSource for TextSource {
    async fn read_text(&self) -> Result<String, StorageError> {
        Ok(self.0.clone())
    }
}
