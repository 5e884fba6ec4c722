//! File selection abstraction
//!
//! Materializes the user's file selection into bytes. A source imposes no
//! size limit of its own; the ceiling belongs to `FileCache`.

use crate::upload::SelectedFile;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Trait for reading the selected file out of the host environment
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Read the selection into memory (display name, announced size, bytes)
    async fn fetch(&self) -> Result<SelectedFile>;
}

/// File source backed by a local path.
pub struct FsFileSource {
    path: PathBuf,
}

impl FsFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileSource for FsFileSource {
    async fn fetch(&self) -> Result<SelectedFile> {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("{} has no file name", self.path.display()))?;

        let content = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        Ok(SelectedFile::new(name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_reads_name_size_and_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("certificate.pdf");
        tokio::fs::write(&path, b"pdf bytes").await.unwrap();

        let file = FsFileSource::new(&path).fetch().await.unwrap();
        assert_eq!(file.name, "certificate.pdf");
        assert_eq!(file.size_bytes, 9);
        assert_eq!(file.content, b"pdf bytes");
    }

    #[tokio::test]
    async fn fetch_fails_for_a_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = FsFileSource::new(dir.path().join("absent.pdf"));
        assert!(source.fetch().await.is_err());
    }
}
