//! Single-slot cache for the certificate upload
//!
//! The form accepts exactly one signed-certificate file per submission. The
//! cache holds at most one vetted file at a time: a new selection replaces
//! the previous one, and a rejected selection leaves the cache empty rather
//! than falling back to stale contents.

use anyhow::Error;
use thiserror::Error as ThisError;
use tracing::{debug, warn};

/// A file as announced by the host's picker, fully materialized. The
/// announced `size_bytes` is what the ceiling check runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: content.len() as u64,
            content,
        }
    }
}

/// A vetted file waiting for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl PendingFile {
    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Debug, ThisError)]
pub enum FileError {
    #[error("file is {size_bytes} bytes, over the {limit_bytes} byte upload limit")]
    TooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("failed to read the selected file")]
    Unreadable(#[source] Error),
}

/// Holds the pending upload, bounded by the configured byte ceiling.
#[derive(Debug)]
pub struct FileCache {
    limit_bytes: u64,
    slot: Option<PendingFile>,
}

impl FileCache {
    pub fn new(limit_bytes: u64) -> Self {
        Self {
            limit_bytes,
            slot: None,
        }
    }

    /// Vet a selection against the ceiling and cache it. An oversized file
    /// is rejected and any previously cached file is dropped with it, so the
    /// cache never answers a rejection with stale contents.
    pub fn accept(&mut self, file: SelectedFile) -> Result<&PendingFile, FileError> {
        if file.size_bytes > self.limit_bytes {
            warn!(
                name = %file.name,
                size_bytes = file.size_bytes,
                limit_bytes = self.limit_bytes,
                "rejecting oversized upload"
            );
            self.slot = None;
            return Err(FileError::TooLarge {
                size_bytes: file.size_bytes,
                limit_bytes: self.limit_bytes,
            });
        }

        let stored = self.slot.insert(PendingFile {
            name: file.name,
            content: file.content,
        });
        debug!(name = %stored.name, size_bytes = stored.size_bytes(), "cached upload");
        Ok(stored)
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn current(&self) -> Option<&PendingFile> {
        self.slot.as_ref()
    }

    pub fn limit_bytes(&self) -> u64 {
        self.limit_bytes
    }
}
