//! File Access Bridge Abstraction
//!
//! Native file dialog and file I/O capabilities provided by the host's
//! platform layer.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A named extension filter offered by the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human-readable filter label (e.g. "Images").
    pub name: String,
    /// Extensions without the leading dot (e.g. "jpg").
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            extensions,
        }
    }
}

/// Options for a native open-file dialog.
#[derive(Debug, Clone, Default)]
pub struct PickRequest {
    /// Dialog title; hosts fall back to their platform default when `None`.
    pub title: Option<String>,
    /// Extension filters offered to the user.
    pub filters: Vec<FileFilter>,
}

impl PickRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// A request filtered to the given image extensions.
    pub fn images(extensions: &[String]) -> Self {
        Self::new().with_filter(FileFilter::new("Images", extensions.to_vec()))
    }
}

/// File access trait
///
/// Abstracts the dialog and file I/O surface the host exposes to extensions:
/// - Desktop: native open-file dialog plus direct filesystem access
/// - Sandboxed hosts: document picker plus brokered reads
///
/// # Example
///
/// ```ignore
/// use host_traits::files::{FileAccess, PickRequest};
///
/// async fn pick_and_read(files: &dyn FileAccess) -> host_traits::error::Result<()> {
///     if let Some(path) = files.pick_file(PickRequest::new()).await? {
///         let bytes = files.read_file(&path).await?;
///         println!("{} bytes", bytes.len());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait FileAccess: Send + Sync {
    /// Open a native file picker.
    ///
    /// Returns `Ok(None)` when the user cancels the dialog; cancellation is
    /// not an error.
    async fn pick_file(&self, request: PickRequest) -> Result<Option<PathBuf>>;

    /// Check whether a path exists.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read an entire file into memory.
    async fn read_file(&self, path: &Path) -> Result<Bytes>;
}
