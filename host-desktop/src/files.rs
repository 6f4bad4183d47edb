//! File Access Implementation using Tokio and rfd

use async_trait::async_trait;
use bytes::Bytes;
use host_traits::{
    error::{HostError, Result},
    files::{FileAccess, PickRequest},
};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Desktop file access backed by native dialogs and async file I/O.
///
/// Uses `rfd::AsyncFileDialog` for the picker (XDG portal on Linux, native
/// dialogs elsewhere) and `tokio::fs` for existence checks and reads.
#[derive(Debug, Clone, Default)]
pub struct NativeFileAccess;

impl NativeFileAccess {
    pub fn new() -> Self {
        Self
    }

    fn map_io_error(e: std::io::Error) -> HostError {
        HostError::Io(e)
    }
}

#[async_trait]
impl FileAccess for NativeFileAccess {
    async fn pick_file(&self, request: PickRequest) -> Result<Option<PathBuf>> {
        let mut dialog = rfd::AsyncFileDialog::new();
        if let Some(title) = &request.title {
            dialog = dialog.set_title(title.as_str());
        }
        for filter in &request.filters {
            dialog = dialog.add_filter(&filter.name, &filter.extensions);
        }

        let picked = dialog
            .pick_file()
            .await
            .map(|handle| handle.path().to_path_buf());

        match &picked {
            Some(path) => debug!(path = ?path, "File picked"),
            None => debug!("File pick cancelled"),
        }

        Ok(picked)
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(fs::try_exists(path).await.map_err(Self::map_io_error)?)
    }

    async fn read_file(&self, path: &Path) -> Result<Bytes> {
        let data = fs::read(path).await.map_err(Self::map_io_error)?;
        debug!(path = ?path, size = data.len(), "Read file");
        Ok(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exists_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, b"jpeg bytes").unwrap();

        let files = NativeFileAccess::new();
        assert!(files.exists(&path).await.unwrap());

        let data = files.read_file(&path).await.unwrap();
        assert_eq!(data, Bytes::from_static(b"jpeg bytes"));
    }

    #[tokio::test]
    async fn test_exists_false_for_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        let files = NativeFileAccess::new();
        assert!(!files.exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpeg");

        let files = NativeFileAccess::new();
        let err = files.read_file(&path).await.unwrap_err();
        assert!(matches!(err, HostError::Io(_)));
    }
}
