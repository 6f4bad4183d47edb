//! # Cover Loader
//!
//! Loads and validates cover image files before any record is touched.
//!
//! Validation runs in a fixed order, and the first failure aborts the whole
//! operation:
//!
//! 1. The selection must be non-empty (an empty path means nothing was picked)
//! 2. The path must exist
//! 3. The file extension must be an accepted cover format (case-insensitive)
//! 4. The file must be readable
//! 5. The file must contain at least one byte
//!
//! Each step maps to its own [`CoverError`] variant so callers can report
//! precisely what went wrong.

use std::path::Path;
use std::sync::Arc;

use host_traits::records::CoverArt;
use host_traits::FileAccess;
use tracing::{debug, warn};

use crate::error::{CoverError, Result};

/// Loads cover images through the host's [`FileAccess`] bridge.
pub struct CoverLoader {
    files: Arc<dyn FileAccess>,
    allowed_extensions: Vec<String>,
}

impl CoverLoader {
    /// Creates a loader accepting the given extensions (lowercase, no dot).
    pub fn new(files: Arc<dyn FileAccess>, allowed_extensions: Vec<String>) -> Self {
        Self {
            files,
            allowed_extensions,
        }
    }

    /// Extensions this loader accepts.
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Loads and validates the cover image at `path`.
    ///
    /// Runs the validation sequence described in the module docs and returns
    /// the image as a [`CoverArt`] with its MIME type derived from the file
    /// extension. No record is read or written here; a failure leaves the
    /// store completely untouched.
    pub async fn load(&self, path: &Path) -> Result<CoverArt> {
        if path.as_os_str().is_empty() {
            return Err(CoverError::NoCoverSelected);
        }

        match self.files.exists(path).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(CoverError::PathNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(error) => {
                // An unanswerable existence check aborts the same way a
                // missing file does; the cause goes to the log.
                warn!(path = ?path, error = %error, "Cover existence check failed");
                return Err(CoverError::PathNotFound {
                    path: path.to_path_buf(),
                });
            }
        }

        let extension = Self::extension_of(path)
            .filter(|ext| self.allowed_extensions.iter().any(|allowed| allowed == ext))
            .ok_or_else(|| CoverError::UnsupportedExtension {
                path: path.to_path_buf(),
                expected: self.allowed_extensions.join(", "),
            })?;

        let data = self
            .files
            .read_file(path)
            .await
            .map_err(|source| CoverError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        if data.is_empty() {
            return Err(CoverError::EmptyCover {
                path: path.to_path_buf(),
            });
        }

        let cover = CoverArt::new(data, Self::mime_for(&extension));
        debug!(
            path = ?path,
            size = cover.len(),
            mime = %cover.mime_type,
            "Loaded cover image"
        );
        Ok(cover)
    }

    /// Lowercased file extension, if the path has one.
    fn extension_of(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// MIME type for a known cover extension.
    fn mime_for(extension: &str) -> &'static str {
        match extension {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            _ => "application/octet-stream",
        }
    }
}

impl std::fmt::Debug for CoverLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverLoader")
            .field("allowed_extensions", &self.allowed_extensions)
            .finish()
    }
}
