//! # Cover Core Configuration
//!
//! Configuration management for the cover extension core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`CoverConfig`] instance holding the host capabilities and settings the
//! core needs. It enforces fail-fast validation: every required capability
//! must be provided before initialization, and a missing one produces an
//! actionable error instead of a latent panic at first use.
//!
//! ## Required Capabilities
//!
//! - `MediaStore` - Record store for songs and playlists
//! - `FileAccess` - File picking and reading
//! - `Notifier` - User-facing notifications
//!
//! ## Usage
//!
//! ```ignore
//! use core_covers::config::CoverConfig;
//! use std::sync::Arc;
//!
//! let config = CoverConfig::builder()
//!     .media_store(Arc::new(MyStore))
//!     .file_access(Arc::new(MyFiles))
//!     .notifier(Arc::new(MyNotifier))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{CoverError, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use host_traits::{FileAccess, MediaStore, Notifier};
use std::sync::Arc;

/// Cover file extensions accepted when none are configured.
pub const DEFAULT_COVER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Configuration for the cover extension core.
///
/// Holds the host capabilities and settings required to construct a
/// [`CoverService`](crate::service::CoverService). Use [`CoverConfigBuilder`]
/// to construct instances.
#[derive(Clone)]
pub struct CoverConfig {
    /// Record store for songs and playlists (required)
    pub media_store: Arc<dyn MediaStore>,

    /// File picking and reading (required)
    pub file_access: Arc<dyn FileAccess>,

    /// User-facing notifications (required)
    pub notifier: Arc<dyn Notifier>,

    /// Accepted cover file extensions, lowercase and without the dot
    pub allowed_extensions: Vec<String>,

    /// Buffer size of the event broadcast channel
    pub event_capacity: usize,
}

impl std::fmt::Debug for CoverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverConfig")
            .field("media_store", &"MediaStore { ... }")
            .field("file_access", &"FileAccess { ... }")
            .field("notifier", &"Notifier { ... }")
            .field("allowed_extensions", &self.allowed_extensions)
            .field("event_capacity", &self.event_capacity)
            .finish()
    }
}

impl CoverConfig {
    /// Creates a new builder for constructing a `CoverConfig`.
    pub fn builder() -> CoverConfigBuilder {
        CoverConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - At least one cover extension is allowed
    /// - Extensions are normalized (lowercase, no leading dot)
    /// - The event buffer capacity is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.allowed_extensions.is_empty() {
            return Err(CoverError::Config(
                "At least one cover extension must be allowed".to_string(),
            ));
        }

        for ext in &self.allowed_extensions {
            if ext.is_empty() {
                return Err(CoverError::Config(
                    "Cover extensions must not be empty".to_string(),
                ));
            }
            if ext.contains('.') || ext.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(CoverError::Config(format!(
                    "Cover extension {ext:?} must be lowercase without a dot"
                )));
            }
        }

        if self.event_capacity == 0 {
            return Err(CoverError::Config(
                "Event buffer capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`CoverConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then call
/// [`build()`](CoverConfigBuilder::build) to create the final config. The
/// builder validates required capabilities and provides helpful error
/// messages.
#[derive(Default)]
pub struct CoverConfigBuilder {
    media_store: Option<Arc<dyn MediaStore>>,
    file_access: Option<Arc<dyn FileAccess>>,
    notifier: Option<Arc<dyn Notifier>>,
    allowed_extensions: Option<Vec<String>>,
    event_capacity: Option<usize>,
}

impl CoverConfigBuilder {
    /// Sets the record store implementation (required).
    ///
    /// # Arguments
    ///
    /// * `store` - Record store backing songs and playlists
    pub fn media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    /// Sets the file access implementation (required).
    ///
    /// # Arguments
    ///
    /// * `files` - File picking and reading bridge
    pub fn file_access(mut self, files: Arc<dyn FileAccess>) -> Self {
        self.file_access = Some(files);
        self
    }

    /// Sets the notifier implementation (required).
    ///
    /// # Arguments
    ///
    /// * `notifier` - User-facing notification channel
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Sets the accepted cover file extensions.
    ///
    /// Extensions are normalized during build: a leading dot is stripped and
    /// the remainder lowercased, so `".JPG"` and `"jpg"` configure the same
    /// format.
    ///
    /// Default: `jpg`, `jpeg`, `png`
    pub fn allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the buffer size of the event broadcast channel.
    ///
    /// Default: [`DEFAULT_EVENT_BUFFER_SIZE`]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    /// Builds the final `CoverConfig` instance.
    ///
    /// Returns `Ok(CoverConfig)` on success, or an error if a required
    /// capability is missing or a configuration value is invalid.
    pub fn build(self) -> Result<CoverConfig> {
        let media_store = self.media_store.ok_or_else(|| CoverError::CapabilityMissing {
            capability: "MediaStore".to_string(),
            message: "A record store implementation is required for cover updates. \
                     Desktop: inject host_desktop::MemoryMediaStore or the host's own store adapter. \
                     Other platforms: wrap the host's song/playlist store."
                .to_string(),
        })?;

        let file_access = self.file_access.ok_or_else(|| CoverError::CapabilityMissing {
            capability: "FileAccess".to_string(),
            message: "A file access implementation is required for picking and reading cover files. \
                     Desktop: inject host_desktop::NativeFileAccess. \
                     Other platforms: wrap the host's file dialog and file reader."
                .to_string(),
        })?;

        let notifier = self.notifier.ok_or_else(|| CoverError::CapabilityMissing {
            capability: "Notifier".to_string(),
            message: "A notifier implementation is required for user-facing messages. \
                     Desktop: inject host_desktop::TracingNotifier or the host's toast channel."
                .to_string(),
        })?;

        let allowed_extensions = self
            .allowed_extensions
            .unwrap_or_else(|| {
                DEFAULT_COVER_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect()
            })
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        let config = CoverConfig {
            media_store,
            file_access,
            notifier,
            allowed_extensions,
            event_capacity: self.event_capacity.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}
