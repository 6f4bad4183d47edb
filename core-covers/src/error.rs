//! Error types for the cover core.
//!
//! Every failure the pipeline can produce is a distinct variant so callers
//! (and tests) can tell a rejected file apart from a missing target or a
//! host-side fault. [`CoverError::notice_kind`] maps each variant onto the
//! severity used when the failure is surfaced through the host's
//! notification channel.

use std::path::PathBuf;

use host_traits::notify::NoticeKind;
use host_traits::HostError;
use thiserror::Error;

/// Errors produced by cover loading, target resolution and batch updates.
#[derive(Error, Debug)]
pub enum CoverError {
    /// The selection is empty: the picker was cancelled or an empty path
    /// was handed in.
    #[error("No cover file selected")]
    NoCoverSelected,

    /// The selected path does not exist (or could not be checked).
    #[error("Cover path does not exist: {}", .path.display())]
    PathNotFound { path: PathBuf },

    /// The file extension is not an accepted cover format.
    #[error("Unsupported cover format (expected {}): {}", .expected, .path.display())]
    UnsupportedExtension { path: PathBuf, expected: String },

    /// The file exists but reading it failed.
    #[error("Failed to read cover file {}: {}", .path.display(), .source)]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: HostError,
    },

    /// The file read back zero bytes.
    #[error("Cover file is empty: {}", .path.display())]
    EmptyCover { path: PathBuf },

    /// No song in the store carries this album name.
    #[error("Album {name:?} does not exist or has no songs")]
    AlbumNotFound { name: String },

    /// No playlist with this id exists in the store.
    #[error("Playlist {id} was not found")]
    PlaylistNotFound { id: host_traits::records::PlaylistId },

    /// The string form of a target selector could not be parsed.
    #[error("Invalid target selector: {raw:?}")]
    InvalidSelector { raw: String },

    /// A required host capability was not wired into the configuration.
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// The configuration itself is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A host interface failed outside the classified cases above.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

impl CoverError {
    /// Severity used when this error is pushed through a [`Notifier`].
    ///
    /// Input and resolution problems are warnings: the user picked a bad
    /// file or a vanished target and can simply try again. Host and
    /// configuration faults are errors.
    ///
    /// [`Notifier`]: host_traits::notify::Notifier
    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            CoverError::NoCoverSelected
            | CoverError::PathNotFound { .. }
            | CoverError::UnsupportedExtension { .. }
            | CoverError::ReadFailed { .. }
            | CoverError::EmptyCover { .. }
            | CoverError::AlbumNotFound { .. }
            | CoverError::PlaylistNotFound { .. }
            | CoverError::InvalidSelector { .. } => NoticeKind::Warning,
            CoverError::CapabilityMissing { .. }
            | CoverError::Config(_)
            | CoverError::Host(_) => NoticeKind::Error,
        }
    }
}

/// Result type alias for cover core operations.
pub type Result<T> = std::result::Result<T, CoverError>;
