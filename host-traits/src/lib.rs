//! # Host Capability Traits
//!
//! Contracts between the cover-assignment core and the host music player.
//!
//! ## Overview
//!
//! The core never owns persistence, file dialogs, or notification rendering.
//! Each of those is a capability the host already has, expressed here as a
//! trait the host (or a reference adapter from `host-desktop`) implements and
//! injects. The core holds them as `Arc<dyn Trait>` handles.
//!
//! ## Traits
//!
//! ### Records & Storage
//! - [`MediaStore`](store::MediaStore) - The host's live playlist/song
//!   collection: snapshot queries, single-record cover updates, and a
//!   [`StoreChange`](store::StoreChange) broadcast for re-query-on-change
//!   consumers
//!
//! ### Files
//! - [`FileAccess`](files::FileAccess) - Native file picker, existence checks,
//!   and whole-file reads
//!
//! ### Presentation
//! - [`Notifier`](notify::Notifier) - User-facing notices (toast-level
//!   severity is carried by [`NoticeKind`](notify::NoticeKind); rendering is
//!   the host's concern)
//! - [`LoggerSink`](log::LoggerSink) - Mirror structured log events into the
//!   host's console or logging pipeline
//!
//! ## Fail-Fast Strategy
//!
//! The core fails fast with a descriptive error when a required capability is
//! missing:
//!
//! ```ignore
//! use core_covers::{CoverConfig, CoverError};
//!
//! let config = CoverConfig::builder()
//!     .media_store(store)
//!     // .file_access(..) forgotten
//!     .notifier(notifier)
//!     .build();
//! assert!(matches!(config, Err(CoverError::CapabilityMissing { .. })));
//! ```
//!
//! ## Error Handling
//!
//! Every trait method returns [`HostError`](error::HostError) through this
//! crate's [`Result`](error::Result) alias. Implementations should:
//!
//! - Convert host-specific failures to `HostError`
//! - Provide actionable error messages
//! - Include context (file paths, record identifiers)
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so handles can be shared across async
//! tasks.

pub mod error;
pub mod files;
pub mod log;
pub mod notify;
pub mod records;
pub mod store;

pub use error::HostError;

// Re-export commonly used types
pub use files::{FileAccess, FileFilter, PickRequest};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use notify::{Notice, NoticeKind, Notifier};
pub use records::{CoverArt, Playlist, PlaylistId, Song, SongId};
pub use store::{MediaStore, StoreChange};
