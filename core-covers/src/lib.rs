//! # Cover Core
//!
//! Batch cover assignment for music player hosts. The core lets a user pick
//! one image and apply it to every song of an album or playlist, or to a
//! playlist record itself, through the narrow capability traits defined in
//! `host-traits`.
//!
//! ## Pipeline
//!
//! ```text
//! pick_cover ──> CoverLoader ──> resolve_target ──> assign_cover ──> BatchReport
//!   (dialog)      (validate)       (ids to visit)     (sequential       (outcome,
//!                                                      writes)           notices,
//!                                                                        events)
//! ```
//!
//! Validation failures abort before any record is touched; per-record write
//! failures are absorbed into the report and the batch continues. Every
//! terminal error path surfaces exactly one user-facing notice, while a
//! finished batch reports its outcome notice followed by a completion
//! notice. Batch lifecycle is mirrored on the event bus.
//!
//! ## Usage
//!
//! ```ignore
//! use core_covers::{CoverConfig, CoverService, TargetSelector};
//! use std::sync::Arc;
//!
//! let config = CoverConfig::builder()
//!     .media_store(store)
//!     .file_access(files)
//!     .notifier(notifier)
//!     .build()?;
//! let service = CoverService::new(config);
//!
//! if let Some(path) = service.pick_cover().await? {
//!     let report = service
//!         .replace_covers(&TargetSelector::album("Moonlight"), &path)
//!         .await?;
//!     println!("{} of {} covers replaced", report.succeeded, report.total);
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod logging;
pub mod selector;
pub mod service;

pub use batch::{assign_cover, BatchOutcome, BatchReport};
pub use config::{CoverConfig, CoverConfigBuilder, DEFAULT_COVER_EXTENSIONS};
pub use error::{CoverError, Result};
pub use events::{CoverEvent, EventBus, EventSeverity, DEFAULT_EVENT_BUFFER_SIZE};
pub use loader::CoverLoader;
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use selector::{AlbumIndex, TargetSelector};
pub use service::{AlbumTarget, CoverService, PlaylistTarget, TargetInventory};
