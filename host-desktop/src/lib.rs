//! # Desktop Host Adapters
//!
//! Default implementations of the host capability traits for desktop
//! platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate lets the cover core run without a full host application:
//! - `FileAccess` using `rfd` dialogs and `tokio::fs`
//! - `MediaStore` as an in-memory record collection with change broadcasting
//! - `Notifier` forwarding notices to `tracing`
//!
//! A real host replaces any of these with its own adapters; tests and demos
//! use them as-is.
//!
//! ## Usage
//!
//! ```ignore
//! use host_desktop::{MemoryMediaStore, NativeFileAccess, TracingNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(MemoryMediaStore::new());
//!     let files = Arc::new(NativeFileAccess::new());
//!     let notifier = Arc::new(TracingNotifier::new());
//!
//!     // Hand the handles to core_covers::CoverConfig
//! }
//! ```

mod files;
mod notify;
mod store;

pub use files::NativeFileAccess;
pub use notify::TracingNotifier;
pub use store::MemoryMediaStore;
