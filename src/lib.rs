//! Workspace umbrella crate.
//!
//! Re-exports the workspace members so host applications can depend on
//! `coverbatch-workspace` alone: `core-covers` (the cover-assignment core),
//! `host-traits` (the capability contracts a host must implement), and, with
//! the default `desktop` feature, `host-desktop` (reference adapters backed by
//! tokio, rfd, and tracing).

pub use core_covers;
pub use host_traits;

#[cfg(feature = "desktop")]
pub use host_desktop;
