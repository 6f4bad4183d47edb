//! Notifier Implementation backed by tracing
//!
//! Headless stand-in for the host's toast layer: every notice becomes a
//! tracing event at the matching level, so notices stay visible in logs when
//! no UI is attached.

use async_trait::async_trait;
use host_traits::{
    error::Result,
    notify::{Notice, NoticeKind, Notifier},
};
use tracing::{error, info, warn};

/// Notifier that logs notices instead of rendering them.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notice: Notice) -> Result<()> {
        match notice.kind {
            NoticeKind::Info => info!(kind = "info", "{}", notice.message),
            NoticeKind::Success => info!(kind = "success", "{}", notice.message),
            NoticeKind::Warning => warn!(kind = "warning", "{}", notice.message),
            NoticeKind::Error => error!(kind = "error", "{}", notice.message),
        }
        Ok(())
    }
}
