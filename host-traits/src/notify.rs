//! User-Facing Notification Abstraction
//!
//! The core classifies outcomes; the host renders them (toasts, banners,
//! status lines). This module defines the notice payload and the delivery
//! trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Notice severity, mirroring the host's toast levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }
}

/// Notification trait
///
/// The core calls this with the exact outcome classification; implementations
/// decide presentation. Delivery failures are the caller's to log, and must
/// never abort the operation that produced the notice.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Surface a notice to the user.
    async fn notify(&self, notice: Notice) -> Result<()>;
}
