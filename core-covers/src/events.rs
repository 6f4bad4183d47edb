//! # Event Bus System
//!
//! Event-driven notifications for the cover core using `tokio::sync::broadcast`.
//! Host shells subscribe to follow batch progress without polling the store.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐     emit      ┌───────────┐
//! │ CoverService  ├──────────────>│ EventBus  │     subscribe    ┌────────────┐
//! │ (batch,       │               │ (broadcast├─────────────────>│ Subscriber │
//! │  playlists)   │               │  channel) │                  └────────────┘
//! └───────────────┘               │           │     subscribe    ┌────────────┐
//!                                 │           ├─────────────────>│ Subscriber │
//!                                 └───────────┘                  └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_covers::events::{CoverEvent, EventBus};
//! use host_traits::records::PlaylistId;
//!
//! let event_bus = EventBus::new(64);
//! let mut subscriber = event_bus.subscribe();
//!
//! let event = CoverEvent::PlaylistCoverSet {
//!     playlist_id: PlaylistId::new(1),
//! };
//! event_bus.emit(event).ok();
//! ```
//!
//! ## Error Handling
//!
//! The bus uses `tokio::sync::broadcast`, which can produce two receive errors:
//!
//! - **`RecvError::Lagged(n)`**: the subscriber was too slow and missed `n`
//!   events. Non-fatal; new events keep arriving.
//! - **`RecvError::Closed`**: every sender was dropped. Treat as shutdown.

use host_traits::records::{PlaylistId, SongId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Cover batches emit two events each, so a modest buffer absorbs bursts
/// comfortably. Subscribers that fall behind receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

// ============================================================================
// Event Types
// ============================================================================

/// Events published by the cover core.
///
/// Every mutating operation announces itself here: batches bracket their run
/// with `BatchStarted`/`BatchFinished`, and single-record playlist cover
/// writes emit their own completion events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoverEvent {
    /// A batch passed loading and resolution and is about to write.
    BatchStarted {
        /// String form of the resolved target selector.
        target: String,
        /// Number of songs the batch will visit.
        total: usize,
    },
    /// A batch ran to completion (successfully or not).
    BatchFinished {
        /// String form of the resolved target selector.
        target: String,
        /// Number of songs visited.
        total: usize,
        /// Number of successful cover updates.
        succeeded: usize,
        /// Number of rejected cover updates.
        failed: usize,
        /// Ids that failed, in processing order.
        failed_ids: Vec<SongId>,
    },
    /// A playlist cover was set.
    PlaylistCoverSet {
        /// The playlist that received the cover.
        playlist_id: PlaylistId,
    },
    /// A playlist cover was cleared.
    PlaylistCoverCleared {
        /// The playlist whose cover was removed.
        playlist_id: PlaylistId,
    },
}

impl CoverEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoverEvent::BatchStarted { .. } => "Cover batch started",
            CoverEvent::BatchFinished { .. } => "Cover batch finished",
            CoverEvent::PlaylistCoverSet { .. } => "Playlist cover set",
            CoverEvent::PlaylistCoverCleared { .. } => "Playlist cover cleared",
        }
    }

    /// Returns the severity level of the event.
    ///
    /// `BatchFinished` severity follows the batch outcome: a clean run is
    /// informational, a mixed one a warning, a run with zero successes an
    /// error.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoverEvent::BatchFinished {
                succeeded, failed, ..
            } if *failed > 0 && *succeeded == 0 => EventSeverity::Error,
            CoverEvent::BatchFinished { failed, .. } if *failed > 0 => EventSeverity::Warning,
            CoverEvent::BatchStarted { .. } => EventSeverity::Debug,
            _ => EventSeverity::Info,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to cover events.
///
/// Uses `tokio::sync::broadcast` internally, which provides:
/// - Multiple producers (clone the `EventBus`)
/// - Multiple consumers (each `subscribe()` creates a new receiver)
/// - Non-blocking sends (events are cloned for each subscriber)
/// - Lagging detection (slow subscribers get `RecvError::Lagged`)
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoverEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer per subscriber.
    ///   When a subscriber falls behind by more than this amount, it will
    ///   receive a `RecvError::Lagged` error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error when nobody is listening. Callers that don't care about
    /// subscriber presence can `.ok()` the result.
    pub fn emit(&self, event: CoverEvent) -> Result<usize, SendError<CoverEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Each call creates an independent receiver that will receive all
    /// future events. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoverEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(succeeded: usize, failed: usize) -> CoverEvent {
        CoverEvent::BatchFinished {
            target: "Moonlight".to_string(),
            total: succeeded + failed,
            succeeded,
            failed,
            failed_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_event_bus_creation() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_bus_subscription() {
        let bus = EventBus::new(10);
        let _sub1 = bus.subscribe();
        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        let event = CoverEvent::PlaylistCoverCleared {
            playlist_id: PlaylistId::new(1),
        };

        // Should error when no subscribers
        assert!(bus.emit(event).is_err());
    }

    #[tokio::test]
    async fn test_event_emission_with_subscribers() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        let event = CoverEvent::BatchStarted {
            target: "#7".to_string(),
            total: 12,
        };

        let result = bus.emit(event.clone());
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 1);

        let received = sub.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = finished(3, 0);
        bus.emit(event.clone()).ok();

        let received1 = sub1.recv().await.unwrap();
        let received2 = sub2.recv().await.unwrap();

        assert_eq!(received1, event);
        assert_eq!(received2, event);
    }

    #[tokio::test]
    async fn test_lagged_subscriber() {
        let bus = EventBus::new(2); // Very small buffer
        let mut sub = bus.subscribe();

        for i in 0..5 {
            let event = CoverEvent::BatchStarted {
                target: format!("#{}", i),
                total: 1,
            };
            bus.emit(event).ok();
        }

        // First recv should indicate lagging
        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[test]
    fn test_batch_finished_severity_follows_outcome() {
        assert_eq!(finished(3, 0).severity(), EventSeverity::Info);
        assert_eq!(finished(2, 1).severity(), EventSeverity::Warning);
        assert_eq!(finished(0, 3).severity(), EventSeverity::Error);
        // An empty batch has no failures to warn about
        assert_eq!(finished(0, 0).severity(), EventSeverity::Info);
    }

    #[test]
    fn test_batch_started_severity() {
        let event = CoverEvent::BatchStarted {
            target: "Moonlight".to_string(),
            total: 3,
        };
        assert_eq!(event.severity(), EventSeverity::Debug);
    }

    #[test]
    fn test_event_description() {
        let event = CoverEvent::PlaylistCoverSet {
            playlist_id: PlaylistId::new(9),
        };
        assert_eq!(event.description(), "Playlist cover set");
    }

    #[tokio::test]
    async fn test_concurrent_publishers() {
        let bus = EventBus::new(100);
        let mut sub = bus.subscribe();

        let bus1 = bus.clone();
        let bus2 = bus.clone();

        let handle1 = tokio::spawn(async move {
            for i in 0..10 {
                let event = CoverEvent::PlaylistCoverSet {
                    playlist_id: PlaylistId::new(i),
                };
                bus1.emit(event).ok();
            }
        });

        let handle2 = tokio::spawn(async move {
            for i in 0..10 {
                let event = CoverEvent::PlaylistCoverCleared {
                    playlist_id: PlaylistId::new(i),
                };
                bus2.emit(event).ok();
            }
        });

        handle1.await.ok();
        handle2.await.ok();

        let mut count = 0;
        while sub.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 20);
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = CoverEvent::BatchFinished {
            target: "Moonlight".to_string(),
            total: 3,
            succeeded: 2,
            failed: 1,
            failed_ids: vec![SongId::new("s2")],
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("BatchFinished"));
        assert!(json.contains("s2"));

        let deserialized: CoverEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_event_cloning() {
        let event = CoverEvent::PlaylistCoverCleared {
            playlist_id: PlaylistId::new(4),
        };
        let cloned = event.clone();
        assert_eq!(event, cloned);
    }
}
