//! Record Store Abstraction
//!
//! The host application owns a live collection of playlist and song records.
//! This module defines the narrow interface through which the core queries
//! snapshots, issues single-record cover updates, and observes changes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::records::{CoverArt, Playlist, PlaylistId, Song, SongId};

/// Coarse invalidation signal emitted by a store after a committed mutation.
///
/// The signal deliberately carries no record data: consumers re-query the
/// affected collection instead of patching cached snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreChange {
    /// One or more song records changed.
    Songs,
    /// One or more playlist records changed.
    Playlists,
}

/// Record store trait
///
/// Abstracts the host's record storage. Each update is an independent atomic
/// write from the caller's view; the store never batches or rolls back on
/// behalf of the core.
///
/// # Example
///
/// ```ignore
/// use host_traits::store::MediaStore;
///
/// async fn count_songs(store: &dyn MediaStore) -> host_traits::error::Result<usize> {
///     Ok(store.list_songs().await?.len())
/// }
/// ```
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Snapshot of all song records.
    async fn list_songs(&self) -> Result<Vec<Song>>;

    /// Snapshot of all playlist records, in host display order.
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Replace the cover of a single song.
    ///
    /// Fails with [`HostError::StoreRejected`](crate::error::HostError) when
    /// the id is unknown or the store refuses the write. A rejected write
    /// must leave every other record untouched.
    async fn update_song_cover(&self, id: &SongId, cover: CoverArt) -> Result<()>;

    /// Set (`Some`) or clear (`None`) the cover of a single playlist.
    async fn update_playlist_cover(&self, id: PlaylistId, cover: Option<CoverArt>) -> Result<()>;

    /// Subscribe to change signals.
    ///
    /// Implementations emit a matching [`StoreChange`] after every committed
    /// mutation. A lagged receiver misses old signals but never blocks the
    /// store.
    fn watch(&self) -> broadcast::Receiver<StoreChange>;
}
