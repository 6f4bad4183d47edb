//! In-Memory Record Store
//!
//! A reference `MediaStore` holding records in process memory. Hosts embed it
//! for demos; tests use it as a realistic store with observable change
//! signals and a natural failure mode (updates against unknown ids are
//! rejected).

use async_trait::async_trait;
use chrono::Utc;
use host_traits::{
    error::{HostError, Result},
    records::{CoverArt, Playlist, PlaylistId, Song, SongId},
    store::{MediaStore, StoreChange},
};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// Change-signal buffer; lagged watchers miss old signals, never block writes.
const CHANGE_BUFFER_SIZE: usize = 64;

#[derive(Default)]
struct Catalog {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
}

/// In-memory `MediaStore` implementation.
///
/// Records keep insertion order, which is therefore the snapshot order
/// returned by the list operations.
pub struct MemoryMediaStore {
    catalog: RwLock<Catalog>,
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER_SIZE);
        Self {
            catalog: RwLock::new(Catalog::default()),
            changes,
        }
    }

    /// Add a song record. Emits [`StoreChange::Songs`].
    pub async fn insert_song(&self, song: Song) {
        self.catalog.write().await.songs.push(song);
        self.emit(StoreChange::Songs);
    }

    /// Add a playlist record. Emits [`StoreChange::Playlists`].
    pub async fn insert_playlist(&self, playlist: Playlist) {
        self.catalog.write().await.playlists.push(playlist);
        self.emit(StoreChange::Playlists);
    }

    /// Fetch one song by id.
    pub async fn song(&self, id: &SongId) -> Option<Song> {
        self.catalog
            .read()
            .await
            .songs
            .iter()
            .find(|song| &song.id == id)
            .cloned()
    }

    /// Fetch one playlist by id.
    pub async fn playlist(&self, id: PlaylistId) -> Option<Playlist> {
        self.catalog
            .read()
            .await
            .playlists
            .iter()
            .find(|playlist| playlist.id == id)
            .cloned()
    }

    fn emit(&self, change: StoreChange) {
        // No subscribers is fine; the store does not require watchers.
        let _ = self.changes.send(change);
    }
}

impl Default for MemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn list_songs(&self) -> Result<Vec<Song>> {
        Ok(self.catalog.read().await.songs.clone())
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.catalog.read().await.playlists.clone())
    }

    async fn update_song_cover(&self, id: &SongId, cover: CoverArt) -> Result<()> {
        {
            let mut catalog = self.catalog.write().await;
            let song = catalog
                .songs
                .iter_mut()
                .find(|song| &song.id == id)
                .ok_or_else(|| HostError::StoreRejected(format!("unknown song id {}", id)))?;
            song.cover = Some(cover);
        }

        self.emit(StoreChange::Songs);
        debug!(song_id = %id, "Updated song cover");
        Ok(())
    }

    async fn update_playlist_cover(&self, id: PlaylistId, cover: Option<CoverArt>) -> Result<()> {
        {
            let mut catalog = self.catalog.write().await;
            let playlist = catalog
                .playlists
                .iter_mut()
                .find(|playlist| playlist.id == id)
                .ok_or_else(|| HostError::StoreRejected(format!("unknown playlist id {}", id)))?;
            playlist.cover = cover;
            playlist.updated_at = Utc::now().timestamp();
        }

        self.emit(StoreChange::Playlists);
        debug!(playlist_id = %id, "Updated playlist cover");
        Ok(())
    }

    fn watch(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn cover() -> CoverArt {
        CoverArt::new(Bytes::from_static(b"png"), "image/png")
    }

    #[tokio::test]
    async fn test_snapshots_keep_insertion_order() {
        let store = MemoryMediaStore::new();
        store.insert_song(Song::new("b", "B", "x", "A1")).await;
        store.insert_song(Song::new("a", "A", "x", "A1")).await;

        let songs = store.list_songs().await.unwrap();
        assert_eq!(songs[0].id, SongId::from("b"));
        assert_eq!(songs[1].id, SongId::from("a"));
    }

    #[tokio::test]
    async fn test_update_song_cover() {
        let store = MemoryMediaStore::new();
        store.insert_song(Song::new("s1", "One", "x", "A1")).await;

        store
            .update_song_cover(&SongId::from("s1"), cover())
            .await
            .unwrap();

        let song = store.song(&SongId::from("s1")).await.unwrap();
        assert_eq!(song.cover, Some(cover()));
    }

    #[tokio::test]
    async fn test_update_unknown_song_is_rejected() {
        let store = MemoryMediaStore::new();

        let err = store
            .update_song_cover(&SongId::from("ghost"), cover())
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::StoreRejected(_)));
    }

    #[tokio::test]
    async fn test_clear_playlist_cover() {
        let store = MemoryMediaStore::new();
        store
            .insert_playlist(Playlist::new(5, "Evening").with_cover(cover()))
            .await;

        store.update_playlist_cover(PlaylistId::new(5), None).await.unwrap();

        let playlist = store.playlist(PlaylistId::new(5)).await.unwrap();
        assert!(playlist.cover.is_none());
        assert!(playlist.updated_at >= playlist.created_at);
    }

    #[tokio::test]
    async fn test_mutations_emit_change_signals() {
        let store = MemoryMediaStore::new();
        let mut watcher = store.watch();

        // Inserts and cover updates each signal the collection they touch.
        store.insert_song(Song::new("s1", "One", "x", "A1")).await;
        store.insert_playlist(Playlist::new(1, "P")).await;
        store
            .update_song_cover(&SongId::from("s1"), cover())
            .await
            .unwrap();
        store
            .update_playlist_cover(PlaylistId::new(1), Some(cover()))
            .await
            .unwrap();

        assert_eq!(watcher.recv().await.unwrap(), StoreChange::Songs);
        assert_eq!(watcher.recv().await.unwrap(), StoreChange::Playlists);
        assert_eq!(watcher.recv().await.unwrap(), StoreChange::Songs);
        assert_eq!(watcher.recv().await.unwrap(), StoreChange::Playlists);
    }
}
