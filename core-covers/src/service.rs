//! # Cover Service
//!
//! The facade host shells talk to. Wires the loader, target resolution and
//! the batch engine together behind one struct, owns the event bus, and
//! enforces the notification policy: every terminal error path surfaces
//! exactly one user-facing notice, and a finished batch reports its outcome
//! notice followed by the completion notice.
//!
//! The service holds only `Arc` handles to host capabilities and is cheap
//! to share across tasks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use host_traits::files::PickRequest;
use host_traits::notify::{Notice, Notifier};
use host_traits::records::{Playlist, PlaylistId, SongId};
use host_traits::store::{MediaStore, StoreChange};
use host_traits::FileAccess;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::batch::{assign_cover, BatchOutcome, BatchReport};
use crate::config::CoverConfig;
use crate::error::{CoverError, Result};
use crate::events::{CoverEvent, EventBus};
use crate::loader::CoverLoader;
use crate::selector::{AlbumIndex, TargetSelector};

/// Title shown on the native cover picker dialog.
const PICKER_TITLE: &str = "Choose a cover image";

// ============================================================================
// Target Inventory
// ============================================================================

/// Snapshot of everything a cover batch can currently target.
///
/// Built on demand for selection UIs; never cached by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInventory {
    /// Playlists in store order.
    pub playlists: Vec<PlaylistTarget>,
    /// Distinct album names in sorted order.
    pub albums: Vec<AlbumTarget>,
}

/// One selectable playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTarget {
    pub id: PlaylistId,
    pub name: String,
    /// Number of song entries, dangling ones included.
    pub song_count: usize,
    pub has_cover: bool,
}

/// One selectable album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumTarget {
    pub name: String,
    pub song_count: usize,
}

// ============================================================================
// Cover Service
// ============================================================================

/// Facade over cover loading, target resolution and batch updates.
///
/// Constructed from a validated [`CoverConfig`]; all host interaction goes
/// through the injected capabilities, so the service itself is fully
/// testable with mocks.
pub struct CoverService {
    store: Arc<dyn MediaStore>,
    files: Arc<dyn FileAccess>,
    notifier: Arc<dyn Notifier>,
    loader: CoverLoader,
    events: EventBus,
}

impl CoverService {
    /// Builds the service from a validated configuration.
    pub fn new(config: CoverConfig) -> Self {
        let loader = CoverLoader::new(
            Arc::clone(&config.file_access),
            config.allowed_extensions.clone(),
        );
        Self {
            store: config.media_store,
            files: config.file_access,
            notifier: config.notifier,
            loader,
            events: EventBus::new(config.event_capacity),
        }
    }

    /// Subscribes to the service's own events (batch lifecycle, playlist
    /// cover changes).
    pub fn subscribe(&self) -> broadcast::Receiver<CoverEvent> {
        self.events.subscribe()
    }

    /// Subscribes to the store's coarse change signals.
    pub fn watch_store(&self) -> broadcast::Receiver<StoreChange> {
        self.store.watch()
    }

    /// Opens the native file picker, filtered to the accepted cover
    /// extensions.
    ///
    /// `Ok(None)` means the user cancelled; that is not an error and
    /// produces no notice. The returned path is unvalidated; validation
    /// happens when the path is handed to a mutating operation.
    pub async fn pick_cover(&self) -> Result<Option<PathBuf>> {
        let request =
            PickRequest::images(self.loader.allowed_extensions()).with_title(PICKER_TITLE);

        let picked = self.files.pick_file(request).await?;
        if picked.is_none() {
            debug!("Cover selection cancelled");
        }
        Ok(picked)
    }

    /// Resolves a selector to the song ids a batch would visit.
    ///
    /// Playlist targets return the playlist's entries in play order,
    /// dangling ids included. Album targets group a fresh song snapshot by
    /// album name and return the matching group in snapshot order. An
    /// absent playlist id or album name is an error, never an empty batch.
    pub async fn resolve_target(&self, selector: &TargetSelector) -> Result<Vec<SongId>> {
        match selector {
            TargetSelector::Playlist(id) => {
                let playlists = self.store.list_playlists().await?;
                playlists
                    .into_iter()
                    .find(|playlist| playlist.id == *id)
                    .map(|playlist| playlist.song_ids)
                    .ok_or(CoverError::PlaylistNotFound { id: *id })
            }
            TargetSelector::Album(name) => {
                let songs = self.store.list_songs().await?;
                let index = AlbumIndex::build(&songs);
                index
                    .get(name)
                    .map(<[SongId]>::to_vec)
                    .ok_or_else(|| CoverError::AlbumNotFound { name: name.clone() })
            }
        }
    }

    /// Replaces the cover of every song in the target.
    ///
    /// The full pipeline: load and validate the image, resolve the target,
    /// run the batch, then classify and report. Loading and resolution
    /// failures abort before any record is touched. The batch itself never
    /// aborts; its report is returned and summarized as one outcome notice
    /// followed by the batch completion notice.
    pub async fn replace_covers(
        &self,
        selector: &TargetSelector,
        path: &Path,
    ) -> Result<BatchReport> {
        let cover = match self.loader.load(path).await {
            Ok(cover) => cover,
            Err(error) => return Err(self.fail(error).await),
        };

        let song_ids = match self.resolve_target(selector).await {
            Ok(ids) => ids,
            Err(error) => return Err(self.fail(error).await),
        };

        info!(
            target_selector = %selector,
            total = song_ids.len(),
            "Starting cover batch"
        );
        self.events
            .emit(CoverEvent::BatchStarted {
                target: selector.to_string(),
                total: song_ids.len(),
            })
            .ok();

        let report = assign_cover(self.store.as_ref(), &song_ids, &cover).await;

        self.notify_outcome(&report).await;
        self.send_notice(Notice::info("Cover batch complete")).await;
        info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            "Cover batch complete"
        );
        self.events
            .emit(CoverEvent::BatchFinished {
                target: selector.to_string(),
                total: report.total,
                succeeded: report.succeeded,
                failed: report.failed,
                failed_ids: report.failed_ids.clone(),
            })
            .ok();

        Ok(report)
    }

    /// Sets a playlist's cover from an image file.
    ///
    /// Loads and validates the image exactly like a batch does, then writes
    /// the single playlist record. No song record is touched.
    pub async fn set_playlist_cover(&self, id: PlaylistId, path: &Path) -> Result<()> {
        let cover = match self.loader.load(path).await {
            Ok(cover) => cover,
            Err(error) => return Err(self.fail(error).await),
        };

        if let Err(error) = self.store.update_playlist_cover(id, Some(cover)).await {
            return Err(self.fail(CoverError::Host(error)).await);
        }

        info!(playlist_id = %id, "Playlist cover set");
        self.send_notice(Notice::success("Playlist cover updated"))
            .await;
        self.events
            .emit(CoverEvent::PlaylistCoverSet { playlist_id: id })
            .ok();
        Ok(())
    }

    /// Clears a playlist's cover.
    ///
    /// Writes an empty cover to the single playlist record. No image is
    /// loaded, so the loader's validation sequence does not apply.
    pub async fn clear_playlist_cover(&self, id: PlaylistId) -> Result<()> {
        if let Err(error) = self.store.update_playlist_cover(id, None).await {
            return Err(self.fail(CoverError::Host(error)).await);
        }

        info!(playlist_id = %id, "Playlist cover cleared");
        self.send_notice(Notice::success("Playlist cover cleared"))
            .await;
        self.events
            .emit(CoverEvent::PlaylistCoverCleared { playlist_id: id })
            .ok();
        Ok(())
    }

    /// Lists everything a batch can currently target.
    pub async fn targets(&self) -> Result<TargetInventory> {
        let playlists = self.store.list_playlists().await?;
        let songs = self.store.list_songs().await?;
        let index = AlbumIndex::build(&songs);

        Ok(TargetInventory {
            playlists: playlists
                .iter()
                .map(|playlist| PlaylistTarget {
                    id: playlist.id,
                    name: playlist.name.clone(),
                    song_count: playlist.song_ids.len(),
                    has_cover: playlist.has_cover(),
                })
                .collect(),
            albums: index
                .iter()
                .map(|(name, song_count)| AlbumTarget {
                    name: name.to_string(),
                    song_count,
                })
                .collect(),
        })
    }

    /// Playlists currently lacking a cover, in store order.
    ///
    /// Logs one line per playlist so a host console shows the audit trail.
    pub async fn playlists_missing_cover(&self) -> Result<Vec<Playlist>> {
        let playlists = self.store.list_playlists().await?;

        let mut missing = Vec::new();
        for playlist in playlists {
            if playlist.has_cover() {
                debug!(playlist = %playlist.name, "Playlist already has a cover");
            } else {
                info!(playlist = %playlist.name, "Playlist has no cover");
                missing.push(playlist);
            }
        }
        Ok(missing)
    }

    /// Reports `error` as a notice and passes it back for propagation.
    async fn fail(&self, error: CoverError) -> CoverError {
        self.send_notice(Notice::new(error.notice_kind(), error.to_string()))
            .await;
        error
    }

    /// Delivers a notice. Delivery failures are logged, never propagated:
    /// a broken toast channel must not abort a cover operation.
    async fn send_notice(&self, notice: Notice) {
        if let Err(error) = self.notifier.notify(notice).await {
            warn!(error = %error, "Notifier delivery failed");
        }
    }

    /// One outcome notice per batch, severity following the classification.
    async fn notify_outcome(&self, report: &BatchReport) {
        let notice = match report.outcome() {
            BatchOutcome::FullSuccess => Notice::success(format!(
                "Replaced covers for {} songs",
                report.succeeded
            )),
            BatchOutcome::PartialSuccess => {
                warn!(failed_ids = ?report.failed_ids, "Some covers could not be replaced");
                Notice::warning(format!(
                    "Replaced covers for {} songs; {} failed: {}",
                    report.succeeded,
                    report.failed,
                    join_ids(&report.failed_ids)
                ))
            }
            BatchOutcome::TotalFailure => Notice::error(format!(
                "Failed to replace covers for {} songs",
                report.failed
            )),
        };
        self.send_notice(notice).await;
    }
}

impl std::fmt::Debug for CoverService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverService")
            .field("loader", &self.loader)
            .field("events", &self.events)
            .finish()
    }
}

fn join_ids(ids: &[SongId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use host_desktop::MemoryMediaStore;
    use host_traits::records::{CoverArt, Song};
    use mockall::mock;
    use std::sync::Mutex;

    mock! {
        pub Files {}

        #[async_trait]
        impl FileAccess for Files {
            async fn pick_file(&self, request: PickRequest) -> host_traits::error::Result<Option<PathBuf>>;
            async fn exists(&self, path: &Path) -> host_traits::error::Result<bool>;
            async fn read_file(&self, path: &Path) -> host_traits::error::Result<Bytes>;
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notice: Notice) -> host_traits::error::Result<()> {
            self.notices.lock().unwrap().push(notice);
            Ok(())
        }
    }

    fn service(store: Arc<dyn MediaStore>, files: MockFiles) -> CoverService {
        let config = CoverConfig::builder()
            .media_store(store)
            .file_access(Arc::new(files))
            .notifier(Arc::new(RecordingNotifier::default()))
            .build()
            .unwrap();
        CoverService::new(config)
    }

    #[tokio::test]
    async fn test_pick_cover_propagates_cancellation() {
        let mut files = MockFiles::new();
        files
            .expect_pick_file()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(Arc::new(MemoryMediaStore::new()), files);
        let picked = service.pick_cover().await.unwrap();
        assert!(picked.is_none());
    }

    #[tokio::test]
    async fn test_pick_cover_filters_to_allowed_extensions() {
        let mut files = MockFiles::new();
        files
            .expect_pick_file()
            .times(1)
            .withf(|request| {
                request.title.as_deref() == Some(PICKER_TITLE)
                    && request.filters.len() == 1
                    && request.filters[0].extensions == vec!["jpg", "jpeg", "png"]
            })
            .returning(|_| Ok(Some(PathBuf::from("/covers/picked.png"))));

        let service = service(Arc::new(MemoryMediaStore::new()), files);
        let picked = service.pick_cover().await.unwrap();
        assert_eq!(picked, Some(PathBuf::from("/covers/picked.png")));
    }

    #[tokio::test]
    async fn test_targets_inventory_shape() {
        let store = MemoryMediaStore::new();
        store
            .insert_song(Song::new("s1", "One", "Artist", "Moonlight"))
            .await;
        store
            .insert_song(Song::new("s2", "Two", "Artist", "Moonlight"))
            .await;
        store
            .insert_song(Song::new("s3", "Three", "Artist", "Aurora"))
            .await;
        store
            .insert_playlist(
                Playlist::new(1, "Evenings")
                    .with_songs(vec![SongId::new("s1"), SongId::new("ghost")]),
            )
            .await;

        let service = service(Arc::new(store), MockFiles::new());
        let inventory = service.targets().await.unwrap();

        assert_eq!(inventory.playlists.len(), 1);
        assert_eq!(inventory.playlists[0].name, "Evenings");
        assert_eq!(inventory.playlists[0].song_count, 2); // dangling id counts
        assert!(!inventory.playlists[0].has_cover);

        // Albums come back sorted
        let names: Vec<&str> = inventory.albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Aurora", "Moonlight"]);
        assert_eq!(inventory.albums[1].song_count, 2);
    }

    #[tokio::test]
    async fn test_playlists_missing_cover_filters_covered_ones() {
        let store = MemoryMediaStore::new();
        store
            .insert_playlist(
                Playlist::new(1, "Covered")
                    .with_cover(CoverArt::new(Bytes::from_static(b"x"), "image/png")),
            )
            .await;
        store.insert_playlist(Playlist::new(2, "Bare")).await;

        let service = service(Arc::new(store), MockFiles::new());
        let missing = service.playlists_missing_cover().await.unwrap();

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "Bare");
    }

    #[tokio::test]
    async fn test_resolve_target_prefers_playlist_order() {
        let store = MemoryMediaStore::new();
        store
            .insert_playlist(
                Playlist::new(7, "Order").with_songs(vec![
                    SongId::new("z"),
                    SongId::new("a"),
                    SongId::new("m"),
                ]),
            )
            .await;

        let service = service(Arc::new(store), MockFiles::new());
        let ids = service
            .resolve_target(&TargetSelector::playlist(7))
            .await
            .unwrap();

        assert_eq!(
            ids,
            vec![SongId::new("z"), SongId::new("a"), SongId::new("m")]
        );
    }

    #[tokio::test]
    async fn test_resolve_target_missing_album_is_an_error() {
        let store = MemoryMediaStore::new();
        store
            .insert_song(Song::new("s1", "One", "Artist", "Moonlight"))
            .await;

        let service = service(Arc::new(store), MockFiles::new());
        let err = service
            .resolve_target(&TargetSelector::album("moonlight"))
            .await
            .unwrap_err();

        // Exact match only; no empty batch for a near-miss
        assert!(matches!(err, CoverError::AlbumNotFound { .. }));
    }
}
