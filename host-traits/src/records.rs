//! Record types shared between the host's store and the cover core.
//!
//! These mirror the entities the host persists. The core never owns them: it
//! reads snapshots through [`MediaStore`](crate::store::MediaStore) and issues
//! single-record update requests.

use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a song, assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(pub String);

impl SongId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique numeric identifier for a playlist, assigned by the host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlaylistId(pub i64);

impl PlaylistId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PlaylistId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// =============================================================================
// Cover Art
// =============================================================================

/// Binary image payload together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverArt {
    /// Raw image bytes, exactly as read from disk.
    pub data: Bytes,
    /// MIME type inferred from the source file extension.
    pub mime_type: String,
}

impl CoverArt {
    pub fn new(data: Bytes, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Validates the cover art.
    pub fn validate(&self) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("Cover data must not be empty".to_string());
        }
        if self.mime_type.is_empty() {
            return Err("Cover MIME type must not be empty".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Domain Records
// =============================================================================

/// A song record as persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier
    pub id: SongId,
    /// Absolute path of the audio file
    pub file_path: String,
    /// Song title
    pub title: String,
    /// Display string for the performing artists
    pub artists: String,
    /// Album name; may be empty, and the empty string is a valid grouping key
    pub album: String,
    /// Duration in milliseconds
    pub duration_ms: i64,
    /// Embedded cover image, if any
    pub cover: Option<CoverArt>,
    /// Downscaled cover cached by the host, if any
    pub thumbnail: Option<CoverArt>,
    /// Lyric body, if any
    pub lyric: Option<String>,
    /// Translated lyric body, if any
    pub translated_lyric: Option<String>,
}

impl Song {
    /// Creates a song with the given identity, no cover, and empty media
    /// fields. Hosts fill the rest; tests usually don't need to.
    pub fn new(
        id: impl Into<SongId>,
        title: impl Into<String>,
        artists: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_path: String::new(),
            title: title.into(),
            artists: artists.into(),
            album: album.into(),
            duration_ms: 0,
            cover: None,
            thumbnail: None,
            lyric: None,
            translated_lyric: None,
        }
    }

    pub fn with_cover(mut self, cover: CoverArt) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }

    /// Validates the record.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().is_empty() {
            return Err("Song id must not be empty".to_string());
        }
        if self.title.is_empty() {
            return Err("Song title must not be empty".to_string());
        }
        if let Some(cover) = &self.cover {
            cover.validate()?;
        }
        Ok(())
    }
}

/// A playlist record as persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique numeric identifier
    pub id: PlaylistId,
    /// Display name
    pub name: String,
    /// Playlist cover image, if one has been set
    pub cover: Option<CoverArt>,
    /// Songs in play order; entries may reference songs the host no longer
    /// has (no referential integrity is enforced)
    pub song_ids: Vec<SongId>,
    /// Creation time, Unix epoch seconds
    pub created_at: i64,
    /// Last modification time, Unix epoch seconds
    pub updated_at: i64,
    /// Last playback time, Unix epoch seconds
    pub played_at: i64,
}

impl Playlist {
    /// Creates an empty playlist stamped with the current time.
    pub fn new(id: impl Into<PlaylistId>, name: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: id.into(),
            name: name.into(),
            cover: None,
            song_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            played_at: now,
        }
    }

    pub fn with_songs(mut self, song_ids: Vec<SongId>) -> Self {
        self.song_ids = song_ids;
        self
    }

    pub fn with_cover(mut self, cover: CoverArt) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }

    /// Validates the record.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Playlist name must not be empty".to_string());
        }
        if let Some(cover) = &self.cover {
            cover.validate()?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cover() -> CoverArt {
        CoverArt::new(Bytes::from_static(b"\xff\xd8\xff\xe0"), "image/jpeg")
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SongId::from("s1").to_string(), "s1");
        assert_eq!(PlaylistId::new(7).to_string(), "7");
    }

    #[test]
    fn test_song_id_serde_is_transparent() {
        let id = SongId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_cover_art_validation() {
        assert!(sample_cover().validate().is_ok());

        let empty = CoverArt::new(Bytes::new(), "image/png");
        assert!(empty.validate().is_err());

        let untyped = CoverArt::new(Bytes::from_static(b"x"), "");
        assert!(untyped.validate().is_err());
    }

    #[test]
    fn test_song_allows_empty_album() {
        let song = Song::new("s1", "Untitled", "Unknown", "");
        assert!(song.validate().is_ok());
        assert_eq!(song.album, "");
    }

    #[test]
    fn test_song_requires_id_and_title() {
        assert!(Song::new("", "Title", "Artist", "Album").validate().is_err());
        assert!(Song::new("s1", "", "Artist", "Album").validate().is_err());
    }

    #[test]
    fn test_playlist_builder() {
        let playlist = Playlist::new(5, "Night Drive")
            .with_songs(vec![SongId::from("a"), SongId::from("b")])
            .with_cover(sample_cover());

        assert_eq!(playlist.id, PlaylistId::new(5));
        assert_eq!(playlist.song_ids.len(), 2);
        assert!(playlist.has_cover());
        assert!(playlist.created_at > 0);
        assert!(playlist.validate().is_ok());
    }

    #[test]
    fn test_playlist_requires_name() {
        assert!(Playlist::new(1, "").validate().is_err());
    }
}
