//! # Target Selection
//!
//! The batch engine needs a set of song ids to visit. This module supplies
//! the two target kinds (playlist and album), the legacy single-string
//! encoding used by host selection UIs, and the album grouping derived from
//! a song snapshot.

use std::collections::BTreeMap;
use std::fmt;

use host_traits::records::{PlaylistId, Song, SongId};
use serde::{Deserialize, Serialize};

use crate::error::{CoverError, Result};

/// Marker prefix of the string selector's playlist form.
pub const PLAYLIST_MARKER: char = '#';

/// The target of a cover batch: one playlist (by id) or one album (by name).
///
/// The two variants can be constructed directly. [`TargetSelector::parse`]
/// exists for the legacy single-string form, where a leading `#` always
/// means playlist mode. An album literally named `"#7"` is therefore
/// unreachable through the string form and must be selected as
/// `TargetSelector::Album` explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum TargetSelector {
    /// All songs of one playlist, in playlist order.
    Playlist(PlaylistId),
    /// All songs whose album name equals the string exactly, in store order.
    Album(String),
}

impl TargetSelector {
    /// Parses the legacy string encoding.
    ///
    /// `"#<id>"` selects a playlist; any other non-empty string is an album
    /// name. An empty string, a bare `#`, or a `#` followed by a non-numeric
    /// id is rejected as [`CoverError::InvalidSelector`].
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some(rest) = raw.strip_prefix(PLAYLIST_MARKER) {
            let id: i64 = rest.parse().map_err(|_| CoverError::InvalidSelector {
                raw: raw.to_string(),
            })?;
            return Ok(TargetSelector::Playlist(PlaylistId::new(id)));
        }

        if raw.is_empty() {
            return Err(CoverError::InvalidSelector {
                raw: raw.to_string(),
            });
        }

        Ok(TargetSelector::Album(raw.to_string()))
    }

    /// Convenience constructor for an album target.
    pub fn album(name: impl Into<String>) -> Self {
        TargetSelector::Album(name.into())
    }

    /// Convenience constructor for a playlist target.
    pub fn playlist(id: impl Into<PlaylistId>) -> Self {
        TargetSelector::Playlist(id.into())
    }
}

impl fmt::Display for TargetSelector {
    /// Re-encodes the legacy string form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSelector::Playlist(id) => write!(f, "{}{}", PLAYLIST_MARKER, id),
            TargetSelector::Album(name) => f.write_str(name),
        }
    }
}

/// Album-name to song-id grouping derived from one song snapshot.
///
/// Ephemeral by design: build it from a fresh [`MediaStore::list_songs`]
/// snapshot right before use and drop it afterwards, so the grouping can
/// never go stale against the store. Keys are exact album strings (the empty
/// string forms its own group), and each group keeps the ids in snapshot
/// encounter order.
///
/// [`MediaStore::list_songs`]: host_traits::store::MediaStore::list_songs
#[derive(Debug, Default)]
pub struct AlbumIndex {
    groups: BTreeMap<String, Vec<SongId>>,
}

impl AlbumIndex {
    /// Groups a song snapshot by album name.
    pub fn build(songs: &[Song]) -> Self {
        let mut groups: BTreeMap<String, Vec<SongId>> = BTreeMap::new();
        for song in songs {
            groups
                .entry(song.album.clone())
                .or_default()
                .push(song.id.clone());
        }
        Self { groups }
    }

    /// Song ids of one album, in snapshot order. `None` if the album name
    /// is absent from the snapshot.
    pub fn get(&self, album: &str) -> Option<&[SongId]> {
        self.groups.get(album).map(Vec::as_slice)
    }

    /// Album names in sorted order, each with its song count.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.groups.iter().map(|(name, ids)| (name.as_str(), ids.len()))
    }

    /// Number of distinct album names in the snapshot.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the snapshot contained no songs.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
