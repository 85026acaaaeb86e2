//! Playlists: named, duplicate-free track lists that remember when each
//! track was added, and the named registry that owns them.

mod collection;

pub use collection::{PlaylistCollection, PlaylistOrder};

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::duration::format_duration;
use crate::library::Track;

/// A track together with the moment it joined the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub track: Track,
    pub added_at: DateTime<Utc>,
}

/// How [`Playlist::reorder`] sorts its entries.
///
/// Every criterion compares a full five-part key (strings case-insensitive),
/// so the resulting order is total and deterministic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortCriterion {
    /// added-at, title, primary artist, album, seconds
    #[value(alias = "date-added", alias = "added")]
    DateAdded,
    /// title, primary artist, album, seconds, added-at
    Title,
    /// primary artist, title, album, seconds, added-at
    Artist,
    /// seconds, title, primary artist, album, added-at
    Duration,
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DateAdded => "date added",
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Duration => "duration",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart {
    Time(DateTime<Utc>),
    Text(String),
    Seconds(u64),
}

impl SortCriterion {
    fn key(self, entry: &PlaylistEntry) -> [KeyPart; 5] {
        let t = &entry.track;
        let added = KeyPart::Time(entry.added_at);
        let title = KeyPart::Text(t.title.to_lowercase());
        let artist = KeyPart::Text(t.primary_artist().to_lowercase());
        let album = KeyPart::Text(t.album.to_lowercase());
        let secs = KeyPart::Seconds(t.duration_seconds());

        match self {
            Self::DateAdded => [added, title, artist, album, secs],
            Self::Title => [title, artist, album, secs, added],
            Self::Artist => [artist, title, album, secs, added],
            Self::Duration => [secs, title, artist, album, added],
        }
    }
}

/// A named, ordered list of tracks.
///
/// Duplicates are rejected on title + artist alone (case-insensitive), a
/// narrower key than the library's: the same song from another album or with
/// another duration still counts as already present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    name: String,
    created_at: DateTime<Utc>,
    tracks: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_created_at(name, Utc::now())
    }

    pub fn with_created_at(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            created_at,
            tracks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.tracks
    }

    /// Tracks in current playlist order.
    pub fn tracks(&self) -> Vec<Track> {
        self.tracks.iter().map(|e| e.track.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, track: &Track) -> bool {
        let key = identity_key(track);
        self.tracks.iter().any(|e| identity_key(&e.track) == key)
    }

    /// Append `track`, stamped with the current time.
    pub fn append(&mut self, track: Track) -> bool {
        self.append_at(track, Utc::now())
    }

    /// Append `track` with an explicit added-at time.
    pub fn append_at(&mut self, track: Track, added_at: DateTime<Utc>) -> bool {
        if self.contains(&track) {
            return false;
        }
        self.tracks.push(PlaylistEntry { track, added_at });
        true
    }

    /// Re-sort entries in place. Not persisted on its own.
    pub fn reorder(&mut self, criterion: SortCriterion) {
        self.tracks.sort_by_cached_key(|e| criterion.key(e));
    }

    pub fn total_seconds(&self) -> u64 {
        self.tracks.iter().map(|e| e.track.duration_seconds()).sum()
    }

    pub fn total_duration(&self) -> String {
        format_duration(self.total_seconds())
    }
}

fn identity_key(track: &Track) -> (String, String) {
    (
        track.title.to_lowercase(),
        track.artist.canonical().to_lowercase(),
    )
}
