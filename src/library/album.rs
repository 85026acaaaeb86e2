use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::duration::format_duration;
use crate::storage::{self, JsonFile};

use super::model::Track;

/// Tracks sharing an album name, in the order they were registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    name: String,
    tracks: Vec<Track>,
}

impl Album {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Append `track` unless it belongs to another album or is already present.
    pub fn append(&mut self, track: Track) -> bool {
        if track.album != self.name || self.tracks.iter().any(|t| t.matches(&track)) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    pub fn total_seconds(&self) -> u64 {
        self.tracks.iter().map(Track::duration_seconds).sum()
    }

    pub fn total_duration(&self) -> String {
        format_duration(self.total_seconds())
    }
}

/// Albums keyed by name, in first-seen order.
#[derive(Debug, Default)]
pub struct AlbumCollection {
    albums: Vec<Album>,
    index: HashMap<String, usize>,
    store: Option<JsonFile>,
}

impl AlbumCollection {
    /// An empty, unpersisted collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the collection from `store`, resolving every saved track
    /// against `available`. Saved entries with no live counterpart are dropped.
    pub(crate) fn restore(store: JsonFile, available: &[Track]) -> Self {
        let saved: Vec<Album> = store.load().unwrap_or_default();
        let mut albums = Self {
            store: Some(store),
            ..Self::default()
        };

        for snapshot in saved {
            let album = albums.get_or_create(&snapshot.name);
            for wanted in &snapshot.tracks {
                match available.iter().find(|t| t.same_recording(wanted)) {
                    Some(track) => {
                        album.append(track.clone());
                    }
                    None => warn!(
                        "dropping album entry {:?} from {:?}: not in library",
                        wanted.title, snapshot.name
                    ),
                }
            }
        }
        albums
    }

    /// Return the album called `name`, creating it when absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut Album {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.albums.push(Album::new(name));
                let idx = self.albums.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.albums[idx]
    }

    /// File `track` under its album and persist every album.
    ///
    /// Returns whether the album gained the track.
    pub fn register_track(&mut self, track: &Track) -> bool {
        let added = self.insert_quietly(track);
        if added {
            self.persist();
        }
        added
    }

    pub(crate) fn insert_quietly(&mut self, track: &Track) -> bool {
        self.get_or_create(&track.album).append(track.clone())
    }

    pub(crate) fn persist(&self) {
        storage::persist(self.store.as_ref(), "albums", &self.albums);
    }

    pub fn get(&self, name: &str) -> Option<&Album> {
        self.index.get(name).map(|&idx| &self.albums[idx])
    }

    /// 0-based access in registry order.
    pub fn album_at(&self, index: usize) -> Option<&Album> {
        self.albums.get(index)
    }

    pub fn names(&self) -> Vec<&str> {
        self.albums.iter().map(Album::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Album> {
        self.albums.iter()
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}
