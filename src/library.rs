//! The track library: every known track, in insertion order, plus the
//! album grouping derived from it.

mod album;
mod model;

pub use album::{Album, AlbumCollection};
pub use model::{Artist, Track};

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::import::{self, ImportReport};
use crate::storage::{self, JsonFile, Storage};

/// Duplicate-free, insertion-ordered set of tracks.
///
/// Every successful insert rewrites `library.json`; the album grouping
/// persists itself to `albums.json`.
#[derive(Debug, Default)]
pub struct Library {
    tracks: Vec<Track>,
    albums: AlbumCollection,
    store: Option<JsonFile>,
}

impl Library {
    /// An empty, unpersisted library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the library and its albums from `storage`.
    ///
    /// Missing or unreadable files yield an empty library. Albums are
    /// restored from their own file and then topped up from the track list,
    /// so every track is always filed under its album.
    pub fn open(storage: &Storage) -> Self {
        let store = storage.library();
        let saved: Vec<Track> = store.load().unwrap_or_default();

        let mut tracks: Vec<Track> = Vec::with_capacity(saved.len());
        for track in saved {
            if tracks.iter().any(|t| t.matches(&track)) {
                debug!("skipping duplicate saved track {:?}", track.title);
                continue;
            }
            tracks.push(track);
        }

        let mut albums = AlbumCollection::restore(storage.albums(), &tracks);
        let mut derived = false;
        for track in &tracks {
            derived |= albums.insert_quietly(track);
        }
        if derived {
            albums.persist();
        }

        info!(
            "loaded {} tracks in {} albums from {}",
            tracks.len(),
            albums.len(),
            storage.dir().display()
        );

        Self {
            tracks,
            albums,
            store: Some(store),
        }
    }

    /// Add `track` unless a matching track is already present.
    ///
    /// On success the track is also filed under its album and both
    /// collections are persisted. Returns whether the track was added.
    pub fn insert_track(&mut self, track: Track) -> bool {
        if self.tracks.iter().any(|t| t.matches(&track)) {
            return false;
        }

        self.albums.register_track(&track);
        self.tracks.push(track);
        storage::persist(self.store.as_ref(), "library", &self.tracks);
        true
    }

    /// Case-insensitive title substring search, in library order.
    pub fn find_by_title_substring(&self, query: &str) -> Vec<&Track> {
        let query = query.to_lowercase();
        self.tracks
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&query))
            .collect()
    }

    /// 0-based access in library order.
    pub fn fetch_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
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

    pub fn albums(&self) -> &AlbumCollection {
        &self.albums
    }

    /// Import a JSON or CSV track batch.
    ///
    /// Fails only when the file itself can't be used (unknown extension,
    /// missing, malformed at the top level); bad records are counted and
    /// described in the report.
    pub fn import_tracks(&mut self, path: &Path) -> Result<ImportReport> {
        let records = import::read_track_batch(path)?;
        let mut report = ImportReport::default();

        for record in records {
            match record {
                Ok(track) => {
                    if self.insert_track(track) {
                        report.imported += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Err(msg) => report.record_error(msg),
            }
        }

        info!(
            "imported tracks from {}: {} new, {} duplicate, {} skipped",
            path.display(),
            report.imported,
            report.duplicates,
            report.skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests;
