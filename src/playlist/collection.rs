use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::error::Result;
use crate::import::{self, ImportReport};
use crate::library::{Library, Track};
use crate::storage::{self, JsonFile, Storage};

use super::{Playlist, SortCriterion};

/// Orderings for a sorted view of the whole collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum PlaylistOrder {
    #[value(alias = "date-created", alias = "created")]
    DateCreated,
    /// Case-insensitive.
    Name,
    /// Sum of member durations.
    Duration,
}

impl fmt::Display for PlaylistOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DateCreated => "date created",
            Self::Name => "name",
            Self::Duration => "duration",
        })
    }
}

/// Playlists keyed by unique name, kept in creation order.
///
/// Every successful mutation rewrites `playlists.json`.
#[derive(Debug, Default)]
pub struct PlaylistCollection {
    playlists: Vec<Playlist>,
    store: Option<JsonFile>,
}

impl PlaylistCollection {
    /// An empty, unpersisted collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load saved playlists from `storage`; unreadable state starts empty.
    pub fn open(storage: &Storage) -> Self {
        let store = storage.playlists();
        let mut playlists: Vec<Playlist> = store.load().unwrap_or_default();

        // Names are the registry key: the first saved playlist wins.
        let mut seen: Vec<String> = Vec::with_capacity(playlists.len());
        playlists.retain(|p| {
            if seen.iter().any(|n| n == p.name()) {
                false
            } else {
                seen.push(p.name().to_string());
                true
            }
        });

        info!("loaded {} playlists", playlists.len());
        Self {
            playlists,
            store: Some(store),
        }
    }

    /// Create an empty playlist called `name`.
    ///
    /// Returns `None` when the name is already taken.
    pub fn create(&mut self, name: &str) -> Option<&Playlist> {
        if self.get(name).is_some() {
            return None;
        }
        self.playlists.push(Playlist::new(name));
        self.persist();
        self.playlists.last()
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name() == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.name() == name)
    }

    /// 0-based access in creation order.
    pub fn fetch_at(&self, index: usize) -> Option<&Playlist> {
        self.playlists.get(index)
    }

    pub fn names(&self) -> Vec<&str> {
        self.playlists.iter().map(Playlist::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// A separately ordered view; the collection's own order is untouched.
    pub fn sorted_view(&self, order: PlaylistOrder) -> Vec<&Playlist> {
        let mut view: Vec<&Playlist> = self.playlists.iter().collect();
        match order {
            PlaylistOrder::DateCreated => view.sort_by_key(|p| p.created_at()),
            PlaylistOrder::Name => view.sort_by_cached_key(|p| p.name().to_lowercase()),
            PlaylistOrder::Duration => view.sort_by_cached_key(|p| p.total_seconds()),
        }
        view
    }

    /// Append `track` to the playlist called `name`, persisting on success.
    ///
    /// Returns `false` when the playlist doesn't exist or already has the track.
    pub fn insert_track(&mut self, name: &str, track: Track) -> bool {
        let added = match self.get_mut(name) {
            Some(playlist) => playlist.append(track),
            None => false,
        };
        if added {
            self.persist();
        }
        added
    }

    /// Re-sort one playlist in place without persisting.
    pub fn reorder(&mut self, name: &str, criterion: SortCriterion) -> bool {
        match self.get_mut(name) {
            Some(playlist) => {
                playlist.reorder(criterion);
                true
            }
            None => false,
        }
    }

    /// Merge a JSON or CSV playlist batch.
    ///
    /// Playlists whose name already exists are counted as duplicates and
    /// left alone. Every track that lands in a new playlist is also offered
    /// to `library`.
    pub fn import_playlists(&mut self, path: &Path, library: &mut Library) -> Result<ImportReport> {
        let records = import::read_playlist_batch(path)?;
        let mut report = ImportReport::default();

        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(msg) => {
                    report.record_error(msg);
                    continue;
                }
            };

            if self.get(&record.name).is_some() {
                report.duplicates += 1;
                continue;
            }

            let mut playlist = Playlist::new(record.name);
            for track in record.tracks {
                if playlist.append(track.clone()) {
                    library.insert_track(track);
                }
            }
            self.playlists.push(playlist);
            report.imported += 1;
        }

        self.persist();
        info!(
            "imported playlists from {}: {} new, {} duplicate, {} skipped",
            path.display(),
            report.imported,
            report.duplicates,
            report.skipped
        );
        Ok(report)
    }

    fn persist(&self) {
        storage::persist(self.store.as_ref(), "playlists", &self.playlists);
    }
}
