//! Application model types: `App` and `Outcome`.
//!
//! `App` owns the library, the playlist collection and the queue for one
//! session. Each user-facing operation returns an [`Outcome`] carrying a
//! message that can be shown as-is.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{ImportSettings, Settings};
use crate::duration::try_parse_duration;
use crate::import::{self, ImportReport};
use crate::library::{Artist, Library, Track};
use crate::playlist::PlaylistCollection;
use crate::queue::Queue;
use crate::storage::Storage;

/// Result of a user-facing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(String),
    Rejected(String),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Done(msg) | Self::Rejected(msg) => msg,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The main application model.
pub struct App {
    pub library: Library,
    pub playlists: PlaylistCollection,
    pub queue: Queue,
    pub import: ImportSettings,
    queue_restored: bool,
}

impl App {
    /// Open every collection under the configured data directory.
    pub fn open(settings: &Settings) -> Self {
        Self::with_storage(Storage::new(settings.data_dir()), settings)
    }

    /// Open every collection under `storage`.
    pub fn with_storage(storage: Storage, settings: &Settings) -> Self {
        let library = Library::open(&storage);
        let playlists = PlaylistCollection::open(&storage);
        let mut queue = Queue::with_store(storage.queue());
        let queue_restored = queue.load_state();

        info!("opened catalog in {}", storage.dir().display());
        Self {
            library,
            playlists,
            queue,
            import: settings.import.clone(),
            queue_restored,
        }
    }

    /// Whether a saved queue was picked up at startup.
    pub fn queue_restored(&self) -> bool {
        self.queue_restored
    }

    /// Add a track typed in by the user. Commas in `artist` separate names.
    pub fn add_track(&mut self, title: &str, artist: &str, album: &str, duration: &str) -> Outcome {
        let (title, album, duration) = (title.trim(), album.trim(), duration.trim());
        if title.is_empty() || artist.trim().is_empty() || album.is_empty() {
            return Outcome::Rejected("Title, artist and album are all required".into());
        }
        if try_parse_duration(duration).is_none() {
            return Outcome::Rejected(format!(
                "Invalid duration {duration:?}: use MM:SS or HH:MM:SS"
            ));
        }

        let track = Track::new(title, Artist::parse(artist), album, duration);
        let label = track.to_string();
        if self.library.insert_track(track) {
            Outcome::Done(format!("Added {label}"))
        } else {
            Outcome::Rejected(format!("{label} is already in the library"))
        }
    }

    /// Import a track batch. Bare file names are looked up in the tracks
    /// import directory.
    pub fn import_tracks(&mut self, file: &Path) -> Outcome {
        let path = locate_batch(&self.import.tracks_dir, file);
        match self.library.import_tracks(&path) {
            Ok(report) => Outcome::Done(summarize("tracks", &report)),
            Err(e) => Outcome::Rejected(e.to_string()),
        }
    }

    /// Import a playlist batch. Bare file names are looked up in the
    /// playlists import directory.
    pub fn import_playlists(&mut self, file: &Path) -> Outcome {
        let path = locate_batch(&self.import.playlists_dir, file);
        match self.playlists.import_playlists(&path, &mut self.library) {
            Ok(report) => Outcome::Done(summarize("playlists", &report)),
            Err(e) => Outcome::Rejected(e.to_string()),
        }
    }

    /// Batch files waiting in the track and playlist import directories.
    pub fn pending_imports(&self) -> (Vec<PathBuf>, Vec<PathBuf>) {
        (
            import::list_batches(&self.import.tracks_dir, &self.import),
            import::list_batches(&self.import.playlists_dir, &self.import),
        )
    }

    pub fn create_playlist(&mut self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Outcome::Rejected("Playlist name can't be empty".into());
        }
        match self.playlists.create(name) {
            Some(_) => Outcome::Done(format!("Created playlist {name:?}")),
            None => Outcome::Rejected(format!("A playlist named {name:?} already exists")),
        }
    }

    /// Add library track `number` (1-based) to playlist `name`.
    pub fn add_to_playlist(&mut self, name: &str, number: usize) -> Outcome {
        let Some(track) = self.library_track(number) else {
            return Outcome::Rejected(format!("No track #{number} in the library"));
        };
        let Some(playlist) = self.playlists.get(name) else {
            return Outcome::Rejected(format!("No playlist named {name:?}"));
        };
        if playlist.contains(&track) {
            return Outcome::Rejected(format!("{track} is already in {name:?}"));
        }

        let label = track.to_string();
        if self.playlists.insert_track(name, track) {
            Outcome::Done(format!("Added {label} to {name:?}"))
        } else {
            Outcome::Rejected(format!("Couldn't add {label} to {name:?}"))
        }
    }

    /// Append library track `number` (1-based) to the queue.
    pub fn enqueue(&mut self, number: usize) -> Outcome {
        let Some(track) = self.library_track(number) else {
            return Outcome::Rejected(format!("No track #{number} in the library"));
        };

        let label = track.to_string();
        if self.queue.append(track) {
            self.queue.save_state();
            Outcome::Done(format!("Queued {label}"))
        } else {
            Outcome::Rejected(format!("{label} is already queued"))
        }
    }

    /// Replace the queue with every track of album `name`.
    pub fn queue_album(&mut self, name: &str) -> Outcome {
        let tracks = match self.library.albums().get(name) {
            Some(album) if !album.is_empty() => album.tracks().to_vec(),
            Some(_) => return Outcome::Rejected(format!("Album {name:?} has no tracks")),
            None => return Outcome::Rejected(format!("No album named {name:?}")),
        };
        self.replace_queue(tracks, name)
    }

    /// Replace the queue with every track of playlist `name`, in playlist order.
    pub fn queue_playlist(&mut self, name: &str) -> Outcome {
        let tracks = match self.playlists.get(name) {
            Some(playlist) if !playlist.is_empty() => playlist.tracks(),
            Some(_) => return Outcome::Rejected(format!("Playlist {name:?} is empty")),
            None => return Outcome::Rejected(format!("No playlist named {name:?}")),
        };
        self.replace_queue(tracks, name)
    }

    fn replace_queue(&mut self, tracks: Vec<Track>, source: &str) -> Outcome {
        self.queue.load_tracks(tracks);
        self.queue.save_state();
        Outcome::Done(format!(
            "Queued {} tracks from {source:?} ({})",
            self.queue.len(),
            self.queue.total_duration()
        ))
    }

    pub fn play(&mut self) -> Outcome {
        if self.queue.is_empty() {
            return Outcome::Rejected("The queue is empty".into());
        }
        self.queue.play();
        self.queue.save_state();
        self.now_playing("Playing")
    }

    pub fn pause(&mut self) -> Outcome {
        if !self.queue.is_playing() {
            return Outcome::Rejected("Nothing is playing".into());
        }
        self.queue.pause();
        self.queue.save_state();
        self.now_playing("Paused")
    }

    pub fn toggle_play(&mut self) -> Outcome {
        if self.queue.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn next(&mut self) -> Outcome {
        if self.queue.is_empty() {
            return Outcome::Rejected("The queue is empty".into());
        }
        let moved = self.queue.next().is_some();
        self.queue.save_state();
        if moved {
            self.now_playing("Now playing")
        } else {
            Outcome::Rejected("Reached the end of the queue".into())
        }
    }

    pub fn previous(&mut self) -> Outcome {
        if self.queue.is_empty() {
            return Outcome::Rejected("The queue is empty".into());
        }
        if self.queue.previous().is_none() {
            return Outcome::Rejected("Already at the start of the queue".into());
        }
        self.queue.save_state();
        self.now_playing("Now playing")
    }

    pub fn toggle_repeat(&mut self) -> Outcome {
        let on = self.queue.toggle_repeat();
        self.queue.save_state();
        Outcome::Done(format!("Repeat {}", if on { "on" } else { "off" }))
    }

    pub fn toggle_shuffle(&mut self) -> Outcome {
        if self.queue.is_shuffled() {
            self.queue.unshuffle();
            self.queue.save_state();
            return Outcome::Done("Shuffle off".into());
        }
        if self.queue.len() < 2 {
            return Outcome::Rejected("Need at least two queued tracks to shuffle".into());
        }
        self.queue.shuffle();
        self.queue.save_state();
        Outcome::Done("Shuffle on".into())
    }

    /// Remove queue entry `position` (1-based).
    pub fn dequeue(&mut self, position: usize) -> Outcome {
        let label = position
            .checked_sub(1)
            .and_then(|i| self.queue.tracks().get(i))
            .map(Track::to_string);
        if !self.queue.remove(position) {
            return Outcome::Rejected(format!("No track #{position} in the queue"));
        }

        self.queue.save_state();
        match label {
            Some(label) => Outcome::Done(format!("Removed {label} from the queue")),
            None => Outcome::Done(format!("Removed track #{position} from the queue")),
        }
    }

    pub fn clear_queue(&mut self) -> Outcome {
        self.queue.clear();
        Outcome::Done("Queue cleared".into())
    }

    fn library_track(&self, number: usize) -> Option<Track> {
        number
            .checked_sub(1)
            .and_then(|i| self.library.fetch_at(i))
            .cloned()
    }

    fn now_playing(&self, verb: &str) -> Outcome {
        match self.queue.current_track() {
            Some(track) => Outcome::Done(format!("{verb}: {track}")),
            None => Outcome::Done(verb.to_string()),
        }
    }
}

/// Use `file` as given when it exists, else look it up under `dir`.
fn locate_batch(dir: &Path, file: &Path) -> PathBuf {
    if file.exists() || file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}

fn summarize(what: &str, report: &ImportReport) -> String {
    let mut msg = format!(
        "Imported {} {what} ({} duplicate, {} skipped)",
        report.imported, report.duplicates, report.skipped
    );
    for err in &report.errors {
        msg.push_str("\n  ");
        msg.push_str(err);
    }
    msg
}
