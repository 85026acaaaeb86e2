//! The play queue.
//!
//! A position-tracked, duplicate-free track sequence with next/previous
//! navigation, repeat wraparound, a play/pause flag, and a shuffle that only
//! permutes the tracks after the current one. Nothing here plays audio.
//!
//! Unlike the library and playlists, the queue does not persist itself on
//! every change: callers decide when to [`Queue::save_state`].

mod state;

pub use state::QueueState;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, error, info};

use crate::duration::format_duration;
use crate::library::Track;
use crate::storage::{self, JsonFile};

#[derive(Debug, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,
    playing: bool,
    repeat: bool,
    shuffled: bool,
    /// Order to return to on unshuffle. Tracks appended while shuffled are
    /// folded in only when unshuffling.
    original_order: Vec<Track>,
    store: Option<JsonFile>,
}

impl Queue {
    /// An empty, unpersisted queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty queue that saves to and restores from `store`.
    pub fn with_store(store: JsonFile) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    /// Rebuild a queue from a snapshot. The result is unpersisted.
    pub fn from_state(state: QueueState) -> Self {
        let mut queue = Self::new();
        queue.apply(state);
        queue
    }

    /// Snapshot of the full queue state.
    pub fn state(&self) -> QueueState {
        QueueState {
            tracks: self.tracks.clone(),
            current_index: QueueState::encode_current(self.current),
            is_shuffled: self.shuffled,
            is_repeat: self.repeat,
            is_playing: self.playing,
            original_order: self.original_order.clone(),
        }
    }

    fn apply(&mut self, state: QueueState) {
        self.current = state.current();
        self.shuffled = state.is_shuffled;
        self.repeat = state.is_repeat;
        self.playing = state.is_playing;
        self.tracks = state.tracks;
        self.original_order = state.original_order;
    }

    /// Replace the in-memory queue with the saved one.
    ///
    /// Returns `false`, leaving the queue untouched, when there is no store
    /// or no readable saved state.
    pub fn load_state(&mut self) -> bool {
        let Some(state) = self.store.as_ref().and_then(JsonFile::load::<QueueState>) else {
            return false;
        };
        self.apply(state);
        info!("restored queue with {} tracks", self.tracks.len());
        true
    }

    /// Write the current state to the attached store, if any.
    pub fn save_state(&self) {
        storage::persist(self.store.as_ref(), "queue state", &self.state());
    }

    /// Append `track` unless a matching track is already queued.
    ///
    /// The first track of an empty queue becomes current; otherwise the
    /// position doesn't move.
    pub fn append(&mut self, track: Track) -> bool {
        if self.tracks.iter().any(|t| t.matches(&track)) {
            debug!("{:?} is already queued", track.title);
            return false;
        }

        if self.tracks.is_empty() {
            self.current = Some(0);
        }
        if !self.shuffled {
            self.original_order.push(track.clone());
        }
        self.tracks.push(track);
        true
    }

    /// Replace the whole queue with `tracks`, starting at the first one.
    ///
    /// Shuffle and play are switched off; repeat is kept.
    pub fn load_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.clear();
        for track in tracks {
            if !self.tracks.iter().any(|t| t.matches(&track)) {
                self.tracks.push(track);
            }
        }
        self.current = self.first_index();
        self.shuffled = false;
        self.playing = false;
        self.original_order = self.tracks.clone();
    }

    /// Mark the queue as playing.
    ///
    /// Pressing play while parked on the last track without repeat starts
    /// over from the first track.
    pub fn play(&mut self) {
        if !self.repeat && self.current.is_some() && self.current == self.last_index() {
            self.current = self.first_index();
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance to the next track.
    ///
    /// At the end, wraps to the first track when repeating; otherwise stops
    /// playback and returns `None`.
    pub fn next(&mut self) -> Option<&Track> {
        let cur = self.current?;
        if cur + 1 < self.tracks.len() {
            self.current = Some(cur + 1);
        } else if self.repeat {
            self.current = self.first_index();
        } else {
            self.playing = false;
            return None;
        }
        self.current_track()
    }

    /// Step back to the previous track.
    ///
    /// At the start, wraps to the last track when repeating; otherwise stays
    /// put and returns `None`.
    pub fn previous(&mut self) -> Option<&Track> {
        let cur = self.current?;
        if cur > 0 {
            self.current = Some(cur - 1);
        } else if self.repeat {
            self.current = self.last_index();
        } else {
            return None;
        }
        self.current_track()
    }

    /// Flip repeat and return the new value.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// Shuffle the tracks after the current one using the thread RNG.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffle the tracks after the current one.
    ///
    /// Everything up to and including the current track keeps its place.
    /// With no current track the order is left alone and the first track
    /// becomes current. No-op when already shuffled or with fewer than two
    /// tracks.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shuffled || self.tracks.len() <= 1 {
            return;
        }

        if self.original_order.is_empty() {
            self.original_order = self.tracks.clone();
        }

        match self.current {
            Some(cur) => self.tracks[cur + 1..].shuffle(rng),
            None => self.current = self.first_index(),
        }
        self.shuffled = true;
    }

    /// Restore the pre-shuffle order.
    ///
    /// Tracks appended while shuffled follow the original order, in their
    /// current relative order, and join the baseline from now on. The
    /// current track keeps being current.
    pub fn unshuffle(&mut self) {
        if !self.shuffled {
            return;
        }

        let current_track = self.current_track().cloned();

        let new_tail: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| !self.original_order.iter().any(|o| o.matches(t)))
            .cloned()
            .collect();

        self.tracks = self.original_order.clone();
        self.tracks.extend(new_tail.iter().cloned());
        self.original_order.extend(new_tail);

        self.current = current_track
            .and_then(|ct| self.tracks.iter().position(|t| t.matches(&ct)))
            .or_else(|| self.first_index());
        self.shuffled = false;
    }

    /// Remove the track at 1-based `position`.
    ///
    /// When the current track is removed its successor becomes current, or
    /// the new last track if it had none. Out-of-range positions return
    /// `false` and change nothing.
    pub fn remove(&mut self, position: usize) -> bool {
        if position < 1 || position > self.tracks.len() {
            return false;
        }

        let idx = position - 1;
        let removed = self.tracks.remove(idx);
        let len = self.tracks.len();

        self.current = match self.current {
            _ if len == 0 => None,
            Some(cur) if cur == idx => Some(idx.min(len - 1)),
            Some(cur) if cur > idx => Some(cur - 1),
            other => other,
        };

        if let Some(pos) = self.original_order.iter().position(|t| t.matches(&removed)) {
            self.original_order.remove(pos);
        }
        true
    }

    /// Empty the queue, reset every flag and delete the saved state.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
        self.playing = false;
        self.repeat = false;
        self.shuffled = false;
        self.original_order.clear();

        if let Some(store) = &self.store {
            if let Err(e) = store.erase() {
                error!("failed to erase queue state: {e}");
            }
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// 0-based position of the current track.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn original_order(&self) -> &[Track] {
        &self.original_order
    }

    /// Tracks that will play after the current one. With repeat on, the
    /// list continues from the first track up to (not including) the current.
    pub fn up_next(&self) -> Vec<&Track> {
        match self.current {
            None => self.tracks.iter().collect(),
            Some(cur) => {
                let mut upcoming: Vec<&Track> = self.tracks.iter().skip(cur + 1).collect();
                if self.repeat {
                    upcoming.extend(self.tracks.iter().take(cur));
                }
                upcoming
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn total_seconds(&self) -> u64 {
        self.tracks.iter().map(Track::duration_seconds).sum()
    }

    pub fn total_duration(&self) -> String {
        format_duration(self.total_seconds())
    }

    fn first_index(&self) -> Option<usize> {
        if self.tracks.is_empty() { None } else { Some(0) }
    }

    fn last_index(&self) -> Option<usize> {
        self.tracks.len().checked_sub(1)
    }
}
