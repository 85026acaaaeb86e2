use std::fmt;

use serde::{Deserialize, Serialize};

use crate::duration::parse_duration;

/// The artist field of a track: one name, or an ordered list of names.
///
/// Persists as either a JSON string or a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artist {
    Single(String),
    Multiple(Vec<String>),
}

impl Artist {
    /// Split a free-form artist field on commas.
    ///
    /// A value without a comma stays a single (trimmed) name.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(',') {
            Artist::Multiple(raw.split(',').map(|a| a.trim().to_string()).collect())
        } else {
            Artist::Single(raw.trim().to_string())
        }
    }

    /// The first listed artist, or the single name.
    pub fn primary(&self) -> &str {
        match self {
            Artist::Single(name) => name,
            Artist::Multiple(names) => names.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Canonical form used for identity comparisons.
    ///
    /// A single name is itself; a list renders as `['A', 'B']`, so a list and
    /// a single name only compare equal when the single name spells that list.
    pub fn canonical(&self) -> String {
        match self {
            Artist::Single(name) => name.clone(),
            Artist::Multiple(names) => {
                let quoted: Vec<String> = names.iter().map(|n| quote(n)).collect();
                format!("[{}]", quoted.join(", "))
            }
        }
    }
}

fn quote(name: &str) -> String {
    if name.contains('\'') && !name.contains('"') {
        format!("\"{}\"", name.replace('\\', "\\\\"))
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artist::Single(name) => f.write_str(name),
            Artist::Multiple(names) => f.write_str(&names.join(", ")),
        }
    }
}

impl From<&str> for Artist {
    fn from(name: &str) -> Self {
        Artist::Single(name.to_string())
    }
}

/// A catalog entry. Identity is value-based: see [`Track::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: Artist,
    pub album: String,
    /// `MM:SS` or `HH:MM:SS`.
    pub duration: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<Artist>,
        album: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration: duration.into(),
        }
    }

    /// Catalog identity: title, canonical artist, album and duration text all equal.
    pub fn matches(&self, other: &Track) -> bool {
        self.title == other.title
            && self.album == other.album
            && self.duration == other.duration
            && self.artist.canonical() == other.artist.canonical()
    }

    /// Looser identity used when restoring album snapshots: duration is ignored.
    pub(crate) fn same_recording(&self, other: &Track) -> bool {
        self.title == other.title
            && self.album == other.album
            && self.artist.canonical() == other.artist.canonical()
    }

    pub fn primary_artist(&self) -> &str {
        self.artist.primary()
    }

    pub fn duration_seconds(&self) -> u64 {
        parse_duration(&self.duration)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.title, self.artist, self.duration)
    }
}
