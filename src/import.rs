//! Structured record batches: JSON and CSV files of tracks or playlists.
//!
//! Readers here only turn a file into per-record results. Merging those
//! records into the library or the playlist collection, and counting
//! imported/duplicate/skipped entries, happens in the owning container.

mod scan;

pub use scan::list_batches;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{CatalogError, Result};
use crate::library::{Artist, Track};

const TRACK_FIELDS: [&str; 4] = ["title", "artist", "album", "duration"];

/// A recognized batch file format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BatchFormat {
    Json,
    Csv,
}

impl BatchFormat {
    /// Case-insensitive lookup by extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// Outcome of one batch import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records added.
    pub imported: usize,
    /// Records rejected because they were already present.
    pub duplicates: usize,
    /// Records skipped because they were malformed.
    pub skipped: usize,
    /// One message per skipped record.
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Count a skipped record and keep its reason.
    pub fn record_error(&mut self, msg: impl Into<String>) {
        self.skipped += 1;
        self.errors.push(msg.into());
    }
}

/// Per-record result: the parsed record or a user-facing reason.
pub type RecordResult<T> = std::result::Result<T, String>;

/// A playlist as read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRecord {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Read a track batch: one result per record, in file order.
pub fn read_track_batch(path: &Path) -> Result<Vec<RecordResult<Track>>> {
    match detect(path)? {
        BatchFormat::Json => {
            let entries = read_json_array(path)?;
            Ok(entries
                .iter()
                .enumerate()
                .map(|(i, v)| track_from_json(v, &format!("track {}", i + 1)))
                .collect())
        }
        BatchFormat::Csv => {
            let mut reader = csv_reader(path)?;
            let headers = csv_headers(&mut reader, path)?;
            let mut out = Vec::new();
            for (i, row) in reader.records().enumerate() {
                let n = i + 1;
                out.push(match row {
                    Ok(row) => track_from_csv(&headers, &row, n),
                    Err(e) => Err(format!("Error with row {n}: {e}")),
                });
            }
            Ok(out)
        }
    }
}

/// Read a playlist batch.
///
/// JSON files hold `[{name, tracks: [...]}]`. CSV rows carry
/// `name,title,artist,album,duration` and are grouped by name in order of
/// first appearance; each bad row becomes its own error entry.
pub fn read_playlist_batch(path: &Path) -> Result<Vec<RecordResult<PlaylistRecord>>> {
    match detect(path)? {
        BatchFormat::Json => {
            let entries = read_json_array(path)?;
            Ok(entries
                .iter()
                .enumerate()
                .map(|(i, v)| playlist_from_json(v, i + 1))
                .collect())
        }
        BatchFormat::Csv => {
            let mut reader = csv_reader(path)?;
            let headers = csv_headers(&mut reader, path)?;

            let mut out: Vec<RecordResult<PlaylistRecord>> = Vec::new();
            let mut slots: HashMap<String, usize> = HashMap::new();

            for (i, row) in reader.records().enumerate() {
                let n = i + 1;
                let parsed = match row {
                    Ok(row) => playlist_row_from_csv(&headers, &row, n),
                    Err(e) => Err(format!("Error with row {n}: {e}")),
                };
                match parsed {
                    Ok((name, track)) => match slots.get(&name) {
                        Some(&slot) => {
                            if let Some(Ok(record)) = out.get_mut(slot) {
                                record.tracks.push(track);
                            }
                        }
                        None => {
                            slots.insert(name.clone(), out.len());
                            out.push(Ok(PlaylistRecord {
                                name,
                                tracks: vec![track],
                            }));
                        }
                    },
                    Err(msg) => out.push(Err(msg)),
                }
            }
            Ok(out)
        }
    }
}

/// Resolve the format before touching the file, then make sure it exists.
fn detect(path: &Path) -> Result<BatchFormat> {
    let format = BatchFormat::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
    if !path.is_file() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    Ok(format)
}

fn read_json_array(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn track_from_json(value: &Value, label: &str) -> RecordResult<Track> {
    let Some(obj) = value.as_object() else {
        return Err(format!("Error with {label}: expected an object"));
    };
    if !TRACK_FIELDS.iter().all(|k| obj.contains_key(*k)) {
        return Err(format!("Missing required fields in {label}"));
    }

    let artist: Artist = obj
        .get("artist")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| {
            format!("Error with {label}: `artist` must be a string or a list of strings")
        })?;

    Ok(Track::new(
        json_text(obj, "title", label)?,
        artist,
        json_text(obj, "album", label)?,
        json_text(obj, "duration", label)?,
    ))
}

fn json_text(obj: &Map<String, Value>, key: &str, label: &str) -> RecordResult<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("Error with {label}: `{key}` must be a string"))
}

fn playlist_from_json(value: &Value, n: usize) -> RecordResult<PlaylistRecord> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing playlist name in entry {n}"))?
        .to_string();

    let tracks = match value.get("tracks") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| track_from_json(v, &format!("track {} of playlist {name:?}", i + 1)))
            .collect::<RecordResult<Vec<_>>>()?,
        Some(_) => return Err(format!("Error with playlist {name:?}: `tracks` must be a list")),
    };

    Ok(PlaylistRecord { name, tracks })
}

fn csv_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn csv_headers(reader: &mut csv::Reader<fs::File>, path: &Path) -> Result<csv::StringRecord> {
    reader
        .headers()
        .cloned()
        .map_err(|source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn csv_field<'r>(
    headers: &csv::StringRecord,
    row: &'r csv::StringRecord,
    name: &str,
) -> Option<&'r str> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .and_then(|idx| row.get(idx))
}

/// Split a CSV artist cell on commas, unless the value is itself quoted.
fn csv_artist(raw: &str) -> Artist {
    let raw = raw.trim();
    if raw.contains(',') && !raw.starts_with('"') {
        Artist::parse(raw)
    } else {
        Artist::Single(raw.to_string())
    }
}

fn track_from_csv(
    headers: &csv::StringRecord,
    row: &csv::StringRecord,
    n: usize,
) -> RecordResult<Track> {
    let fields: Option<Vec<&str>> = TRACK_FIELDS
        .iter()
        .map(|f| csv_field(headers, row, f))
        .collect();
    let Some([title, artist, album, duration]) = fields.as_deref() else {
        return Err(format!("Missing required fields in row {n}"));
    };

    Ok(Track::new(
        title.trim(),
        csv_artist(artist),
        album.trim(),
        duration.trim(),
    ))
}

fn playlist_row_from_csv(
    headers: &csv::StringRecord,
    row: &csv::StringRecord,
    n: usize,
) -> RecordResult<(String, Track)> {
    let name = csv_field(headers, row, "name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing playlist name in row {n}"))?;
    let track = track_from_csv(headers, row, n)?;
    Ok((name.to_string(), track))
}
