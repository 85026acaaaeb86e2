//! On-disk JSON collections.
//!
//! Each container persists as one JSON document under the data directory.
//! Reads degrade silently (a missing or corrupt file means "no prior state"),
//! writes go through a temporary sibling file that is renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

const LIBRARY_FILE: &str = "library.json";
const ALBUMS_FILE: &str = "albums.json";
const PLAYLISTS_FILE: &str = "playlists.json";
const QUEUE_FILE: &str = "queue_state.json";

/// The data directory holding every persisted collection.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn library(&self) -> JsonFile {
        JsonFile::new(self.dir.join(LIBRARY_FILE))
    }

    pub fn albums(&self) -> JsonFile {
        JsonFile::new(self.dir.join(ALBUMS_FILE))
    }

    pub fn playlists(&self) -> JsonFile {
        JsonFile::new(self.dir.join(PLAYLISTS_FILE))
    }

    pub fn queue(&self) -> JsonFile {
        JsonFile::new(self.dir.join(QUEUE_FILE))
    }
}

/// A single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and decode the document.
    ///
    /// Returns `None` when the file is missing, unreadable or malformed.
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("failed to read {}, starting empty: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("failed to parse {}, starting empty: {e}", self.path.display());
                None
            }
        }
    }

    /// Encode `value` and replace the document with it.
    pub fn save<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let text = serde_json::to_string_pretty(value).map_err(|source| CatalogError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;

        debug!("wrote {}", self.path.display());
        Ok(())
    }

    /// Remove the document. A file that is already gone is not an error.
    pub fn erase(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("erased {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CatalogError {
        CatalogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Persist `value` to `store` if one is attached, logging failures.
pub(crate) fn persist<T: Serialize + ?Sized>(store: Option<&JsonFile>, what: &str, value: &T) {
    if let Some(store) = store {
        if let Err(e) = store.save(value) {
            tracing::error!("failed to save {what}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_of_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("nope.json"));
        assert_eq!(file.load::<Vec<String>>(), None);
    }

    #[test]
    fn load_of_corrupt_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(JsonFile::new(path).load::<Vec<String>>(), None);
    }

    #[test]
    fn save_creates_parent_dirs_and_load_reads_back() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("nested").join("data"));
        let file = storage.library();

        file.save(&vec!["a".to_string(), "b".to_string()]).unwrap();
        assert!(file.exists());
        assert_eq!(
            file.load::<Vec<String>>(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(!file.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn erase_removes_file_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let file = Storage::new(dir.path()).queue();
        file.save(&1u32).unwrap();
        file.erase().unwrap();
        assert!(!file.exists());
        file.erase().unwrap();
    }
}
