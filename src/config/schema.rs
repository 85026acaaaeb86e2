use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub import: ImportSettings,
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `library.json`, `albums.json`, `playlists.json`
    /// and `queue_state.json`. Unset means the XDG data directory.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Where track batches are looked up by file name.
    pub tracks_dir: PathBuf,
    /// Where playlist batches are looked up by file name.
    pub playlists_dir: PathBuf,
    /// Batch file extensions to list (case-insensitive, without dot).
    /// Only `json` and `csv` are understood.
    pub extensions: Vec<String>,
    /// Whether to list hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            tracks_dir: PathBuf::from("import").join("tracks"),
            playlists_dir: PathBuf::from("import").join("playlists"),
            extensions: vec!["json".into(), "csv".into()],
            include_hidden: false,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether repeat starts enabled when there is no saved queue to restore.
    pub repeat: bool,
}
