use std::{env, path::PathBuf};

use crate::import::BatchFormat;

use super::schema::Settings;

const APP_DIR: &str = "cadenza";

/// `Settings::load` layers environment variables (prefix `CADENZA__`) over an
/// optional config file over struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENZA")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.import.extensions.is_empty() {
            return Err("import.extensions must not be empty".to_string());
        }
        if let Some(ext) = self
            .import
            .extensions
            .iter()
            .find(|e| BatchFormat::from_extension(e).is_none())
        {
            return Err(format!(
                "import.extensions: unsupported format {ext:?} (use json or csv)"
            ));
        }
        Ok(())
    }

    /// The data directory: `storage.data_dir` when set, else the XDG default,
    /// else `./data`.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}

/// Resolve the config path from `CADENZA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("CADENZA_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/cadenza/config.toml`, or `~/.config/cadenza/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/cadenza`, or `~/.local/share/cadenza` when
/// `XDG_DATA_HOME` is not set.
pub fn default_data_dir() -> Option<PathBuf> {
    xdg_home("XDG_DATA_HOME", &[".local", "share"]).map(|d| d.join(APP_DIR))
}

/// The XDG base directory in `var`, else `$HOME` joined with `fallback`.
fn xdg_home(var: &str, fallback: &[&str]) -> Option<PathBuf> {
    env::var_os(var).map(PathBuf::from).or_else(|| {
        env::var_os("HOME").map(|home| fallback.iter().fold(PathBuf::from(home), |p, part| p.join(part)))
    })
}
