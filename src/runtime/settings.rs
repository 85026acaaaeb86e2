use tracing::{debug, warn};

use crate::config::{self, Settings};

/// Load and validate settings, falling back to defaults on any problem.
pub fn load_settings() -> Settings {
    // Config is optional; failures should not keep the catalog from opening.
    let loaded = Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| {
            s.validate()
                .map(|()| s)
                .map_err(|msg| format!("invalid config: {msg}"))
        });

    match loaded {
        Ok(settings) => {
            debug!(
                "config from {:?}, data in {}",
                config::resolve_config_path(),
                settings.data_dir().display()
            );
            settings
        }
        Err(msg) => {
            warn!("{msg}; using defaults");
            Settings::default()
        }
    }
}
