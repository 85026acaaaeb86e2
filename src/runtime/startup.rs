use tracing::debug;

use crate::app::App;
use crate::config;

/// Apply configured playback defaults to a freshly opened `app`.
///
/// A restored queue keeps its own flags.
pub fn apply_playback_defaults(app: &mut App, settings: &config::Settings) {
    if app.queue_restored() {
        return;
    }
    app.queue.set_repeat(settings.playback.repeat);
    debug!("queue starts with repeat {}", settings.playback.repeat);
}
