//! Application module: the session state object driven by the binary.
//!
//! The `App` model lives in `app::model` and owns the library, playlists and
//! queue opened from one data directory.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
