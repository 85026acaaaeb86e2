//! A personal music catalog: a duplicate-free track library grouped into
//! albums, named playlists, and a play queue with shuffle and repeat.
//! Every collection persists as JSON under one data directory.

pub mod app;
pub mod config;
pub mod duration;
pub mod error;
pub mod import;
pub mod library;
pub mod playlist;
pub mod queue;
pub mod runtime;
pub mod storage;

pub use error::{CatalogError, Result};
