//! One-shot commands parsed from the process arguments.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::{App, Outcome};
use crate::library::Track;
use crate::playlist::{Playlist, PlaylistOrder, SortCriterion};

#[derive(Debug, Parser)]
#[command(
    name = "cadenza",
    version,
    about = "A personal music catalog: library, albums, playlists and a play queue",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a track to the library
    Add {
        title: String,
        /// Artist names, comma separated
        artist: String,
        album: String,
        /// MM:SS or HH:MM:SS
        duration: String,
    },
    /// List every track, numbered
    List,
    /// Titles containing TEXT
    Search {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List every album
    Albums,
    /// Show the tracks of one album
    Album {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Import a .json or .csv track batch
    ImportTracks { file: PathBuf },
    /// Import a .json or .csv playlist batch
    ImportPlaylists { file: PathBuf },
    /// Batch files waiting in the import folders
    PendingImports,
    /// Create an empty playlist
    PlaylistCreate {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// List playlists
    Playlists {
        #[arg(value_enum, default_value = "date_created")]
        order: PlaylistOrder,
    },
    /// Show one playlist, by number or name, optionally re-sorting it
    Playlist {
        selector: String,
        #[arg(value_enum)]
        sort: Option<SortCriterion>,
    },
    /// Add a library track to a playlist
    PlaylistAdd {
        name: String,
        /// Library track number
        track: usize,
    },
    /// Show the queue
    Queue,
    /// Append a library track to the queue
    Enqueue {
        /// Library track number
        track: usize,
    },
    /// Replace the queue with an album
    QueueAlbum {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Replace the queue with a playlist
    QueuePlaylist {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    #[command(visible_alias = "previous")]
    Prev,
    /// Toggle repeat
    Repeat,
    /// Toggle shuffle
    Shuffle,
    /// Remove a track from the queue
    Dequeue {
        /// Queue position
        position: usize,
    },
    /// Empty the queue
    Clear,
}

/// Run `cmd` against `app`.
pub fn execute(app: &mut App, cmd: Command) -> Outcome {
    match cmd {
        Command::Add {
            title,
            artist,
            album,
            duration,
        } => app.add_track(&title, &artist, &album, &duration),
        Command::List => list_library(app),
        Command::Search { text } => search(app, &text.join(" ")),
        Command::Albums => list_albums(app),
        Command::Album { name } => show_album(app, &name.join(" ")),
        Command::ImportTracks { file } => app.import_tracks(&file),
        Command::ImportPlaylists { file } => app.import_playlists(&file),
        Command::PendingImports => pending_imports(app),
        Command::PlaylistCreate { name } => app.create_playlist(&name.join(" ")),
        Command::Playlists { order } => list_playlists(app, order),
        Command::Playlist { selector, sort } => show_playlist(app, &selector, sort),
        Command::PlaylistAdd { name, track } => app.add_to_playlist(&name, track),
        Command::Queue => show_queue(app),
        Command::Enqueue { track } => app.enqueue(track),
        Command::QueueAlbum { name } => app.queue_album(&name.join(" ")),
        Command::QueuePlaylist { name } => app.queue_playlist(&name.join(" ")),
        Command::Play => app.play(),
        Command::Pause => app.pause(),
        Command::Next => app.next(),
        Command::Prev => app.previous(),
        Command::Repeat => app.toggle_repeat(),
        Command::Shuffle => app.toggle_shuffle(),
        Command::Dequeue { position } => app.dequeue(position),
        Command::Clear => app.clear_queue(),
    }
}

fn numbered<'a>(tracks: impl IntoIterator<Item = (usize, &'a Track)>) -> String {
    let mut out = String::new();
    for (i, track) in tracks {
        let _ = writeln!(out, "{:>4}. {track}", i + 1);
    }
    out.trim_end().to_string()
}

fn list_library(app: &App) -> Outcome {
    if app.library.is_empty() {
        return Outcome::Done("The library is empty".into());
    }
    Outcome::Done(numbered(app.library.tracks().iter().enumerate()))
}

fn search(app: &App, query: &str) -> Outcome {
    let tracks = app.library.tracks();
    let hits: Vec<(usize, &Track)> = app
        .library
        .find_by_title_substring(query)
        .into_iter()
        .filter_map(|hit| tracks.iter().position(|t| t.matches(hit)).map(|i| (i, hit)))
        .collect();
    if hits.is_empty() {
        return Outcome::Rejected(format!("No titles contain {query:?}"));
    }
    Outcome::Done(numbered(hits))
}

fn list_albums(app: &App) -> Outcome {
    let albums = app.library.albums();
    if albums.is_empty() {
        return Outcome::Done("No albums yet".into());
    }
    let mut out = String::new();
    for (i, album) in albums.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}. {} ({} tracks, {})",
            i + 1,
            album.name(),
            album.len(),
            album.total_duration()
        );
    }
    Outcome::Done(out.trim_end().to_string())
}

fn show_album(app: &App, name: &str) -> Outcome {
    match app.library.albums().get(name) {
        Some(album) => Outcome::Done(format!(
            "{} ({})\n{}",
            album.name(),
            album.total_duration(),
            numbered(album.tracks().iter().enumerate())
        )),
        None => Outcome::Rejected(format!("No album named {name:?}")),
    }
}

fn pending_imports(app: &App) -> Outcome {
    let (tracks, playlists) = app.pending_imports();
    let mut out = String::new();
    for (label, files) in [("Track batches", tracks), ("Playlist batches", playlists)] {
        let _ = writeln!(out, "{label}:");
        if files.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for file in files {
            let _ = writeln!(out, "  {}", file.display());
        }
    }
    Outcome::Done(out.trim_end().to_string())
}

fn list_playlists(app: &App, order: PlaylistOrder) -> Outcome {
    if app.playlists.is_empty() {
        return Outcome::Done("No playlists yet".into());
    }
    let mut out = format!("Playlists by {order}:\n");
    for (i, playlist) in app.playlists.sorted_view(order).into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}. {} ({} tracks, {}, created {})",
            i + 1,
            playlist.name(),
            playlist.len(),
            playlist.total_duration(),
            playlist.created_at().format("%Y-%m-%d %H:%M")
        );
    }
    Outcome::Done(out.trim_end().to_string())
}

fn find_playlist<'a>(app: &'a App, selector: &str) -> Option<&'a Playlist> {
    app.playlists.get(selector).or_else(|| {
        selector
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| app.playlists.fetch_at(i))
    })
}

fn show_playlist(app: &mut App, selector: &str, sort: Option<SortCriterion>) -> Outcome {
    let Some(name) = find_playlist(app, selector).map(|p| p.name().to_string()) else {
        return Outcome::Rejected(format!("No playlist {selector:?}"));
    };
    if let Some(criterion) = sort {
        app.playlists.reorder(&name, criterion);
    }
    let Some(playlist) = app.playlists.get(&name) else {
        return Outcome::Rejected(format!("No playlist {selector:?}"));
    };

    let mut out = format!("{} ({})\n", playlist.name(), playlist.total_duration());
    if playlist.is_empty() {
        out.push_str("  (empty)");
    }
    for (i, entry) in playlist.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}. {} [added {}]",
            i + 1,
            entry.track,
            entry.added_at.format("%Y-%m-%d %H:%M")
        );
    }
    Outcome::Done(out.trim_end().to_string())
}

fn show_queue(app: &App) -> Outcome {
    let queue = &app.queue;
    if queue.is_empty() {
        return Outcome::Done("The queue is empty".into());
    }

    let flag = |on: bool| if on { "on" } else { "off" };
    let mut out = format!(
        "{} | repeat {} | shuffle {} | {} tracks, {}\n",
        if queue.is_playing() { "playing" } else { "paused" },
        flag(queue.is_repeat()),
        flag(queue.is_shuffled()),
        queue.len(),
        queue.total_duration()
    );
    for (i, track) in queue.tracks().iter().enumerate() {
        let marker = if queue.current_index() == Some(i) { ">" } else { " " };
        let _ = writeln!(out, "{marker}{:>3}. {track}", i + 1);
    }
    Outcome::Done(out.trim_end().to_string())
}
