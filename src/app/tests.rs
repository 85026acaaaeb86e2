use super::*;
use crate::config::Settings;
use crate::storage::Storage;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn open(dir: &TempDir) -> App {
    App::with_storage(Storage::new(dir.path().join("data")), &Settings::default())
}

fn seeded(dir: &TempDir) -> App {
    let mut app = open(dir);
    for (title, duration) in [("One", "1:00"), ("Two", "2:00"), ("Three", "3:00")] {
        assert!(app.add_track(title, "Band", "Record", duration).is_done());
    }
    app
}

#[test]
fn add_track_validates_and_rejects_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&dir);

    let added = app.add_track(" Song ", "A, B", "Alb", "3:30");
    assert_eq!(added, Outcome::Done("Added Song - A, B (3:30)".into()));
    assert!(!app.add_track("Song", "A, B", "Alb", "3:30").is_done());
    assert!(!app.add_track("Other", "A", "Alb", "three minutes").is_done());
    assert!(!app.add_track("", "A", "Alb", "1:00").is_done());
    assert_eq!(app.library.len(), 1);
}

#[test]
fn state_survives_reopening_the_app() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut app = seeded(&dir);
        app.create_playlist("mix");
        app.add_to_playlist("mix", 2);
        app.enqueue(3);
        app.enqueue(1);
        app.toggle_repeat();
    }

    let app = open(&dir);
    assert_eq!(app.library.len(), 3);
    assert_eq!(app.library.albums().get("Record").unwrap().len(), 3);
    assert_eq!(app.playlists.get("mix").unwrap().len(), 1);
    assert!(app.queue_restored());
    let queued: Vec<&str> = app.queue.tracks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(queued, ["Three", "One"]);
    assert!(app.queue.is_repeat());
}

#[test]
fn playlist_operations_report_reasons() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = seeded(&dir);

    assert!(app.create_playlist("mix").is_done());
    assert!(app.create_playlist("mix").message().contains("already exists"));
    assert!(!app.create_playlist("  ").is_done());

    assert!(app.add_to_playlist("mix", 1).is_done());
    assert!(app.add_to_playlist("mix", 1).message().contains("already in"));
    assert!(app.add_to_playlist("mix", 9).message().contains("No track #9"));
    assert!(app.add_to_playlist("nope", 1).message().contains("No playlist"));
}

#[test]
fn queue_album_and_playlist_replace_the_queue() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = seeded(&dir);
    app.enqueue(2);

    assert!(app.queue_album("Record").is_done());
    assert_eq!(app.queue.len(), 3);
    assert_eq!(app.queue.current_index(), Some(0));
    assert!(!app.queue_album("Missing").is_done());

    app.create_playlist("mix");
    assert!(!app.queue_playlist("mix").is_done());
    app.add_to_playlist("mix", 3);
    assert!(app.queue_playlist("mix").is_done());
    assert_eq!(app.queue.len(), 1);
    assert_eq!(app.queue.current_track().unwrap().title, "Three");
}

#[test]
fn playback_controls_walk_the_queue() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = seeded(&dir);

    assert!(!app.play().is_done());
    app.queue_album("Record");

    assert_eq!(app.toggle_play(), Outcome::Done("Playing: One - Band (1:00)".into()));
    assert!(app.queue.is_playing());
    assert!(app.next().is_done());
    assert!(app.next().is_done());
    assert_eq!(
        app.next(),
        Outcome::Rejected("Reached the end of the queue".into())
    );
    assert!(!app.queue.is_playing());

    assert!(app.previous().is_done());
    assert_eq!(app.queue.current_track().unwrap().title, "Two");
    assert!(app.pause().message().contains("Nothing is playing"));

    assert_eq!(app.toggle_repeat(), Outcome::Done("Repeat on".into()));
    app.next();
    assert_eq!(app.next(), Outcome::Done("Now playing: One - Band (1:00)".into()));
}

#[test]
fn shuffle_toggles_and_needs_two_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = seeded(&dir);

    app.enqueue(1);
    assert!(!app.toggle_shuffle().is_done());

    app.queue_album("Record");
    assert_eq!(app.toggle_shuffle(), Outcome::Done("Shuffle on".into()));
    assert!(app.queue.is_shuffled());
    assert_eq!(app.queue.current_track().unwrap().title, "One");

    assert_eq!(app.toggle_shuffle(), Outcome::Done("Shuffle off".into()));
    let order: Vec<&str> = app.queue.tracks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(order, ["One", "Two", "Three"]);
}

#[test]
fn dequeue_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = seeded(&dir);
    app.queue_album("Record");

    assert!(!app.dequeue(0).is_done());
    assert!(!app.dequeue(4).is_done());
    assert_eq!(
        app.dequeue(1),
        Outcome::Done("Removed One - Band (1:00) from the queue".into())
    );
    assert_eq!(app.queue.current_track().unwrap().title, "Two");

    assert!(app.clear_queue().is_done());
    assert!(app.queue.is_empty());
    assert!(!dir.path().join("data").join("queue_state.json").exists());
}

#[test]
fn rejected_dequeue_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = seeded(&dir);
    let state_file = dir.path().join("data").join("queue_state.json");

    assert_eq!(
        app.dequeue(1),
        Outcome::Rejected("No track #1 in the queue".into())
    );
    assert!(!state_file.exists());

    app.queue_album("Record");
    app.next();
    assert_eq!(
        app.dequeue(4),
        Outcome::Rejected("No track #4 in the queue".into())
    );
    assert_eq!(app.queue.len(), 3);
    assert_eq!(app.queue.current_track().unwrap().title, "Two");

    app.clear_queue();
    assert!(!app.dequeue(1).is_done());
    assert!(!state_file.exists());
}

#[test]
fn imports_resolve_bare_names_in_import_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let tracks_dir = dir.path().join("incoming");
    fs::create_dir_all(&tracks_dir).unwrap();
    fs::write(
        tracks_dir.join("batch.csv"),
        "title,artist,album,duration\nOne,A,X,1:00\nTwo,B,X\n",
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.import.tracks_dir = tracks_dir.clone();
    let mut app = App::with_storage(Storage::new(dir.path().join("data")), &settings);

    let (pending, _) = app.pending_imports();
    assert_eq!(pending, [tracks_dir.join("batch.csv")]);

    let outcome = app.import_tracks(Path::new("batch.csv"));
    assert!(outcome.is_done());
    assert!(outcome.message().starts_with("Imported 1 tracks (0 duplicate, 1 skipped)"));
    assert!(outcome.message().contains("Missing required fields in row 2"));

    assert!(!app.import_tracks(Path::new("nope.json")).is_done());
    assert!(!app.import_playlists(Path::new("lists.txt")).is_done());
}
