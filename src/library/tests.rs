use super::*;
use crate::storage::Storage;
use std::fs;

fn t(title: &str, album: &str) -> Track {
    Track::new(title, "Artist", album, "3:00")
}

#[test]
fn matches_requires_every_field() {
    let a = Track::new("Song", "X", "Alb", "3:00");
    assert!(a.matches(&Track::new("Song", "X", "Alb", "3:00")));
    assert!(!a.matches(&Track::new("Song", "X", "Alb", "3:01")));
    assert!(!a.matches(&Track::new("Song", "X", "Other", "3:00")));
    assert!(!a.matches(&Track::new("song", "X", "Alb", "3:00")));
}

#[test]
fn list_artist_never_matches_plain_joined_name() {
    let list = Track::new("Song", Artist::parse("A, B"), "Alb", "3:00");
    let joined = Track::new("Song", "A, B", "Alb", "3:00");
    assert!(!list.matches(&joined));

    let same_list = Track::new("Song", Artist::Multiple(vec!["A".into(), "B".into()]), "Alb", "3:00");
    assert!(list.matches(&same_list));
}

#[test]
fn artist_parse_and_display() {
    assert_eq!(Artist::parse("  Solo "), Artist::Single("Solo".into()));
    let multi = Artist::parse("A , B,C");
    assert_eq!(multi, Artist::Multiple(vec!["A".into(), "B".into(), "C".into()]));
    assert_eq!(multi.primary(), "A");
    assert_eq!(multi.to_string(), "A, B, C");
    assert_eq!(multi.canonical(), "['A', 'B', 'C']");
    assert_eq!(Artist::Multiple(vec!["O'Neil".into()]).canonical(), "[\"O'Neil\"]");
}

#[test]
fn artist_serializes_as_string_or_list() {
    let single = serde_json::to_string(&Artist::from("Solo")).unwrap();
    assert_eq!(single, "\"Solo\"");
    let multi: Artist = serde_json::from_str("[\"A\",\"B\"]").unwrap();
    assert_eq!(multi, Artist::Multiple(vec!["A".into(), "B".into()]));
}

#[test]
fn track_display_and_seconds() {
    let track = Track::new("Song", Artist::parse("A, B"), "Alb", "1:02:03");
    assert_eq!(track.to_string(), "Song - A, B (1:02:03)");
    assert_eq!(track.duration_seconds(), 3723);
    assert_eq!(Track::new("x", "y", "z", "bogus").duration_seconds(), 0);
}

#[test]
fn insert_rejects_duplicates_and_files_albums() {
    let mut lib = Library::new();
    assert!(lib.insert_track(t("One", "First")));
    assert!(lib.insert_track(t("Two", "First")));
    assert!(lib.insert_track(t("Three", "Second")));
    assert!(!lib.insert_track(t("One", "First")));

    assert_eq!(lib.len(), 3);
    assert_eq!(lib.albums().names(), ["First", "Second"]);
    assert_eq!(lib.albums().get("First").unwrap().len(), 2);
    assert_eq!(lib.albums().get("First").unwrap().total_duration(), "6 min 0 sec");
}

#[test]
fn same_title_on_another_album_is_a_new_track() {
    let mut lib = Library::new();
    assert!(lib.insert_track(t("Song", "Studio")));
    assert!(lib.insert_track(t("Song", "Live")));
    assert_eq!(lib.len(), 2);
}

#[test]
fn search_is_case_insensitive_substring_in_order() {
    let mut lib = Library::new();
    lib.insert_track(t("Hello World", "A"));
    lib.insert_track(t("Goodbye", "A"));
    lib.insert_track(t("Say HELLO", "A"));

    let hits: Vec<&str> = lib
        .find_by_title_substring("hello")
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(hits, ["Hello World", "Say HELLO"]);
    assert!(lib.find_by_title_substring("zzz").is_empty());
    assert_eq!(lib.fetch_at(1).unwrap().title, "Goodbye");
    assert!(lib.fetch_at(3).is_none());
}

#[test]
fn album_rejects_foreign_and_duplicate_tracks() {
    let mut album = Album::new("Alb");
    assert!(album.append(t("One", "Alb")));
    assert!(!album.append(t("One", "Alb")));
    assert!(!album.append(t("Two", "Other")));
    assert_eq!(album.len(), 1);
}

#[test]
fn album_collection_get_or_create_is_idempotent() {
    let mut albums = AlbumCollection::new();
    albums.get_or_create("X");
    albums.get_or_create("Y");
    albums.get_or_create("X");
    assert_eq!(albums.len(), 2);
    assert_eq!(albums.album_at(1).unwrap().name(), "Y");
    assert!(albums.get("Z").is_none());
}

#[test]
fn library_and_albums_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    let mut lib = Library::open(&storage);
    assert!(lib.is_empty());
    lib.insert_track(t("One", "First"));
    lib.insert_track(Track::new("Two", Artist::parse("A, B"), "Second", "4:10"));
    assert!(storage.library().exists());
    assert!(storage.albums().exists());

    let reopened = Library::open(&storage);
    assert_eq!(reopened.tracks(), lib.tracks());
    assert_eq!(reopened.albums().names(), ["First", "Second"]);
    assert_eq!(
        reopened.albums().get("Second").unwrap().tracks()[0].artist,
        Artist::Multiple(vec!["A".into(), "B".into()])
    );
}

#[test]
fn albums_are_rebuilt_when_album_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    let mut lib = Library::open(&storage);
    lib.insert_track(t("One", "First"));
    fs::remove_file(storage.albums().path()).unwrap();

    let reopened = Library::open(&storage);
    assert_eq!(reopened.albums().get("First").unwrap().len(), 1);
    assert!(storage.albums().exists());
}

#[test]
fn album_entries_without_library_track_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    storage.library().save(&vec![t("Kept", "Alb")]).unwrap();
    let mut ghost = Album::new("Alb");
    ghost.append(t("Kept", "Alb"));
    ghost.append(t("Ghost", "Alb"));
    storage.albums().save(&vec![ghost]).unwrap();

    let lib = Library::open(&storage);
    let titles: Vec<&str> = lib
        .albums()
        .get("Alb")
        .unwrap()
        .tracks()
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, ["Kept"]);
}

#[test]
fn corrupt_library_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());
    fs::write(storage.library().path(), "[{ nope").unwrap();

    let lib = Library::open(&storage);
    assert!(lib.is_empty());
}

#[test]
fn import_tracks_counts_new_duplicate_and_bad_records() {
    let dir = tempfile::tempdir().unwrap();
    let batch = dir.path().join("batch.json");
    fs::write(
        &batch,
        r#"[
            {"title": "One", "artist": "X", "album": "A", "duration": "3:00"},
            {"title": "One", "artist": "X", "album": "A", "duration": "3:00"},
            {"title": "Two", "artist": ["X", "Y"], "album": "A", "duration": "2:30"},
            {"title": "Broken", "artist": "X"}
        ]"#,
    )
    .unwrap();

    let mut lib = Library::new();
    let report = lib.import_tracks(&batch).unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, ["Missing required fields in track 4"]);
    assert_eq!(lib.albums().get("A").unwrap().len(), 2);
}

#[test]
fn import_tracks_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let batch = dir.path().join("batch.xml");
    fs::write(&batch, "<tracks/>").unwrap();

    let mut lib = Library::new();
    assert!(matches!(
        lib.import_tracks(&batch),
        Err(crate::error::CatalogError::UnsupportedFormat(_))
    ));
}
