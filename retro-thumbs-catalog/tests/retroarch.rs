use std::fs;
use std::path::{Path, PathBuf};

use retro_thumbs_catalog::{DestinationCatalog, RetroArchCatalog};
use tempfile::TempDir;

fn setup(root: &Path) {
    fs::create_dir_all(root.join("playlists")).unwrap();
    fs::create_dir_all(root.join("thumbs")).unwrap();
    fs::write(
        root.join("retroarch.cfg"),
        format!(
            "playlist_directory = \":/playlists\"\nthumbnails_directory = \"{}\"\n",
            root.join("thumbs").display()
        ),
    )
    .unwrap();
    fs::write(
        root.join("playlists").join("Sega - Mega Drive - Genesis.lpl"),
        r#"{"version":"1.5","items":[{"path":"/roms/md/Sonic.md","label":"Sonic the Hedgehog (USA, Europe)"}]}"#,
    )
    .unwrap();
    fs::write(
        root.join("playlists").join("Nintendo - Nintendo 64.lpl"),
        r#"{"items":[]}"#,
    )
    .unwrap();
    fs::write(root.join("playlists").join("notes.txt"), "not a playlist").unwrap();
    fs::create_dir_all(root.join("playlists").join("logs")).unwrap();
}

#[test]
fn test_opens_through_config() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let catalog = RetroArchCatalog::open(tmp.path()).unwrap();
    assert_eq!(catalog.playlists_dir(), tmp.path().join("playlists"));
    assert_eq!(catalog.thumbnails_dir(), tmp.path().join("thumbs"));
}

#[test]
fn test_playlists_are_sorted_top_level_lpl_files() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let catalog = RetroArchCatalog::open(tmp.path()).unwrap();
    assert_eq!(
        catalog.playlist_names().unwrap(),
        vec!["Nintendo - Nintendo 64", "Sega - Mega Drive - Genesis"]
    );
}

#[test]
fn test_playlist_entries_are_read() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let catalog = RetroArchCatalog::open(tmp.path()).unwrap();
    let entries = catalog.list_entries("Sega - Mega Drive - Genesis").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, PathBuf::from("/roms/md/Sonic.md"));
    assert_eq!(entries[0].label, "Sonic the Hedgehog (USA, Europe)");
    assert!(catalog.list_entries("Nintendo - Nintendo 64").unwrap().is_empty());
}

#[test]
fn test_invalid_playlist_is_an_error() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    fs::write(tmp.path().join("playlists").join("Broken.lpl"), "not json").unwrap();
    let catalog = RetroArchCatalog::open(tmp.path()).unwrap();
    assert!(catalog.list_entries("Broken").is_err());
}

#[test]
fn test_missing_thumbnail_dir_is_not_found() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    fs::remove_dir_all(tmp.path().join("thumbs")).unwrap();
    let err = RetroArchCatalog::open(tmp.path()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_missing_config_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = RetroArchCatalog::open(tmp.path()).unwrap_err();
    assert!(err.is_not_found());
}
