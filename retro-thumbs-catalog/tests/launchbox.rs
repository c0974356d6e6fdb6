use std::fs;
use std::path::Path;

use retro_thumbs_catalog::{LaunchBoxCatalog, SourceCatalog};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup(root: &Path) {
    let images = root.join("Images").join("Nintendo 64");
    write(
        &root.join("Data").join("Platforms.xml"),
        &format!(
            r#"<?xml version="1.0" standalone="yes"?>
<LaunchBox>
  <Platform><Name>Nintendo 64</Name></Platform>
  <PlatformFolder>
    <MediaType>Box - Front</MediaType>
    <FolderPath>{front}</FolderPath>
    <Platform>Nintendo 64</Platform>
  </PlatformFolder>
  <PlatformFolder>
    <MediaType>Screenshot - Gameplay</MediaType>
    <FolderPath>Images\Nintendo 64\Screenshot - Gameplay</FolderPath>
    <Platform>Nintendo 64</Platform>
  </PlatformFolder>
</LaunchBox>"#,
            front = images.join("Box - Front").display()
        ),
    );
    write(
        &root.join("Data").join("Platforms").join("Nintendo 64.xml"),
        r#"<?xml version="1.0" standalone="yes"?>
<LaunchBox>
  <Game>
    <ApplicationPath>/roms/n64/Paper Mario (USA).z64</ApplicationPath>
    <ID>game-1</ID>
    <Platform>Nintendo 64</Platform>
    <Title>Paper Mario</Title>
    <Region>North America</Region>
  </Game>
  <Game>
    <ApplicationPath>..\roms\n64\Wave Race 64.z64</ApplicationPath>
    <ID>game-2</ID>
    <Platform>Nintendo 64</Platform>
    <Title>Wave Race 64</Title>
  </Game>
  <AdditionalApplication>
    <GameID>game-1</GameID>
    <ApplicationPath>/roms/n64/Mario Story (Japan).z64</ApplicationPath>
    <Region>Japan</Region>
  </AdditionalApplication>
  <AdditionalApplication>
    <GameID>missing</GameID>
    <ApplicationPath>/roms/n64/Orphan.z64</ApplicationPath>
  </AdditionalApplication>
</LaunchBox>"#,
    );
}

#[test]
fn test_media_folders_grouped_by_platform() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let catalog = LaunchBoxCatalog::open(tmp.path()).unwrap();

    let folders = &catalog.platforms()["Nintendo 64"];
    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].media_type, "Box - Front");
    assert_eq!(folders[1].media_type, "Screenshot - Gameplay");
    // Relative folder paths are taken from the LaunchBox root
    assert!(folders[1].dir.starts_with(tmp.path()));
}

#[test]
fn test_game_found_by_application_path() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let catalog = LaunchBoxCatalog::open(tmp.path()).unwrap();

    let entry = catalog
        .find_entry_by_path(Path::new("/roms/n64/Paper Mario (USA).z64"))
        .unwrap();
    assert_eq!(entry.title, "Paper Mario");
    assert_eq!(entry.platform, "Nintendo 64");
    assert_eq!(entry.region.as_deref(), Some("North America"));
    assert_eq!(entry.alternate_of, None);
}

#[test]
fn test_additional_application_resolves_to_parent_title() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let catalog = LaunchBoxCatalog::open(tmp.path()).unwrap();

    let entry = catalog
        .find_entry_by_path(Path::new("/roms/n64/Mario Story (Japan).z64"))
        .unwrap();
    assert_eq!(entry.title, "Paper Mario");
    assert_eq!(entry.region.as_deref(), Some("Japan"));
    assert_eq!(entry.alternate_of.as_deref(), Some("game-1"));

    assert!(catalog
        .find_entry_by_path(Path::new("/roms/n64/Orphan.z64"))
        .is_none());
}

#[test]
fn test_relative_application_paths_are_resolved() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("LaunchBox");
    setup(&root);
    let catalog = LaunchBoxCatalog::open(&root).unwrap();

    let game = tmp.path().join("roms").join("n64").join("Wave Race 64.z64");
    let entry = catalog.find_entry_by_path(&game).unwrap();
    assert_eq!(entry.title, "Wave Race 64");
    assert_eq!(entry.region, None);
    assert_eq!(catalog.entry_count(), 3);
}

#[test]
fn test_missing_platforms_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = LaunchBoxCatalog::open(tmp.path()).unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[test]
fn test_root_may_point_at_executable() {
    let tmp = TempDir::new().unwrap();
    setup(tmp.path());
    let exe = tmp.path().join("LaunchBox.exe");
    fs::write(&exe, b"").unwrap();
    let catalog = LaunchBoxCatalog::open(&exe).unwrap();
    assert_eq!(catalog.root(), tmp.path());
}
