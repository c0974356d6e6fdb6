//! Catalog traits consumed by the engine, plus in-memory implementations.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::types::{MediaFolder, PlaylistEntry, SourceEntry};

/// The library that owns game metadata and artwork (LaunchBox).
pub trait SourceCatalog {
    /// Media folders per platform, in configured order.
    fn platforms(&self) -> &BTreeMap<String, Vec<MediaFolder>>;

    /// The library entry whose application path is `path`.
    fn find_entry_by_path(&self, path: &Path) -> Option<SourceEntry>;
}

/// The frontend whose playlists receive thumbnails (RetroArch).
pub trait DestinationCatalog {
    /// Playlist names, sorted.
    fn playlist_names(&self) -> Result<Vec<String>, CatalogError>;

    /// Entries of one playlist, in file order.
    fn list_entries(&self, playlist: &str) -> Result<Vec<PlaylistEntry>, CatalogError>;

    /// Root of the thumbnail tree (`<root>/<playlist>/Named_*/`).
    fn thumbnails_dir(&self) -> &Path;
}

/// A [`SourceCatalog`] built in code.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceCatalog {
    platforms: BTreeMap<String, Vec<MediaFolder>>,
    entries: HashMap<PathBuf, SourceEntry>,
}

impl MemorySourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_media_folder(&mut self, platform: &str, folder: MediaFolder) -> &mut Self {
        self.platforms
            .entry(platform.to_string())
            .or_default()
            .push(folder);
        self
    }

    pub fn add_entry(&mut self, path: impl Into<PathBuf>, entry: SourceEntry) -> &mut Self {
        self.entries.insert(path.into(), entry);
        self
    }
}

impl SourceCatalog for MemorySourceCatalog {
    fn platforms(&self) -> &BTreeMap<String, Vec<MediaFolder>> {
        &self.platforms
    }

    fn find_entry_by_path(&self, path: &Path) -> Option<SourceEntry> {
        self.entries.get(path).cloned()
    }
}

/// A [`DestinationCatalog`] built in code.
#[derive(Debug, Clone)]
pub struct MemoryDestinationCatalog {
    thumbnails_dir: PathBuf,
    playlists: BTreeMap<String, Vec<PlaylistEntry>>,
}

impl MemoryDestinationCatalog {
    pub fn new(thumbnails_dir: impl Into<PathBuf>) -> Self {
        Self {
            thumbnails_dir: thumbnails_dir.into(),
            playlists: BTreeMap::new(),
        }
    }

    pub fn add_entry(&mut self, playlist: &str, entry: PlaylistEntry) -> &mut Self {
        self.playlists
            .entry(playlist.to_string())
            .or_default()
            .push(entry);
        self
    }
}

impl DestinationCatalog for MemoryDestinationCatalog {
    fn playlist_names(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.playlists.keys().cloned().collect())
    }

    fn list_entries(&self, playlist: &str) -> Result<Vec<PlaylistEntry>, CatalogError> {
        self.playlists
            .get(playlist)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("playlist '{playlist}'")))
    }

    fn thumbnails_dir(&self) -> &Path {
        &self.thumbnails_dir
    }
}
