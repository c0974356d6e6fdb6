//! RetroArch configuration and playlists.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CatalogError;
use crate::provider::DestinationCatalog;
use crate::types::PlaylistEntry;

const CONFIG_FILE: &str = "retroarch.cfg";
const PLAYLIST_EXTENSION: &str = "lpl";

/// A RetroArch installation's playlist and thumbnail folders.
#[derive(Debug, Clone)]
pub struct RetroArchCatalog {
    root: PathBuf,
    playlists_dir: PathBuf,
    thumbnails_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    #[serde(default)]
    path: String,
    #[serde(default)]
    label: String,
}

impl RetroArchCatalog {
    /// Locate the playlist and thumbnail folders through `retroarch.cfg`.
    ///
    /// `root` may also point at a file inside the installation folder.
    pub fn open(root: &Path) -> Result<Self, CatalogError> {
        let root = if root.is_file() {
            root.parent().unwrap_or(root).to_path_buf()
        } else {
            root.to_path_buf()
        };
        let config_path = root.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(CatalogError::not_found(format!(
                "RetroArch config {}",
                config_path.display()
            )));
        }
        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| CatalogError::io(&config_path, e))?;
        let config = parse_config(&contents);

        let playlists_dir = setting_dir(&config, "playlist_directory", &root)?;
        let thumbnails_dir = setting_dir(&config, "thumbnails_directory", &root)?;
        log::debug!("RetroArch playlists: {}", playlists_dir.display());
        log::debug!("RetroArch thumbnails: {}", thumbnails_dir.display());

        Ok(Self {
            root,
            playlists_dir,
            thumbnails_dir,
        })
    }

    /// Use explicit folders, bypassing `retroarch.cfg`.
    pub fn with_dirs(playlists_dir: PathBuf, thumbnails_dir: PathBuf) -> Self {
        Self {
            root: playlists_dir.parent().unwrap_or(&playlists_dir).to_path_buf(),
            playlists_dir,
            thumbnails_dir,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn playlists_dir(&self) -> &Path {
        &self.playlists_dir
    }

    fn playlist_path(&self, name: &str) -> PathBuf {
        self.playlists_dir
            .join(format!("{name}.{PLAYLIST_EXTENSION}"))
    }
}

impl DestinationCatalog for RetroArchCatalog {
    fn playlist_names(&self) -> Result<Vec<String>, CatalogError> {
        let mut names: Vec<String> = std::fs::read_dir(&self.playlists_dir)
            .map_err(|e| CatalogError::io(&self.playlists_dir, e))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().is_some_and(|ext| ext == PLAYLIST_EXTENSION))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }

    fn list_entries(&self, playlist: &str) -> Result<Vec<PlaylistEntry>, CatalogError> {
        let path = self.playlist_path(playlist);
        let contents = std::fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        parse_playlist(&contents).map_err(|source| CatalogError::Playlist {
            path: path.display().to_string(),
            source,
        })
    }

    fn thumbnails_dir(&self) -> &Path {
        &self.thumbnails_dir
    }
}

/// Parse a JSON playlist. Items without a path are dropped.
pub fn parse_playlist(contents: &str) -> Result<Vec<PlaylistEntry>, serde_json::Error> {
    let file: PlaylistFile = serde_json::from_str(contents)?;
    Ok(file
        .items
        .into_iter()
        .filter(|item| !item.path.is_empty())
        .map(|item| PlaylistEntry::new(item.path, item.label))
        .collect())
}

/// Parse `key = "value"` lines. Comments and malformed lines are skipped.
pub fn parse_config(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Turn a directory setting into a path. Values starting with `:` are
/// relative to the RetroArch folder.
pub fn resolve_setting(value: &str, root: &Path) -> PathBuf {
    match value.strip_prefix(':') {
        Some(rest) => root.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(value),
    }
}

fn setting_dir(
    config: &HashMap<String, String>,
    key: &str,
    root: &Path,
) -> Result<PathBuf, CatalogError> {
    let value = config
        .get(key)
        .filter(|v| !v.is_empty() && *v != "default")
        .ok_or_else(|| CatalogError::not_found(format!("'{key}' in {CONFIG_FILE}")))?;
    let dir = resolve_setting(value, root);
    if !dir.is_dir() {
        return Err(CatalogError::not_found(format!(
            "RetroArch {key} {}",
            dir.display()
        )));
    }
    Ok(dir)
}
