//! Matching game files to RetroArch playlist entries.

use std::path::{Path, PathBuf};

use retro_thumbs_catalog::{DestinationCatalog, PlaylistEntry};
use retro_thumbs_core::{GameFile, MediaCategory, PlatformEquivalence, thumbnail_file_name};

use crate::error::ThumbsError;

/// Where a game file appears in RetroArch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRecord {
    pub playlist: String,
    pub label: String,
    pub entry_path: PathBuf,
}

impl DestinationRecord {
    /// `<thumbnails>/<playlist>/<Named_*>/<label>.png`
    pub fn thumbnail_path(&self, thumbnails_dir: &Path, category: MediaCategory) -> PathBuf {
        thumbnails_dir
            .join(&self.playlist)
            .join(category.thumbnail_dir())
            .join(thumbnail_file_name(&self.label))
    }
}

/// Every playlist's entries, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct DestinationIndex {
    playlists: Vec<(String, Vec<PlaylistEntry>)>,
}

impl DestinationIndex {
    /// Read all playlists. A playlist that cannot be read is logged and
    /// left out.
    pub fn load(catalog: &dyn DestinationCatalog) -> Result<Self, ThumbsError> {
        let mut playlists = Vec::new();
        for name in catalog.playlist_names()? {
            match catalog.list_entries(&name) {
                Ok(entries) => playlists.push((name, entries)),
                Err(e) => log::warn!("Skipping playlist '{}': {}", name, e),
            }
        }
        playlists.sort_by(|a, b| a.0.cmp(&b.0));
        log::debug!("Loaded {} RetroArch playlists", playlists.len());
        Ok(Self { playlists })
    }

    pub fn from_playlists(mut playlists: Vec<(String, Vec<PlaylistEntry>)>) -> Self {
        playlists.sort_by(|a, b| a.0.cmp(&b.0));
        Self { playlists }
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn playlist_names(&self) -> impl Iterator<Item = &str> {
        self.playlists.iter().map(|(name, _)| name.as_str())
    }
}

/// Find the playlist entry for each of a title's files.
///
/// Playlists are searched in name order, skipping those not equivalent to
/// `platform` when `prefilter` is set. Each entry is given to at most one
/// file and each file gets at most one entry. The result keeps the order
/// of `files`; unmatched files are left out.
pub fn find_destinations(
    platform: &str,
    files: &[GameFile],
    index: &DestinationIndex,
    platforms: &PlatformEquivalence,
    prefilter: bool,
) -> Vec<(GameFile, DestinationRecord)> {
    let mut matched: Vec<Option<DestinationRecord>> = vec![None; files.len()];
    let mut remaining = files.len();

    for (playlist, entries) in &index.playlists {
        if remaining == 0 {
            break;
        }
        if prefilter && !platforms.accepts(platform, playlist) {
            continue;
        }
        for entry in entries {
            if remaining == 0 {
                break;
            }
            let hit = files
                .iter()
                .enumerate()
                .find(|(i, file)| matched[*i].is_none() && file.matches_entry(&entry.path));
            if let Some((i, file)) = hit {
                log::debug!("{} -> playlist '{}' as '{}'", file, playlist, entry.label);
                matched[i] = Some(DestinationRecord {
                    playlist: playlist.clone(),
                    label: entry.label.clone(),
                    entry_path: entry.path.clone(),
                });
                remaining -= 1;
            }
        }
    }

    files
        .iter()
        .zip(matched)
        .filter_map(|(file, record)| record.map(|r| (file.clone(), r)))
        .collect()
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
