//! Finding game files and the LaunchBox images for them.

use std::collections::HashSet;
use std::path::PathBuf;

use retro_thumbs_catalog::{MediaFolder, SourceCatalog};
use retro_thumbs_core::{GameFile, MediaCategory};
use walkdir::WalkDir;

use crate::config::{Alternation, RunConfig};
use crate::error::ThumbsError;
use crate::locator::{LocateRequest, TitlePattern, locate};
use crate::selection::Chooser;
use crate::session::{RegionBucket, SelectionSession, TitleKey};

/// Game files under `inputs`.
///
/// Files given directly are always taken. Directories contribute files
/// with a game extension, recursing when `recursive` is set. Within a
/// directory, files come before subdirectories, each sorted by name.
/// Missing inputs are logged and skipped.
pub fn collect_game_files(inputs: &[PathBuf], config: &RunConfig, recursive: bool) -> Vec<GameFile> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();
    for input in inputs {
        let input = std::path::absolute(input).unwrap_or_else(|_| input.clone());
        if input.is_file() {
            if seen.insert(input.clone()) {
                files.push(GameFile::new(input));
            }
            continue;
        }
        if !input.is_dir() {
            log::warn!("Not found: {}", input.display());
            continue;
        }

        let walker = WalkDir::new(&input)
            .min_depth(1)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            });
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Error walking {}: {}", input.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !config.is_game_file(entry.path()) {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                files.push(GameFile::new(path));
            }
        }
    }
    files
}

/// What image discovery found for one game file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSearch {
    /// The file is not in the source library.
    Unmatched,
    /// The library entry's platform has no media folders.
    NoMediaFolders { title: TitleKey },
    /// Images found per category for this file.
    Found {
        title: TitleKey,
        bucket: RegionBucket,
        found: Vec<(MediaCategory, PathBuf)>,
    },
}

impl FileSearch {
    pub fn images_found(&self) -> usize {
        match self {
            Self::Found { found, .. } => found.len(),
            _ => 0,
        }
    }
}

/// Searches the source library for a game file's images.
pub struct ImageSearch<'a> {
    config: &'a RunConfig,
    source: &'a dyn SourceCatalog,
    codec_available: bool,
}

impl<'a> ImageSearch<'a> {
    pub fn new(config: &'a RunConfig, source: &'a dyn SourceCatalog, codec_available: bool) -> Self {
        Self {
            config,
            source,
            codec_available,
        }
    }

    /// Register `file` with its title and accumulate one image per
    /// category into its region bucket.
    ///
    /// When a category turns up nothing new, the file's bucket may take
    /// the images other regions already found for the title.
    pub fn search(
        &self,
        file: &GameFile,
        session: &mut SelectionSession,
        chooser: &mut dyn Chooser,
    ) -> Result<FileSearch, ThumbsError> {
        let Some(entry) = self.source.find_entry_by_path(file.path()) else {
            log::info!("{}: not in the LaunchBox library", file.file_name());
            return Ok(FileSearch::Unmatched);
        };
        let key = TitleKey::new(&entry.platform, &entry.title);
        let Some(folders) = self.source.platforms().get(&entry.platform) else {
            log::warn!("No media folders for platform '{}'", entry.platform);
            return Ok(FileSearch::NoMediaFolders { title: key });
        };

        let resolution =
            self.config
                .regions
                .resolve(file.stem(), entry.region.as_deref(), &entry.platform);
        let bucket = RegionBucket::from(resolution.detected_code);
        session.register_file(&key, file.clone(), bucket.clone());

        let preset = &self.config.preset;
        let pattern = TitlePattern::new(&entry.title)?;
        let mut found = Vec::new();

        for category in MediaCategory::ALL {
            let Some(media_types) = preset.media_types(category) else {
                continue;
            };
            let exclude: HashSet<PathBuf> =
                session.all_candidates(&key, category).into_iter().collect();
            let request = LocateRequest {
                pattern: &pattern,
                regions: &resolution.priority,
                exclude: &exclude,
                format: preset.format,
                randomize: preset.alternation(category) == Alternation::Random,
                preferred_number: preset.preferred_number(category),
                codec_available: self.codec_available,
            };

            match search_folders(folders, &media_types, &request, chooser) {
                Some(image) => {
                    log::info!("Found {}: {}", category, image.display());
                    session.accumulate_image(&key, category, &bucket, image.clone());
                    found.push((category, image));
                }
                None => {
                    if !self.config.regions.detected_regions_only {
                        let adopted = session.adopt_other_regions(&key, category, &bucket);
                        if adopted > 0 {
                            log::debug!(
                                "{} {}: using {} image(s) from other regions",
                                key,
                                category,
                                adopted
                            );
                        }
                    }
                }
            }
        }

        Ok(FileSearch::Found {
            title: key,
            bucket,
            found,
        })
    }
}

/// First hit over media types in priority order, then the platform's
/// folders of that type.
fn search_folders(
    folders: &[MediaFolder],
    media_types: &[String],
    request: &LocateRequest<'_>,
    chooser: &mut dyn Chooser,
) -> Option<PathBuf> {
    for media_type in media_types {
        for folder in folders.iter().filter(|f| f.media_type == *media_type) {
            if let Some(image) = locate(&folder.dir, request, chooser) {
                return Some(image);
            }
        }
    }
    None
}

