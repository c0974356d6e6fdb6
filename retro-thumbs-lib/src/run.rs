//! Run orchestration: discover images for every game file, then match the
//! files to RetroArch playlists and write their thumbnails.

use std::path::PathBuf;
use std::time::Instant;

use retro_thumbs_catalog::{DestinationCatalog, SourceCatalog};
use retro_thumbs_core::{GameFile, MediaCategory};

use crate::codec::ImageCodec;
use crate::config::RunConfig;
use crate::discover::{FileSearch, ImageSearch, collect_game_files};
use crate::error::ThumbsError;
use crate::materialize::{MaterializeOptions, materialize};
use crate::matcher::{DestinationIndex, DestinationRecord, find_destinations};
use crate::report::RunSummary;
use crate::selection::{Chooser, pick_source_index};
use crate::session::{SelectionEntry, SelectionSession, TitleKey};

/// Progress reported while a run is underway.
#[derive(Debug)]
pub enum RunEvent<'e> {
    /// Game files collected from the inputs.
    FilesCollected { total: usize },
    /// One file's images were searched.
    Searched {
        file: &'e GameFile,
        result: &'e FileSearch,
    },
    /// RetroArch playlists loaded.
    PlaylistsLoaded { total: usize },
    /// A file was found in a playlist.
    Matched {
        file: &'e GameFile,
        destination: &'e DestinationRecord,
    },
    /// A thumbnail decision was made.
    Materialized { entry: &'e SelectionEntry },
}

/// Drives one run against a pair of catalogs.
pub struct Runner<'a> {
    config: &'a RunConfig,
    source: &'a dyn SourceCatalog,
    destination: &'a dyn DestinationCatalog,
    codec: Option<&'a dyn ImageCodec>,
}

impl<'a> Runner<'a> {
    pub fn new(
        config: &'a RunConfig,
        source: &'a dyn SourceCatalog,
        destination: &'a dyn DestinationCatalog,
        codec: Option<&'a dyn ImageCodec>,
    ) -> Self {
        Self {
            config,
            source,
            destination,
            codec,
        }
    }

    /// Discover and materialize, returning the totals of everything the
    /// session has logged so far.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        session: &mut SelectionSession,
        chooser: &mut dyn Chooser,
        on_event: &mut dyn FnMut(RunEvent<'_>),
    ) -> Result<RunSummary, ThumbsError> {
        self.discover(inputs, session, chooser, on_event)?;
        self.materialize_all(session, chooser, on_event)?;
        Ok(RunSummary::from_log(session.log()))
    }

    /// Search images for every game file under `inputs`.
    pub fn discover(
        &self,
        inputs: &[PathBuf],
        session: &mut SelectionSession,
        chooser: &mut dyn Chooser,
        on_event: &mut dyn FnMut(RunEvent<'_>),
    ) -> Result<usize, ThumbsError> {
        let started = Instant::now();
        let files = collect_game_files(inputs, self.config, self.config.preset.search_sub_dirs);
        log::debug!("Collected {} game files", files.len());
        on_event(RunEvent::FilesCollected { total: files.len() });

        let search = ImageSearch::new(self.config, self.source, self.codec.is_some());
        let mut found = 0;
        for file in &files {
            let result = search.search(file, session, chooser)?;
            found += result.images_found();
            on_event(RunEvent::Searched {
                file,
                result: &result,
            });
        }
        session.add_elapsed(started.elapsed());
        Ok(found)
    }

    /// Write thumbnails for every title in the session.
    pub fn materialize_all(
        &self,
        session: &mut SelectionSession,
        chooser: &mut dyn Chooser,
        on_event: &mut dyn FnMut(RunEvent<'_>),
    ) -> Result<(), ThumbsError> {
        let started = Instant::now();
        let index = DestinationIndex::load(self.destination)?;
        on_event(RunEvent::PlaylistsLoaded { total: index.len() });

        let options = MaterializeOptions {
            size: self.config.preset.size_policy(),
            save: self.config.preset.save,
            overwrite: self.config.preset.overwrite,
        };

        let titles: Vec<TitleKey> = session.titles().cloned().collect();
        for key in &titles {
            let files: Vec<GameFile> = session.files(key).iter().map(|(f, _)| f.clone()).collect();
            let matches = find_destinations(
                &key.platform,
                &files,
                &index,
                &self.config.platforms,
                self.config.match_platforms_before_search,
            );
            if matches.is_empty() {
                log::info!("{}: not in any RetroArch playlist", key);
            }
            for (file, record) in &matches {
                session.mark_matched(file.path());
                on_event(RunEvent::Matched {
                    file,
                    destination: record,
                });
                for category in MediaCategory::ALL {
                    if let Some(entry) =
                        self.materialize_one(key, file, record, category, &options, session, chooser)
                    {
                        on_event(RunEvent::Materialized { entry: &entry });
                    }
                }
            }
        }

        session.add_elapsed(started.elapsed());
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn materialize_one(
        &self,
        key: &TitleKey,
        file: &GameFile,
        record: &DestinationRecord,
        category: MediaCategory,
        options: &MaterializeOptions,
        session: &mut SelectionSession,
        chooser: &mut dyn Chooser,
    ) -> Option<SelectionEntry> {
        let preset = &self.config.preset;
        preset.media_types(category)?;

        let bucket = session
            .files(key)
            .iter()
            .find(|(f, _)| f == file)
            .map(|(_, b)| b.clone())?;
        let candidates = session.candidates(key, category, &bucket).to_vec();
        let prior = session.prior_usage_count(key, category);
        let index = pick_source_index(
            candidates.len(),
            preset.alternation(category),
            prior,
            chooser,
        )?;
        let source = candidates[index].clone();
        let destination = record.thumbnail_path(self.destination.thumbnails_dir(), category);

        let result = materialize(&source, &destination, options, self.codec);
        log::info!(
            "{} {}: {} -> {} ({})",
            file.file_name(),
            category,
            source.display(),
            destination.display(),
            result.outcome
        );

        let mut entry = SelectionEntry {
            title: key.clone(),
            game_file: file.path().to_path_buf(),
            category,
            source,
            destination,
            outcome: result.outcome,
            edit: None,
        };
        session.record_selection(entry.clone());
        if let Some(edit) = result.edit {
            session.attach_edit(key, file.path(), category, edit.clone());
            entry.edit = Some(edit);
        }
        Some(entry)
    }
}

#[cfg(test)]
#[path = "tests/run_tests.rs"]
mod tests;
