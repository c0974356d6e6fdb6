//! Per-run state: which images each title has, which files belong to it,
//! and the log of every selection made.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use retro_thumbs_core::{GameFile, MediaCategory};

use crate::materialize::{ImageEdit, SaveOutcome};

/// A game as the source library knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TitleKey {
    pub platform: String,
    pub title: String,
}

impl TitleKey {
    pub fn new(platform: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            title: title.into(),
        }
    }
}

impl std::fmt::Display for TitleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.platform)
    }
}

/// Groups a title's images by the region code detected in the file name
/// that found them. Files without a detected code share the unknown bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionBucket(Option<String>);

impl RegionBucket {
    pub fn detected(code: impl Into<String>) -> Self {
        Self(Some(code.into()))
    }

    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn code(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<Option<String>> for RegionBucket {
    fn from(code: Option<String>) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for RegionBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(code) => write!(f, "({code})"),
            None => write!(f, "(no region)"),
        }
    }
}

#[derive(Debug, Default)]
struct TitleState {
    files: Vec<(GameFile, RegionBucket)>,
    images: BTreeMap<MediaCategory, BTreeMap<RegionBucket, Vec<PathBuf>>>,
}

/// One thumbnail decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub title: TitleKey,
    pub game_file: PathBuf,
    pub category: MediaCategory,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: SaveOutcome,
    pub edit: Option<ImageEdit>,
}

/// Append-only record of every selection, plus run-wide counters. Survives
/// a preset change; everything else in the session does not.
#[derive(Debug, Clone, Default)]
pub struct SelectionLog {
    entries: Vec<SelectionEntry>,
    images_found: usize,
    matched_files: BTreeSet<PathBuf>,
    elapsed: Duration,
}

impl SelectionLog {
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Images found in the source library.
    pub fn images_found(&self) -> usize {
        self.images_found
    }

    /// Game files present in both catalogs.
    pub fn matched_files(&self) -> usize {
        self.matched_files.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Entries grouped by title, then game file, in log order.
    pub fn by_title(&self) -> BTreeMap<&TitleKey, BTreeMap<&Path, Vec<&SelectionEntry>>> {
        let mut grouped: BTreeMap<&TitleKey, BTreeMap<&Path, Vec<&SelectionEntry>>> =
            BTreeMap::new();
        for entry in &self.entries {
            grouped
                .entry(&entry.title)
                .or_default()
                .entry(entry.game_file.as_path())
                .or_default()
                .push(entry);
        }
        grouped
    }
}

/// Accumulated state for one run.
#[derive(Debug, Default)]
pub struct SelectionSession {
    titles: BTreeMap<TitleKey, TitleState>,
    log: SelectionLog,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session that keeps only this session's log.
    pub fn carry_over(self) -> Self {
        Self {
            titles: BTreeMap::new(),
            log: self.log,
        }
    }

    pub fn log(&self) -> &SelectionLog {
        &self.log
    }

    pub fn titles(&self) -> impl Iterator<Item = &TitleKey> {
        self.titles.keys()
    }

    pub fn title_count(&self) -> usize {
        self.titles.len()
    }

    /// Add a game file to its title. Registering a file again updates its
    /// region bucket.
    pub fn register_file(&mut self, key: &TitleKey, file: GameFile, bucket: RegionBucket) {
        let state = self.titles.entry(key.clone()).or_default();
        match state.files.iter_mut().find(|(f, _)| *f == file) {
            Some(existing) => existing.1 = bucket,
            None => state.files.push((file, bucket)),
        }
    }

    /// Files of a title with their region buckets, in registration order.
    pub fn files(&self, key: &TitleKey) -> &[(GameFile, RegionBucket)] {
        self.titles
            .get(key)
            .map(|s| s.files.as_slice())
            .unwrap_or(&[])
    }

    /// Record an image found for a title. Returns false if the bucket
    /// already had it.
    pub fn accumulate_image(
        &mut self,
        key: &TitleKey,
        category: MediaCategory,
        bucket: &RegionBucket,
        image: PathBuf,
    ) -> bool {
        let images = self
            .titles
            .entry(key.clone())
            .or_default()
            .images
            .entry(category)
            .or_default()
            .entry(bucket.clone())
            .or_default();
        if images.contains(&image) {
            return false;
        }
        images.push(image);
        self.log.images_found += 1;
        true
    }

    /// Fill an empty bucket with every image the title has in other
    /// buckets. Returns the number of images adopted.
    pub fn adopt_other_regions(
        &mut self,
        key: &TitleKey,
        category: MediaCategory,
        bucket: &RegionBucket,
    ) -> usize {
        if !self.candidates(key, category, bucket).is_empty() {
            return 0;
        }
        let all = self.all_candidates(key, category);
        if all.is_empty() {
            return 0;
        }
        let count = all.len();
        self.titles
            .entry(key.clone())
            .or_default()
            .images
            .entry(category)
            .or_default()
            .insert(bucket.clone(), all);
        count
    }

    /// Images available to files in `bucket`, in discovery order.
    pub fn candidates(
        &self,
        key: &TitleKey,
        category: MediaCategory,
        bucket: &RegionBucket,
    ) -> &[PathBuf] {
        self.titles
            .get(key)
            .and_then(|s| s.images.get(&category))
            .and_then(|b| b.get(bucket))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every image of a title for one category, across buckets, without
    /// duplicates.
    pub fn all_candidates(&self, key: &TitleKey, category: MediaCategory) -> Vec<PathBuf> {
        let mut all: Vec<PathBuf> = Vec::new();
        if let Some(buckets) = self.titles.get(key).and_then(|s| s.images.get(&category)) {
            for image in buckets.values().flatten() {
                if !all.contains(image) {
                    all.push(image.clone());
                }
            }
        }
        all
    }

    pub fn record_selection(&mut self, entry: SelectionEntry) {
        self.log.entries.push(entry);
    }

    /// Attach an edit to the latest selection for this file and category.
    pub fn attach_edit(
        &mut self,
        key: &TitleKey,
        game_file: &Path,
        category: MediaCategory,
        edit: ImageEdit,
    ) -> bool {
        match self
            .log
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.title == *key && e.game_file == game_file && e.category == category)
        {
            Some(entry) => {
                entry.edit = Some(edit);
                true
            }
            None => false,
        }
    }

    /// How many files of this title already had an image of this category
    /// saved.
    pub fn prior_usage_count(&self, key: &TitleKey, category: MediaCategory) -> usize {
        self.log
            .entries
            .iter()
            .filter(|e| e.title == *key && e.category == category && e.outcome.is_saved())
            .count()
    }

    pub fn mark_matched(&mut self, game_file: &Path) {
        self.log.matched_files.insert(game_file.to_path_buf());
    }

    pub fn add_elapsed(&mut self, elapsed: Duration) {
        self.log.elapsed += elapsed;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
