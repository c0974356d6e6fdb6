//! Finding a title's image inside one LaunchBox media folder.
//!
//! LaunchBox stores images as `<media dir>/<region>/<Title>-NN.<ext>`, with
//! region-free images directly in the media dir. The title part has
//! characters that are illegal in file names replaced by `_`, and may be
//! followed by a GUID-like qualifier (`Title.0a1b2c3d-...-01.jpg`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use retro_thumbs_core::region::is_region_free;
use retro_thumbs_core::{ImageFormat, launchbox_image_stem};

use crate::error::ThumbsError;
use crate::selection::Chooser;

/// Matches image file names for one title.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    re: Regex,
}

impl TitlePattern {
    pub fn new(title: &str) -> Result<Self, ThumbsError> {
        let stem = regex::escape(&launchbox_image_stem(title));
        let re = Regex::new(&format!(
            r"(?i)^{stem}[.\-][\w\-]*?(?:-?(\d+))?\.([A-Za-z0-9]+)$"
        ))?;
        Ok(Self { re })
    }

    /// The candidate for `path`, if its file name belongs to this title.
    /// Only PNG and JPEG files are considered.
    pub fn candidate(&self, path: &Path, region: &str) -> Option<Candidate> {
        let name = path.file_name()?.to_str()?;
        let caps = self.re.captures(name)?;
        let format = ImageFormat::from_path(path)?;
        let number = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
        Some(Candidate {
            path: path.to_path_buf(),
            region: region.to_string(),
            number,
            format,
        })
    }
}

/// An image file that matches a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Region folder it was found in.
    pub region: String,
    /// Trailing image number (`-01` -> 1), if any.
    pub number: Option<u32>,
    pub format: ImageFormat,
}

/// Inputs to [`locate`] that stay the same across media folders.
pub struct LocateRequest<'a> {
    pub pattern: &'a TitlePattern,
    /// Region folders in priority order.
    pub regions: &'a [String],
    /// Images already taken by other files of the title.
    pub exclude: &'a HashSet<PathBuf>,
    pub format: Option<ImageFormat>,
    /// Pick at random among a folder's matches instead of the first one.
    pub randomize: bool,
    pub preferred_number: Option<u32>,
    /// Without an image codec only PNG files can be used.
    pub codec_available: bool,
}

/// Find the best image for a title in one media folder.
///
/// Region folders are tried in priority order and the first one with a
/// usable match wins. Within a folder the preferred image number is taken
/// first, then files of the preferred format, then anything else.
pub fn locate(
    media_dir: &Path,
    request: &LocateRequest<'_>,
    chooser: &mut dyn Chooser,
) -> Option<PathBuf> {
    for region in request.regions {
        let dir = region_dir(media_dir, region);
        let candidates = scan_directory(&dir, region, request.pattern, request.exclude);
        if candidates.is_empty() {
            continue;
        }
        if let Some(path) = select(&candidates, request, chooser) {
            return Some(path);
        }
    }
    None
}

/// Every image for a title in one media folder, across all region folders,
/// without selection.
pub fn enumerate(
    media_dir: &Path,
    pattern: &TitlePattern,
    regions: &[String],
    exclude: &HashSet<PathBuf>,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut all = Vec::new();
    for region in regions {
        let dir = region_dir(media_dir, region);
        if !seen.insert(dir.clone()) {
            continue;
        }
        all.extend(scan_directory(&dir, region, pattern, exclude));
    }
    all
}

fn region_dir(media_dir: &Path, region: &str) -> PathBuf {
    if is_region_free(region) {
        media_dir.to_path_buf()
    } else {
        media_dir.join(region)
    }
}

/// Matching files in one directory, sorted by name.
///
/// A title's images sort next to each other, so the scan stops at the
/// first non-matching file after a match. Excluded files are passed over.
fn scan_directory(
    dir: &Path,
    region: &str,
    pattern: &TitlePattern,
    exclude: &HashSet<PathBuf>,
) -> Vec<Candidate> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Cannot read {}: {}", dir.display(), e);
            }
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort_by_cached_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    let mut found = Vec::new();
    for path in files {
        if exclude.contains(&path) {
            continue;
        }
        match pattern.candidate(&path, region) {
            Some(candidate) => found.push(candidate),
            None if !found.is_empty() => break,
            None => {}
        }
    }
    found
}

fn select(
    candidates: &[Candidate],
    request: &LocateRequest<'_>,
    chooser: &mut dyn Chooser,
) -> Option<PathBuf> {
    if let Some(number) = request.preferred_number {
        if let Some(c) = candidates.iter().find(|c| c.number == Some(number)) {
            return Some(c.path.clone());
        }
    }

    let usable: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| request.codec_available || c.format == ImageFormat::Png)
        .collect();
    let (preferred, others): (Vec<&Candidate>, Vec<&Candidate>) = match request.format {
        Some(format) => usable.into_iter().partition(|c| c.format == format),
        None => (usable, Vec::new()),
    };
    let pool = if preferred.is_empty() { others } else { preferred };
    if pool.is_empty() {
        return None;
    }

    let index = if request.randomize {
        chooser.choose_index(pool.len()).min(pool.len() - 1)
    } else {
        0
    };
    Some(pool[index].path.clone())
}

#[cfg(test)]
#[path = "tests/locator_tests.rs"]
mod tests;
