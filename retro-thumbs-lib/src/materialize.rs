//! Writing one selected image to its RetroArch thumbnail path.
//!
//! An existing thumbnail is renamed aside before the new one is written and
//! put back if the write fails, so a failed save never loses the old file.

use std::path::{Path, PathBuf};

use retro_thumbs_core::ImageFormat;

use crate::codec::ImageCodec;
use crate::config::SaveParams;
use crate::error::ThumbsError;
use crate::resize::SizePolicy;

/// What happened to one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written where nothing existed
    New,
    /// Replaced an existing thumbnail
    Overwritten,
    /// A thumbnail exists and overwriting is off
    SkippedExists,
    /// A thumbnail exists and is read-only
    SkippedReadOnly,
    /// The source needs an image codec and none is available
    SkippedUnsupported,
    /// The save failed
    Error(String),
}

impl SaveOutcome {
    /// Whether a file was written.
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::New | Self::Overwritten)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::SkippedExists | Self::SkippedReadOnly | Self::SkippedUnsupported
        )
    }
}

impl std::fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "saved"),
            Self::Overwritten => write!(f, "overwritten"),
            Self::SkippedExists => write!(f, "skipped, already exists"),
            Self::SkippedReadOnly => write!(f, "skipped, read-only"),
            Self::SkippedUnsupported => write!(f, "skipped, needs image conversion"),
            Self::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

/// Size change applied while saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEdit {
    pub original: (u32, u32),
    /// New size, if the image was resized.
    pub resized: Option<(u32, u32)>,
    pub error: Option<String>,
}

impl ImageEdit {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// How thumbnails are written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterializeOptions {
    pub size: SizePolicy,
    pub save: SaveParams,
    pub overwrite: bool,
}

/// Result of [`materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub outcome: SaveOutcome,
    pub edit: Option<ImageEdit>,
}

impl Materialized {
    fn outcome(outcome: SaveOutcome) -> Self {
        Self {
            outcome,
            edit: None,
        }
    }
}

/// Write `source` to `destination` as a PNG thumbnail.
///
/// Without a codec only PNG sources are accepted and copied unchanged.
/// Resize problems are recorded in the edit and the image is saved at its
/// original size.
pub fn materialize(
    source: &Path,
    destination: &Path,
    options: &MaterializeOptions,
    codec: Option<&dyn ImageCodec>,
) -> Materialized {
    let exists = destination.exists();
    if exists {
        if !options.overwrite {
            return Materialized::outcome(SaveOutcome::SkippedExists);
        }
        match std::fs::metadata(destination) {
            Ok(meta) if meta.permissions().readonly() => {
                log::warn!("Read-only, not replaced: {}", destination.display());
                return Materialized::outcome(SaveOutcome::SkippedReadOnly);
            }
            Ok(_) => {}
            Err(e) => {
                return Materialized::outcome(SaveOutcome::Error(format!(
                    "Cannot inspect existing thumbnail: {e}"
                )));
            }
        }
    }

    let Some(codec) = codec else {
        if ImageFormat::from_path(source) != Some(ImageFormat::Png) {
            log::warn!(
                "Cannot convert {} to PNG without an image codec",
                source.display()
            );
            return Materialized::outcome(SaveOutcome::SkippedUnsupported);
        }
        let outcome = write_staged(destination, exists, |path| {
            std::fs::copy(source, path)
                .map(|_| ())
                .map_err(|e| ThumbsError::file(path, e))
        });
        return Materialized::outcome(outcome);
    };

    let mut image = match codec.decode(source) {
        Ok(image) => image,
        Err(e) => {
            return Materialized::outcome(SaveOutcome::Error(format!(
                "Failed to read image: {e}"
            )));
        }
    };

    let mut edit = None;
    if !options.size.is_noop() {
        let original = image.dimensions();
        let mut record = ImageEdit {
            original,
            resized: None,
            error: None,
        };
        match options.size.target_size(original.0, original.1) {
            Ok(target) if target == original => {}
            Ok((width, height)) => {
                match codec.resize(&image, width, height, options.size.filter) {
                    Ok(resized) => {
                        image = resized;
                        record.resized = Some((width, height));
                    }
                    Err(e) => record.error = Some(format!("Image resize failed: {e}")),
                }
            }
            Err(e) => record.error = Some(format!("Image resize failed: {e}")),
        }
        if let Some(error) = &record.error {
            log::warn!("{}: {}", source.display(), error);
        }
        edit = Some(record);
    }

    let outcome = write_staged(destination, exists, |path| {
        codec.encode(&image, path, &options.save)
    });
    Materialized { outcome, edit }
}

fn write_staged(
    destination: &Path,
    exists: bool,
    write: impl FnOnce(&Path) -> Result<(), ThumbsError>,
) -> SaveOutcome {
    if let Some(parent) = destination.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return SaveOutcome::Error(format!(
                "Cannot create {}: {}",
                parent.display(),
                e
            ));
        }
    }

    let staged = if exists {
        match StagedOverwrite::stage(destination) {
            Ok(staged) => Some(staged),
            Err(e) => {
                return SaveOutcome::Error(format!("Cannot move existing thumbnail aside: {e}"));
            }
        }
    } else {
        None
    };

    match write(destination) {
        Ok(()) => match staged {
            Some(staged) => {
                let leftover = staged.staged_path().to_path_buf();
                if let Err(e) = staged.commit() {
                    log::warn!(
                        "Could not remove staged thumbnail {}: {}",
                        leftover.display(),
                        e
                    );
                }
                SaveOutcome::Overwritten
            }
            None => SaveOutcome::New,
        },
        Err(e) => {
            if staged.is_none() && destination.exists() {
                if let Err(rm) = std::fs::remove_file(destination) {
                    log::warn!(
                        "Could not remove partial thumbnail {}: {}",
                        destination.display(),
                        rm
                    );
                }
            }
            // Dropping `staged` restores the previous thumbnail.
            drop(staged);
            SaveOutcome::Error(format!("Failed to save image: {e}"))
        }
    }
}

/// An existing file renamed aside while its replacement is written.
///
/// Dropped without [`commit`](Self::commit), it removes whatever is at the
/// original path and renames the staged file back.
#[derive(Debug)]
pub struct StagedOverwrite {
    original: PathBuf,
    staged: PathBuf,
    committed: bool,
}

impl StagedOverwrite {
    pub fn stage(original: &Path) -> std::io::Result<Self> {
        let staged = staging_path(original);
        std::fs::rename(original, &staged)?;
        Ok(Self {
            original: original.to_path_buf(),
            staged,
            committed: false,
        })
    }

    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    /// Keep the new file and delete the staged one. On error the staged
    /// file is left at [`staged_path`](Self::staged_path).
    pub fn commit(mut self) -> std::io::Result<()> {
        self.committed = true;
        std::fs::remove_file(&self.staged)
    }
}

impl Drop for StagedOverwrite {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if self.original.exists() {
            if let Err(e) = std::fs::remove_file(&self.original) {
                log::warn!(
                    "Could not remove failed thumbnail {}: {}",
                    self.original.display(),
                    e
                );
            }
        }
        if let Err(e) = std::fs::rename(&self.staged, &self.original) {
            log::error!(
                "Could not restore {} from {}: {}",
                self.original.display(),
                self.staged.display(),
                e
            );
        }
    }
}

/// `<name>.tmp`, or `<name>.tmp<N>` for the first free N.
pub fn staging_path(original: &Path) -> PathBuf {
    let name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let candidate = original.with_file_name(format!("{name}.tmp"));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1u32;
    loop {
        let candidate = original.with_file_name(format!("{name}.tmp{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "tests/materialize_tests.rs"]
mod tests;
