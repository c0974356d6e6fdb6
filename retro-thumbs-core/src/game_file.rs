use std::path::{Path, PathBuf};

/// A ROM, disc image, or playlist file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameFile {
    path: PathBuf,
    stem: String,
    suffix: String,
}

impl GameFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Self { path, stem, suffix }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension including the leading dot, or empty.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether a playlist entry path refers to this file.
    ///
    /// Entries pointing inside an archive (`game.zip#game.rom`) are compared
    /// as the archive itself.
    pub fn matches_entry(&self, entry_path: &Path) -> bool {
        canonical_entry_path(entry_path, &self.suffix) == self.path
    }
}

impl std::fmt::Display for GameFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Strip an archive-member fragment from a playlist entry path.
///
/// `dir/game.zip#game.rom` with suffix `.zip` becomes `dir/game.zip`. Paths
/// without `<suffix>#` in their file name are returned unchanged.
pub fn canonical_entry_path(entry_path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return entry_path.to_path_buf();
    }
    let Some(name) = entry_path.file_name().map(|n| n.to_string_lossy()) else {
        return entry_path.to_path_buf();
    };
    let marker = format!("{suffix}#");
    match name.rfind(&marker) {
        Some(idx) => {
            let outer = format!("{}{}", &name[..idx], suffix);
            match entry_path.parent() {
                Some(parent) => parent.join(outer),
                None => PathBuf::from(outer),
            }
        }
        None => entry_path.to_path_buf(),
    }
}
