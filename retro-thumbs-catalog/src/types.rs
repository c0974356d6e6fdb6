use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One media folder configured for a LaunchBox platform, e.g.
/// ("Box - Front", `Images/Nintendo 64/Box - Front`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFolder {
    pub media_type: String,
    pub dir: PathBuf,
}

impl MediaFolder {
    pub fn new(media_type: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            media_type: media_type.into(),
            dir: dir.into(),
        }
    }
}

/// The source library's record for a game file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub platform: String,
    pub title: String,
    /// Region set in the library, if any.
    pub region: Option<String>,
    /// ID of the parent game when the file is an additional application
    /// (extra disc, alternate version, hack).
    pub alternate_of: Option<String>,
}

/// One item in a RetroArch playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub path: PathBuf,
    pub label: String,
}

impl PlaylistEntry {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}
