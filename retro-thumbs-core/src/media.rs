use serde::{Deserialize, Serialize};

/// The three RetroArch thumbnail slots, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaCategory {
    /// Front box art (`Named_Boxarts`)
    FrontBoxart,
    /// Title screen (`Named_Titles`)
    TitleScreen,
    /// In-game screenshot (`Named_Snaps`)
    GameplayScreen,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 3] = [
        MediaCategory::FrontBoxart,
        MediaCategory::TitleScreen,
        MediaCategory::GameplayScreen,
    ];

    /// RetroArch thumbnail subdirectory for this slot.
    pub fn thumbnail_dir(&self) -> &'static str {
        match self {
            Self::FrontBoxart => "Named_Boxarts",
            Self::TitleScreen => "Named_Titles",
            Self::GameplayScreen => "Named_Snaps",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FrontBoxart => "Boxart",
            Self::TitleScreen => "Title",
            Self::GameplayScreen => "Snap",
        }
    }

    /// LaunchBox media types searched for this slot when a preset does not
    /// set its own list.
    pub fn default_labels(&self) -> &'static [&'static str] {
        match self {
            Self::FrontBoxart => &[
                "Box - Front",
                "Box - Front - Reconstructed",
                "Fanart - Box - Front",
                "Box - 3D",
            ],
            Self::TitleScreen => &[
                "Screenshot - Game Title",
                "Screenshot - Game Select",
                "Screenshot - High Scores",
                "Screenshot - Game Over",
                "Screenshot - Gameplay",
            ],
            Self::GameplayScreen => &[
                "Screenshot - Gameplay",
                "Screenshot - Game Select",
                "Screenshot - Game Over",
                "Screenshot - High Scores",
                "Screenshot - Game Title",
            ],
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Image formats LaunchBox stores. RetroArch only reads PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl ImageFormat {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Jpg => &["jpg", "jpeg", "jpe"],
        }
    }

    /// Format of a file, judged by its extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Png, Self::Jpg]
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpg => write!(f, "JPEG"),
        }
    }
}
