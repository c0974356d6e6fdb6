//! Presets, global options, and the run configuration built from them.
//!
//! User presets live in `presets.toml` next to `settings.toml`:
//!
//! ```toml
//! [[preset]]
//! name = "back-cover"
//! description = "Front and back boxart with a gameplay image."
//! filter = "bicubic"
//! search_sub_dirs = true
//! overwrite = true
//!
//! [preset.title]
//! media_types = ["Box - Back", "Screenshot - Game Title"]
//!
//! [preset.height]
//! mode = "downscale"
//! value = 1080
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use retro_thumbs_core::{ImageFormat, MediaCategory, PlatformEquivalence, RegionPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ThumbsError;
use crate::resize::{ResampleFilter, SizeChange, SizePolicy};

/// Media type list entry that disables a category.
pub const SKIP: &str = "skip";

/// Name of the preset used when none is selected.
pub const DEFAULT_PRESET: &str = "default";

/// How the game files of one title share that title's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alternation {
    /// Every file gets the first image
    #[default]
    Off,
    /// Files take images in turn
    On,
    /// Each file gets a random image
    Random,
}

/// Per-category preset settings. Unset fields fall back to the category's
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOptions {
    /// LaunchBox media types in priority order. Empty or `["skip"]`
    /// disables the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<Alternation>,
    /// Image number (`Title-NN.png`) to take before any other.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_number: Option<u32>,
}

impl CategoryOptions {
    fn media_types(types: &[&str]) -> Self {
        Self {
            media_types: Some(types.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    fn skip() -> Self {
        Self::media_types(&[SKIP])
    }

    fn alternate(mut self, mode: Alternation) -> Self {
        self.alternate = Some(mode);
        self
    }

    fn preferred(mut self, number: u32) -> Self {
        self.preferred_number = Some(number);
        self
    }
}

/// PNG encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveParams {
    pub optimize: bool,
    /// 1 (fastest) to 9 (smallest). Out-of-range values are clamped.
    pub compression_level: i64,
}

impl Default for SaveParams {
    fn default() -> Self {
        Self {
            optimize: false,
            compression_level: 6,
        }
    }
}

impl SaveParams {
    pub fn level(&self) -> u8 {
        self.compression_level.clamp(1, 9) as u8
    }
}

/// A named bundle of thumbnail selection and editing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub name: String,
    pub description: String,
    /// LaunchBox region folders in priority order. Empty uses the defaults.
    pub regions: Vec<String>,
    /// Preferred source format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
    pub filter: ResampleFilter,
    pub keep_aspect_ratio: bool,
    /// Recurse into subdirectories of directory inputs.
    pub search_sub_dirs: bool,
    /// Replace thumbnails that already exist.
    pub overwrite: bool,
    pub boxart: CategoryOptions,
    pub title: CategoryOptions,
    pub gameplay: CategoryOptions,
    pub width: SizeChange,
    pub height: SizeChange,
    pub save: SaveParams,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: DEFAULT_PRESET.to_string(),
            description: String::new(),
            regions: Vec::new(),
            format: None,
            filter: ResampleFilter::Nearest,
            keep_aspect_ratio: true,
            search_sub_dirs: false,
            overwrite: false,
            boxart: CategoryOptions::default(),
            title: CategoryOptions::default(),
            gameplay: CategoryOptions::default(),
            width: SizeChange::NoChange,
            height: SizeChange::NoChange,
            save: SaveParams::default(),
        }
    }
}

impl Preset {
    pub fn category(&self, category: MediaCategory) -> &CategoryOptions {
        match category {
            MediaCategory::FrontBoxart => &self.boxart,
            MediaCategory::TitleScreen => &self.title,
            MediaCategory::GameplayScreen => &self.gameplay,
        }
    }

    /// Media types searched for `category`, or `None` when it is skipped.
    pub fn media_types(&self, category: MediaCategory) -> Option<Vec<String>> {
        match &self.category(category).media_types {
            None => Some(
                category
                    .default_labels()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            Some(types) if types.is_empty() => None,
            Some(types) if types.iter().any(|t| t.eq_ignore_ascii_case(SKIP)) => None,
            Some(types) => Some(types.clone()),
        }
    }

    pub fn alternation(&self, category: MediaCategory) -> Alternation {
        self.category(category)
            .alternate
            .unwrap_or(match category {
                MediaCategory::GameplayScreen => Alternation::On,
                _ => Alternation::Off,
            })
    }

    pub fn preferred_number(&self, category: MediaCategory) -> Option<u32> {
        self.category(category).preferred_number
    }

    pub fn size_policy(&self) -> SizePolicy {
        SizePolicy {
            width: self.width,
            height: self.height,
            keep_aspect_ratio: self.keep_aspect_ratio,
            filter: self.filter,
        }
    }
}

const BACK_COVER: &[&str] = &[
    "Box - Back",
    "Box - Back - Reconstructed",
    "Fanart - Box - Back",
    "Screenshot - Game Title",
];

const FRONT_3D: &[&str] = &[
    "Box - 3D",
    "Box - Front",
    "Box - Front - Reconstructed",
    "Fanart - Box - Front",
];

/// Presets shipped with the tool.
pub fn builtin_presets() -> Vec<Preset> {
    let large = Preset {
        height: SizeChange::Downscale(1080),
        filter: ResampleFilter::Bicubic,
        search_sub_dirs: true,
        overwrite: true,
        ..Preset::default()
    };

    vec![
        Preset {
            description: "Default media types and regions, images copied unedited.".to_string(),
            ..Preset::default()
        },
        Preset {
            name: "back-cover".to_string(),
            description: "Front and back boxart with a gameplay image. \
                          Heights downscaled to 1080."
                .to_string(),
            title: CategoryOptions::media_types(BACK_COVER),
            ..large.clone()
        },
        Preset {
            name: "3d-box".to_string(),
            description: "Front (3D) and back boxart with a cart/disc image. \
                          Heights downscaled to 1080."
                .to_string(),
            boxart: CategoryOptions::media_types(FRONT_3D),
            title: CategoryOptions::media_types(BACK_COVER),
            gameplay: CategoryOptions::media_types(&[
                "Cart - Front",
                "Disc",
                "Fanart - Cart - Front",
                "Fanart - Disc",
                "Screenshot - Gameplay",
            ]),
            ..large.clone()
        },
        Preset {
            name: "boxart-only".to_string(),
            description: "Front (3D) boxart only, with height set to 720.".to_string(),
            boxart: CategoryOptions::media_types(FRONT_3D),
            title: CategoryOptions::skip(),
            gameplay: CategoryOptions::skip(),
            height: SizeChange::ChangeTo(720),
            ..large.clone()
        },
        Preset {
            name: "japan".to_string(),
            description: "Front and back boxart with a gameplay image, from Japan \
                          or Asia regions only. Heights downscaled to 1080."
                .to_string(),
            title: CategoryOptions::media_types(BACK_COVER),
            regions: [
                "Japan",
                "Japan, Korea",
                "Asia",
                "Oceania",
                "Korea",
                "Hong Kong",
                "Taiwan",
                "World",
                "United States, Japan",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ..large.clone()
        },
        Preset {
            name: "random-gameplay".to_string(),
            description: "Front and back boxart with a random gameplay image. \
                          Heights downscaled to 1080."
                .to_string(),
            boxart: CategoryOptions::default().alternate(Alternation::On),
            title: CategoryOptions::media_types(BACK_COVER).alternate(Alternation::On),
            gameplay: CategoryOptions::default().alternate(Alternation::Random),
            save: SaveParams {
                optimize: false,
                compression_level: 9,
            },
            ..large.clone()
        },
        Preset {
            name: "bonus-discs".to_string(),
            description: "Fanart boxart with title and gameplay screens for bonus \
                          discs. PNG only, heights downscaled to 720."
                .to_string(),
            boxart: CategoryOptions::media_types(&["Fanart - Box - Front"])
                .alternate(Alternation::On),
            title: CategoryOptions::media_types(&["Screenshot - Game Title"])
                .alternate(Alternation::On)
                .preferred(2),
            gameplay: CategoryOptions::media_types(&["Screenshot - Gameplay"])
                .alternate(Alternation::On)
                .preferred(2),
            format: Some(ImageFormat::Png),
            height: SizeChange::Downscale(720),
            save: SaveParams {
                optimize: false,
                compression_level: 9,
            },
            ..large
        },
    ]
}

/// User presets read from `presets.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    #[serde(default, rename = "preset")]
    pub presets: Vec<Preset>,
}

impl PresetFile {
    /// Load the file at `path`, writing the built-in presets there first if
    /// it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, ThumbsError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let file = Self {
                presets: builtin_presets(),
            };
            file.save_to(path)?;
            log::debug!("Wrote built-in presets to {}", path.display());
            Ok(file)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ThumbsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ThumbsError::file(path, e))?;
        toml::from_str(&contents).map_err(|e| {
            ThumbsError::config(format!("Invalid presets file {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ThumbsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ThumbsError::file(parent, e))?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ThumbsError::config(format!("Failed to serialize presets: {e}")))?;
        std::fs::write(path, contents).map_err(|e| ThumbsError::file(path, e))
    }
}

/// Built-in presets with same-named user presets swapped in, followed by
/// the remaining user presets.
pub fn available_presets(user: &PresetFile) -> Vec<Preset> {
    let mut presets: Vec<Preset> = builtin_presets()
        .into_iter()
        .map(|builtin| {
            user.presets
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(&builtin.name))
                .cloned()
                .unwrap_or(builtin)
        })
        .collect();
    for preset in &user.presets {
        if !presets.iter().any(|p| p.name.eq_ignore_ascii_case(&preset.name)) {
            presets.push(preset.clone());
        }
    }
    presets
}

/// Look a preset up by name, case-insensitively.
pub fn find_preset(user: &PresetFile, name: &str) -> Result<Preset, ThumbsError> {
    available_presets(user)
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ThumbsError::not_found(format!("preset '{name}'")))
}

/// File extensions (lowercase, without the dot) treated as game files when
/// scanning directories.
pub fn default_game_extensions() -> Vec<String> {
    [
        // Disc images
        "chd", "cue", "iso", "mds", "nrg", "toc",
        // Generic
        "bin", "rom",
        // Archives
        "7z", "rar", "zip",
        // Playlists
        "m3u",
        // Platform-specific
        "nes", "sfc", "smc", "n64", "v64", "z64", "gcm", "wad", "wbfs", "gb", "gbc", "gba",
        "nds", "3ds", "pce", "sms", "32x", "md", "cdi", "gdi", "gg",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Options that apply regardless of the selected preset. Stored in the
/// `[options]` table of `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalOptions {
    /// Never fall back to images from regions other than the detected one.
    pub detected_regions_only: bool,
    pub always_prioritize_region_free: bool,
    /// Only consider playlists whose name is equivalent to the game's
    /// platform.
    pub match_platforms_before_search: bool,
    pub game_extensions: Vec<String>,
    /// Extra or replacement platform equivalences, LaunchBox platform ->
    /// RetroArch playlist names.
    pub platforms: BTreeMap<String, Vec<String>>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            detected_regions_only: false,
            always_prioritize_region_free: false,
            match_platforms_before_search: true,
            game_extensions: default_game_extensions(),
            platforms: BTreeMap::new(),
        }
    }
}

/// Everything the engine needs for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub preset: Preset,
    pub regions: RegionPolicy,
    pub platforms: PlatformEquivalence,
    pub match_platforms_before_search: bool,
    pub game_extensions: Vec<String>,
}

impl RunConfig {
    pub fn new(preset: Preset, options: &GlobalOptions) -> Self {
        let mut regions = RegionPolicy {
            detected_regions_only: options.detected_regions_only,
            always_prioritize_region_free: options.always_prioritize_region_free,
            ..RegionPolicy::default()
        };
        if !preset.regions.is_empty() {
            regions.priority = preset.regions.clone();
        }

        let mut platforms = PlatformEquivalence::default();
        for (source, playlists) in &options.platforms {
            platforms.insert(source.clone(), playlists.clone());
        }

        Self {
            preset,
            regions,
            platforms,
            match_platforms_before_search: options.match_platforms_before_search,
            game_extensions: options
                .game_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether a file found while scanning a directory is a game file.
    pub fn is_game_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.game_extensions.iter().any(|g| *g == ext)
            })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
