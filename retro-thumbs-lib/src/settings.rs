//! Persistent settings (catalog roots, selected preset, global options).
//!
//! The CLI reads everything from `~/.config/retro-thumbs/settings.toml`:
//!
//! ```toml
//! [paths]
//! launchbox = "/games/LaunchBox"
//! retroarch = "/games/RetroArch"
//!
//! [run]
//! preset = "back-cover"
//!
//! [options]
//! detected_regions_only = false
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_PRESET, GlobalOptions};
use crate::error::ThumbsError;

/// Directory holding `settings.toml` and `presets.toml`.
pub fn config_dir() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("retro-thumbs")
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Canonical path to the user presets file.
pub fn presets_path() -> PathBuf {
    config_dir().join("presets.toml")
}

/// A key that `save_setting` knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    LaunchBoxRoot,
    RetroArchRoot,
    Preset,
}

impl SettingKey {
    fn location(self) -> (&'static str, &'static str) {
        match self {
            Self::LaunchBoxRoot => ("paths", "launchbox"),
            Self::RetroArchRoot => ("paths", "retroarch"),
            Self::Preset => ("run", "preset"),
        }
    }
}

/// The values the engine cares about from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub launchbox_root: Option<PathBuf>,
    pub retroarch_root: Option<PathBuf>,
    pub preset: Option<String>,
    pub options: GlobalOptions,
}

impl Settings {
    pub fn load() -> Result<Self, ThumbsError> {
        Self::load_from(&settings_path())
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ThumbsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ThumbsError::file(path, e)),
        };
        let doc: toml::Value = contents.parse().map_err(|e| {
            ThumbsError::config(format!("Invalid settings file {}: {}", path.display(), e))
        })?;

        let string_at = |table: &str, key: &str| {
            doc.get(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let options = match doc.get("options") {
            Some(value) => value.clone().try_into().map_err(|e| {
                ThumbsError::config(format!("Invalid [options] in {}: {}", path.display(), e))
            })?,
            None => GlobalOptions::default(),
        };

        Ok(Self {
            launchbox_root: string_at("paths", "launchbox").map(PathBuf::from),
            retroarch_root: string_at("paths", "retroarch").map(PathBuf::from),
            preset: string_at("run", "preset"),
            options,
        })
    }

    /// The selected preset name, or the default preset.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or(DEFAULT_PRESET)
    }
}

/// Resolve a root with a CLI override taking priority over the saved value.
pub fn resolve_root(cli_override: Option<PathBuf>, saved: Option<&Path>) -> Option<PathBuf> {
    cli_override.or_else(|| saved.map(Path::to_path_buf))
}

/// Save (or clear) one setting in `settings.toml`.
pub fn save_setting(key: SettingKey, value: Option<&str>) -> io::Result<()> {
    save_setting_to(&settings_path(), key, value)
}

/// Save (or clear) one setting in the file at `settings`.
///
/// Uses `toml::Value` for a surgical update so unrelated tables such as
/// `[options]` are preserved.
pub fn save_setting_to(settings: &Path, key: SettingKey, value: Option<&str>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let (section, field) = key.location();
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let entry = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section_table = entry
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

    match value {
        Some(v) => {
            section_table.insert(field.to_string(), toml::Value::String(v.to_string()));
        }
        None => {
            section_table.remove(field);
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    load_settings_string_from(&settings_path())
}

pub fn load_settings_string_from(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.preset_name(), DEFAULT_PRESET);
        assert!(settings.options.match_platforms_before_search);
    }

    #[test]
    fn test_save_preserves_other_tables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cfg/settings.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "[options]\ndetected_regions_only = true\ngame_extensions = [\"iso\"]\n",
        )
        .unwrap();

        save_setting_to(&path, SettingKey::LaunchBoxRoot, Some("/lb")).unwrap();
        save_setting_to(&path, SettingKey::Preset, Some("japan")).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.launchbox_root, Some(PathBuf::from("/lb")));
        assert_eq!(settings.retroarch_root, None);
        assert_eq!(settings.preset_name(), "japan");
        assert!(settings.options.detected_regions_only);
        assert_eq!(settings.options.game_extensions, vec!["iso".to_string()]);
        assert!(!path.with_extension("toml.tmp").exists());

        save_setting_to(&path, SettingKey::Preset, None).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().preset, None);
        assert!(load_settings_string_from(&path).unwrap().contains("launchbox"));
    }

    #[test]
    fn test_invalid_options_are_config_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[options]\ndetected_regions_only = \"yes\"\n").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(ThumbsError::Config(_))
        ));
    }

    #[test]
    fn test_cli_root_wins() {
        assert_eq!(
            resolve_root(Some(PathBuf::from("/cli")), Some(Path::new("/saved"))),
            Some(PathBuf::from("/cli"))
        );
        assert_eq!(
            resolve_root(None, Some(Path::new("/saved"))),
            Some(PathBuf::from("/saved"))
        );
        assert_eq!(resolve_root(None, None), None);
    }
}
