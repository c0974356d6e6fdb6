use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_thumbs_lib::settings::{
    SettingKey, load_settings_string, save_setting, settings_path,
};

use crate::CliError;
use crate::commands::{load_presets, load_settings, select_preset};

/// Show the settings file and the values resolved from it.
pub(crate) fn run_config_show() {
    let path = settings_path();
    log::info!(
        "{}",
        "retro-thumbs Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            format!("{}", "(exists)".if_supports_color(Stdout, |t| t.green()))
        } else {
            format!("{}", "(not found)".if_supports_color(Stdout, |t| t.dimmed()))
        },
    );
    log::info!("");

    let settings = load_settings();
    let show = |name: &str, value: Option<String>| match value {
        Some(v) => log::info!("  {:<10} {}", name, v),
        None => log::info!(
            "  {:<10} {}",
            name,
            "not set".if_supports_color(Stdout, |t| t.dimmed())
        ),
    };
    show(
        "launchbox",
        settings
            .launchbox_root
            .as_ref()
            .map(|p| p.display().to_string()),
    );
    show(
        "retroarch",
        settings
            .retroarch_root
            .as_ref()
            .map(|p| p.display().to_string()),
    );
    show("preset", Some(settings.preset_name().to_string()));

    if let Some(contents) = load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

fn saved(what: &str, value: &str) {
    log::info!(
        "{} {} saved: {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        what,
        value.if_supports_color(Stdout, |t| t.cyan()),
    );
}

fn save_dir(key: SettingKey, what: &str, dir: PathBuf) -> Result<(), CliError> {
    let dir = std::path::absolute(&dir)?;
    if !dir.exists() {
        log::warn!(
            "{} {} does not exist yet",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            dir.display(),
        );
    }
    let value = dir.to_string_lossy();
    save_setting(key, Some(&*value))?;
    saved(what, &value);
    Ok(())
}

pub(crate) fn run_config_set_launchbox(dir: PathBuf) -> Result<(), CliError> {
    save_dir(SettingKey::LaunchBoxRoot, "LaunchBox folder", dir)
}

pub(crate) fn run_config_set_retroarch(dir: PathBuf) -> Result<(), CliError> {
    save_dir(SettingKey::RetroArchRoot, "RetroArch folder", dir)
}

/// Save the preset used by `run`, after checking that it exists.
pub(crate) fn run_config_set_preset(name: String) -> Result<(), CliError> {
    let preset = select_preset(Some(name.as_str()), &load_settings(), &load_presets())?;
    save_setting(SettingKey::Preset, Some(preset.name.as_str()))?;
    saved("Preset", &preset.name);
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}
