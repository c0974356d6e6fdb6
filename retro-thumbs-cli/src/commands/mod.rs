pub(crate) mod candidates;
pub(crate) mod config;
pub(crate) mod presets;
pub(crate) mod run;

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_thumbs_catalog::{LaunchBoxCatalog, RetroArchCatalog};
use retro_thumbs_lib::settings::{presets_path, resolve_root};
use retro_thumbs_lib::{Preset, PresetFile, Settings, find_preset};

use crate::CliError;

/// Saved settings, or defaults with a warning when the file is unreadable.
pub(crate) fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!(
                "{} Ignoring settings file: {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                e,
            );
            Settings::default()
        }
    }
}

/// User presets, writing the built-in list on first use.
pub(crate) fn load_presets() -> PresetFile {
    match PresetFile::load_or_create(&presets_path()) {
        Ok(presets) => presets,
        Err(e) => {
            log::warn!(
                "{} Using built-in presets only: {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                e,
            );
            PresetFile::default()
        }
    }
}

/// The preset named on the command line, else the saved one.
pub(crate) fn select_preset(
    name: Option<&str>,
    settings: &Settings,
    presets: &PresetFile,
) -> Result<Preset, CliError> {
    let name = name.unwrap_or_else(|| settings.preset_name());
    Ok(find_preset(presets, name)?)
}

pub(crate) fn spinner(quiet: bool, msg: &'static str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub(crate) fn open_launchbox(
    cli_root: Option<PathBuf>,
    settings: &Settings,
    quiet: bool,
) -> Result<LaunchBoxCatalog, CliError> {
    let root = resolve_root(cli_root, settings.launchbox_root.as_deref()).ok_or_else(|| {
        CliError::config(
            "LaunchBox folder not set. Pass --launchbox or run \
             'retro-thumbs config set-launchbox DIR'.",
        )
    })?;
    let pb = spinner(quiet, "Reading LaunchBox library...");
    let catalog = LaunchBoxCatalog::open(&root);
    pb.finish_and_clear();
    let catalog = catalog?;
    log::info!(
        "{} LaunchBox: {} ({} games)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.root().display(),
        catalog.entry_count(),
    );
    Ok(catalog)
}

pub(crate) fn open_retroarch(
    cli_root: Option<PathBuf>,
    settings: &Settings,
) -> Result<RetroArchCatalog, CliError> {
    let root = resolve_root(cli_root, settings.retroarch_root.as_deref()).ok_or_else(|| {
        CliError::config(
            "RetroArch folder not set. Pass --retroarch or run \
             'retro-thumbs config set-retroarch DIR'.",
        )
    })?;
    let catalog = RetroArchCatalog::open(&root)?;
    log::info!(
        "{} RetroArch: {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.root().display(),
    );
    Ok(catalog)
}
