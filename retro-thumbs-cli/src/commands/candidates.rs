use std::collections::HashSet;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_thumbs_catalog::SourceCatalog;
use retro_thumbs_core::{GameFile, MediaCategory};
use retro_thumbs_lib::{
    Alternation, LocateRequest, RandomChooser, RunConfig, TitlePattern, enumerate, locate,
};

use crate::CliError;
use crate::commands::{load_presets, load_settings, open_launchbox, select_preset};

/// Show the images each category could use for one game file.
pub(crate) fn run_candidates(
    file: PathBuf,
    preset: Option<String>,
    launchbox: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = load_settings();
    let presets = load_presets();
    let preset = select_preset(preset.as_deref(), &settings, &presets)?;
    let catalog = open_launchbox(launchbox, &settings, quiet)?;
    let config = RunConfig::new(preset, &settings.options);

    let file = GameFile::new(std::path::absolute(&file)?);
    let entry = catalog.find_entry_by_path(file.path()).ok_or_else(|| {
        CliError::other(format!("{} is not in the LaunchBox library", file.path().display()))
    })?;
    let resolution = config
        .regions
        .resolve(file.stem(), entry.region.as_deref(), &entry.platform);

    log::info!("");
    log::info!(
        "{} ({})",
        entry.title.if_supports_color(Stdout, |t| t.bold()),
        entry.platform.if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  Region code: {}",
        resolution.detected_code.as_deref().unwrap_or("none")
    );
    log::info!("  Region order: {}", resolution.priority.join(" > "));

    let Some(folders) = catalog.platforms().get(&entry.platform) else {
        log::warn!(
            "{} No media folders configured for {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            entry.platform,
        );
        return Ok(());
    };

    let pattern = TitlePattern::new(&entry.title)?;
    let no_exclusions = HashSet::new();
    let mut chooser = RandomChooser::from_entropy();

    for category in MediaCategory::ALL {
        log::info!("");
        let Some(media_types) = config.preset.media_types(category) else {
            log::info!(
                "{} {}",
                category.if_supports_color(Stdout, |t| t.bold()),
                "(skipped)".if_supports_color(Stdout, |t| t.dimmed()),
            );
            continue;
        };
        log::info!("{}", category.if_supports_color(Stdout, |t| t.bold()));

        let alternation = config.preset.alternation(category);
        let request = LocateRequest {
            pattern: &pattern,
            regions: &resolution.priority,
            exclude: &no_exclusions,
            format: config.preset.format,
            randomize: alternation == Alternation::Random,
            preferred_number: config.preset.preferred_number(category),
            codec_available: true,
        };

        let mut first_pick = None;
        let mut total = 0;
        for media_type in &media_types {
            for folder in folders.iter().filter(|f| f.media_type == *media_type) {
                let found = enumerate(&folder.dir, &pattern, &resolution.priority, &no_exclusions);
                if found.is_empty() {
                    continue;
                }
                if first_pick.is_none() && alternation != Alternation::Random {
                    first_pick = locate(&folder.dir, &request, &mut chooser);
                }
                log::info!("  {}", media_type.if_supports_color(Stdout, |t| t.cyan()));
                for candidate in &found {
                    let marker = if first_pick.as_ref() == Some(&candidate.path) {
                        format!("{}", "\u{2714}".if_supports_color(Stdout, |t| t.green()))
                    } else {
                        " ".to_string()
                    };
                    log::info!(
                        "   {} [{}] {} ({}{})",
                        marker,
                        candidate.region,
                        candidate
                            .path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                        candidate.format,
                        candidate
                            .number
                            .map(|n| format!(", #{n}"))
                            .unwrap_or_default(),
                    );
                }
                total += found.len();
            }
        }
        if total == 0 {
            log::info!("  {}", "no images".if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}
