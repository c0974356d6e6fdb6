use std::collections::BTreeMap;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_thumbs_core::MediaCategory;
use retro_thumbs_lib::{
    DEFAULT_LOG_FILE, FileSearch, ImageCodec, PngCodec, RandomChooser, RunConfig, RunEvent,
    RunReport, RunSummary, Runner, SelectionLog, SelectionSession, format_elapsed,
};

use crate::CliError;
use crate::cli_types::RootArgs;
use crate::commands::{load_presets, load_settings, open_launchbox, open_retroarch, select_preset};

pub(crate) struct RunArgs {
    pub paths: Vec<PathBuf>,
    pub preset: Option<String>,
    pub roots: RootArgs,
    pub overwrite: bool,
    pub recursive: bool,
    pub copy_only: bool,
    pub no_log: bool,
    pub log_path: Option<PathBuf>,
}

pub(crate) fn run_thumbnails(args: RunArgs, quiet: bool) -> Result<(), CliError> {
    let settings = load_settings();
    let presets = load_presets();
    let mut preset = select_preset(args.preset.as_deref(), &settings, &presets)?;
    preset.overwrite |= args.overwrite;
    preset.search_sub_dirs |= args.recursive;

    let launchbox = open_launchbox(args.roots.launchbox, &settings, quiet)?;
    let retroarch = open_retroarch(args.roots.retroarch, &settings)?;

    log::info!(
        "Preset: {}",
        preset.name.if_supports_color(Stdout, |t| t.bold()),
    );
    if args.copy_only {
        log::info!("Copy only: PNG artwork is copied unchanged, other formats are skipped");
    }
    log::info!("");

    let config = RunConfig::new(preset, &settings.options);
    let png = PngCodec;
    let codec: Option<&dyn ImageCodec> = if args.copy_only {
        None
    } else {
        Some(&png as &dyn ImageCodec)
    };
    let runner = Runner::new(&config, &launchbox, &retroarch, codec);

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/dim}] {pos}/{len} {msg}")
                .expect("static pattern")
                .progress_chars("=> ")
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let mut session = SelectionSession::new();
    let mut chooser = RandomChooser::from_entropy();
    let mut unmatched = 0usize;
    let result = runner.run(
        &args.paths,
        &mut session,
        &mut chooser,
        &mut |event: RunEvent<'_>| match event {
            RunEvent::FilesCollected { total } => {
                pb.set_length(total as u64);
                pb.set_message("Searching LaunchBox images...");
            }
            RunEvent::Searched { file, result } => {
                pb.inc(1);
                pb.set_message(file.file_name());
                if matches!(result, FileSearch::Unmatched) {
                    unmatched += 1;
                }
            }
            RunEvent::PlaylistsLoaded { total } => {
                pb.set_message(format!("Writing thumbnails ({total} playlists)..."));
            }
            RunEvent::Matched { file, .. } => {
                pb.set_message(file.file_name());
            }
            RunEvent::Materialized { entry } => {
                if entry.outcome.is_error() {
                    pb.suspend(|| {
                        log::warn!(
                            "  {} {} {}: {}",
                            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                            entry.title,
                            entry.category,
                            entry.outcome,
                        );
                    });
                }
            }
        },
    );
    pb.finish_and_clear();
    let summary = result?;

    if summary.games_matched == 0 && session.log().is_empty() {
        log::warn!(
            "{} No game files were found in both LaunchBox and RetroArch",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    print_summary(&summary, session.log(), unmatched);

    if !args.no_log {
        let log_path = args
            .log_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        match RunReport::new(session.log(), &config.preset.name).write_to_file(&log_path) {
            Ok(()) => log::info!("  Log written to {}", log_path.display()),
            Err(e) => log::warn!("Warning: could not write run log: {}", e),
        }
    }
    Ok(())
}

/// Thumbnails saved per category.
fn saved_by_category(log: &SelectionLog) -> BTreeMap<MediaCategory, usize> {
    let mut counts = BTreeMap::new();
    for entry in log.entries().iter().filter(|e| e.outcome.is_saved()) {
        *counts.entry(entry.category).or_insert(0) += 1;
    }
    counts
}

fn print_summary(summary: &RunSummary, log: &SelectionLog, unmatched: usize) {
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Images found in LaunchBox: {}", summary.images_found);
    log::info!(
        "  Game files in LaunchBox and RetroArch: {}",
        summary.games_matched
    );
    log::info!(
        "  {} {} thumbnails saved ({} overwritten, {} duplicates)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.images_saved,
        summary.overwritten,
        summary.duplicates,
    );
    for (category, count) in saved_by_category(log) {
        log::info!(
            "      {}: {}",
            category.display_name().if_supports_color(Stdout, |t| t.cyan()),
            count
        );
    }
    if unmatched > 0 {
        log::warn!("{}", unmatched_line(unmatched));
    }
    if summary.skipped > 0 {
        log::info!(
            "  {} {} skipped",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.skipped,
        );
    }
    if summary.save_errors > 0 {
        log::warn!(
            "  {} {} save errors",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.save_errors,
        );
    }
    if summary.edit_errors > 0 {
        log::warn!(
            "  {} {} edit errors",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.edit_errors,
        );
    }
    log::info!("  Completed in {}", format_elapsed(summary.elapsed));
}

fn unmatched_line(unmatched: usize) -> String {
    format!(
        "  {} {} files not in the LaunchBox library",
        "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        unmatched,
    )
}
