//! retro-thumbs CLI
//!
//! Command-line interface for copying LaunchBox artwork into RetroArch
//! thumbnail folders.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::{Cli, Commands, ConfigAction};
use crate::commands::run::RunArgs;
pub(crate) use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Run {
            paths,
            preset,
            roots,
            overwrite,
            recursive,
            copy_only,
            no_log,
            log_path,
        } => commands::run::run_thumbnails(
            RunArgs {
                paths,
                preset,
                roots,
                overwrite,
                recursive,
                copy_only,
                no_log,
                log_path,
            },
            cli.quiet,
        ),
        Commands::Candidates {
            file,
            preset,
            launchbox,
        } => commands::candidates::run_candidates(file, preset, launchbox, cli.quiet),
        Commands::Presets => {
            commands::presets::run_presets();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::SetLaunchbox { dir } => commands::config::run_config_set_launchbox(dir),
            ConfigAction::SetRetroarch { dir } => commands::config::run_config_set_retroarch(dir),
            ConfigAction::SetPreset { name } => commands::config::run_config_set_preset(name),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
