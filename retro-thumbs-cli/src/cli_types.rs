//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "retro-thumbs")]
#[command(
    about = "Copy LaunchBox artwork into RetroArch thumbnail folders",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the two libraries live. Falls back to `settings.toml`.
#[derive(Args, Clone, Default)]
pub(crate) struct RootArgs {
    /// LaunchBox installation folder (or LaunchBox.exe)
    #[arg(long)]
    pub launchbox: Option<PathBuf>,

    /// RetroArch installation folder (containing retroarch.cfg)
    #[arg(long)]
    pub retroarch: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Find artwork for game files and write RetroArch thumbnails
    Run {
        /// Game files or folders of game files
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Preset to use instead of the saved one
        #[arg(short, long)]
        preset: Option<String>,

        #[command(flatten)]
        roots: RootArgs,

        /// Replace thumbnails that already exist
        #[arg(long)]
        overwrite: bool,

        /// Search subfolders of folder arguments
        #[arg(short, long)]
        recursive: bool,

        /// Copy PNG artwork unchanged; skip anything needing conversion
        #[arg(long)]
        copy_only: bool,

        /// Disable the run log file
        #[arg(long)]
        no_log: bool,

        /// Run log location (default: ./retro-thumbs.log)
        #[arg(long)]
        log_path: Option<PathBuf>,
    },

    /// Show every image that could be used for one game file
    Candidates {
        /// The game file
        file: PathBuf,

        /// Preset whose media types and regions are searched
        #[arg(short, long)]
        preset: Option<String>,

        /// LaunchBox installation folder (or LaunchBox.exe)
        #[arg(long)]
        launchbox: Option<PathBuf>,
    },

    /// List built-in and user presets
    Presets,

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file
    Show,

    /// Save the LaunchBox installation folder
    SetLaunchbox { dir: PathBuf },

    /// Save the RetroArch installation folder
    SetRetroarch { dir: PathBuf },

    /// Save the preset used by `run`
    SetPreset { name: String },

    /// Print the settings file path
    Path,
}
