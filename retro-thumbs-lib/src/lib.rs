//! The thumbnail engine: finds LaunchBox artwork for game files and writes
//! it into RetroArch's thumbnail tree.

pub mod codec;
pub mod config;
pub mod discover;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod materialize;
pub mod report;
pub mod resize;
pub mod run;
pub mod selection;
pub mod session;
pub mod settings;

pub use codec::{ImageCodec, ImageHandle, PngCodec};
pub use config::{
    Alternation, CategoryOptions, DEFAULT_PRESET, GlobalOptions, Preset, PresetFile, RunConfig,
    SaveParams, available_presets, builtin_presets, find_preset,
};
pub use discover::{FileSearch, ImageSearch, collect_game_files};
pub use error::ThumbsError;
pub use locator::{Candidate, LocateRequest, TitlePattern, enumerate, locate};
pub use matcher::{DestinationIndex, DestinationRecord, find_destinations};
pub use materialize::{ImageEdit, MaterializeOptions, Materialized, SaveOutcome, materialize};
pub use report::{DEFAULT_LOG_FILE, RunReport, RunSummary, format_elapsed};
pub use resize::{ResampleFilter, SizeChange, SizePolicy};
pub use run::{RunEvent, Runner};
pub use selection::{Chooser, RandomChooser, pick_source_index};
pub use session::{RegionBucket, SelectionEntry, SelectionLog, SelectionSession, TitleKey};
pub use settings::{SettingKey, Settings};
