//! Domain types shared by the retro-thumbs crates: release regions,
//! platform name equivalence, thumbnail slots, and game files.

pub mod game_file;
pub mod media;
pub mod names;
pub mod platform;
pub mod region;

pub use game_file::{GameFile, canonical_entry_path};
pub use media::{ImageFormat, MediaCategory};
pub use names::{launchbox_image_stem, thumbnail_file_name};
pub use platform::PlatformEquivalence;
pub use region::{REGION_FREE, RegionCodeGroup, RegionPolicy, RegionResolution};
