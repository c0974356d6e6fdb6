//! Catalog adapters: the LaunchBox library that supplies game metadata and
//! artwork, and the RetroArch playlists that receive thumbnails.

pub mod error;
pub mod launchbox;
pub mod provider;
pub mod retroarch;
pub mod types;

pub use error::CatalogError;
pub use launchbox::LaunchBoxCatalog;
pub use provider::{
    DestinationCatalog, MemoryDestinationCatalog, MemorySourceCatalog, SourceCatalog,
};
pub use retroarch::RetroArchCatalog;
pub use types::{MediaFolder, PlaylistEntry, SourceEntry};
