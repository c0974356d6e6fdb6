use std::path::Path;

use retro_thumbs_catalog::CatalogError;
use thiserror::Error;

/// Errors raised by the thumbnail engine.
#[derive(Debug, Error)]
pub enum ThumbsError {
    /// I/O error outside of a specific file operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a known file
    #[error("I/O error on {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    /// LaunchBox or RetroArch data could not be read
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The image codec failed to read or write an image
    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// A game title could not be turned into a file-name pattern
    #[error("Invalid title pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Settings or preset file problem
    #[error("Config error: {0}")]
    Config(String),

    /// A requested size is out of range
    #[error("Invalid image size: {0}")]
    InvalidSize(String),

    /// Named item does not exist (e.g. an unknown preset)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ThumbsError {
    pub fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
