use std::path::Path;

/// Errors from reading LaunchBox or RetroArch data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("XML parse error in {path}: {source}")]
    Xml {
        path: String,
        source: quick_xml::Error,
    },

    #[error("Invalid playlist {path}: {source}")]
    Playlist {
        path: String,
        source: serde_json::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn xml(path: &Path, source: quick_xml::Error) -> Self {
        Self::Xml {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Whether this error means a required file or directory is missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
