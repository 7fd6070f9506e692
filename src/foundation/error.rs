use std::path::PathBuf;

/// Result alias used across the crate.
pub type StampResult<T> = Result<T, StampError>;

/// Every failure a stamping run can surface.
///
/// `NoLocationData`, `TileFetch`, `InvalidOption`, `FileNotFound`, `Metadata` and `Codec` abort a
/// run. `Geocoding` and `AssetMissing` are produced by collaborators but absorbed at the point of
/// use (the caption loses its address lines, the procedural renderer takes over).
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// The photo's metadata carries no GPS coordinates.
    #[error("no GPS location data in '{}'", path.display())]
    NoLocationData {
        /// Photo that was inspected.
        path: PathBuf,
    },

    /// A map tile could not be fetched or decoded after all retries.
    #[error("failed to fetch map tile {url}: {reason}")]
    TileFetch {
        /// Fully expanded tile URL.
        url: String,
        /// Last failure observed.
        reason: String,
    },

    /// Reverse geocoding failed.
    #[error("geocoding error: {0}")]
    Geocoding(String),

    /// An SVG asset file is absent.
    #[error("asset not found: '{}'", path.display())]
    AssetMissing {
        /// Expected asset location.
        path: PathBuf,
    },

    /// A configuration value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The source photo does not exist.
    #[error("file not found: '{}'", path.display())]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// The metadata collaborator failed.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Image decoding, encoding or rasterization failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped I/O or third-party failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    pub fn no_location(path: impl Into<PathBuf>) -> Self {
        Self::NoLocationData { path: path.into() }
    }

    pub fn tile_fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TileFetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn geocoding(msg: impl Into<String>) -> Self {
        Self::Geocoding(msg.into())
    }

    pub fn asset_missing(path: impl Into<PathBuf>) -> Self {
        Self::AssetMissing { path: path.into() }
    }

    pub fn invalid_option(msg: impl Into<String>) -> Self {
        Self::InvalidOption(msg.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Whether the run must stop when this error reaches the orchestrator.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Geocoding(_) | Self::AssetMissing { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
