//! Error types used by the crate.

use thiserror::Error;

/// Quakemap error type.
#[derive(Debug, Error)]
pub enum QuakeMapError {
    /// Network failure while loading data.
    #[error("failed to load data")]
    IO,
    /// Server answered with a non-success status.
    #[error("server responded with status {0}")]
    Http(u16),
    /// Error decoding data.
    #[error("failed to decode data: {0}")]
    Decoding(String),
    /// Image decoding error.
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] image::ImageError),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

impl From<reqwest::Error> for QuakeMapError {
    fn from(value: reqwest::Error) -> Self {
        log::debug!("Request failed: {value}");
        Self::IO
    }
}

impl From<geojson::Error> for QuakeMapError {
    fn from(value: geojson::Error) -> Self {
        Self::Decoding(value.to_string())
    }
}
