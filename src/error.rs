//! Crate-level error types.

use std::fmt;

/// Errors produced by the tileframe crate.
#[derive(Debug)]
pub enum TilesError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but violate a camera or framing invariant.
    InvalidOptions(String),
    /// Tileset manifest could not be parsed or has no usable root.
    Manifest(String),
    /// Remote tileset manifest could not be fetched.
    Fetch(String),
    /// GPU context or presentation failure.
    Gpu(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TilesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::Manifest(msg) => write!(f, "tileset manifest error: {msg}"),
            Self::Fetch(msg) => write!(f, "tileset fetch error: {msg}"),
            Self::Gpu(msg) => write!(f, "GPU error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TilesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TilesError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TilesError {
    fn from(e: serde_json::Error) -> Self {
        Self::Manifest(e.to_string())
    }
}
