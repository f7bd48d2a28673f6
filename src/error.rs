//! Error types for mccolors

use thiserror::Error;

/// Result type alias for mccolors operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
///
/// The markup core itself is total; these errors come from the
/// configuration loader, the renderers and the command line.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    #[error("{0}")]
    Message(String),
}

/// Hex color parse failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("expected 6 hex digits, found {0}")]
    InvalidLength(usize),

    #[error("invalid hex digits in {0:?}")]
    InvalidHex(String),
}
