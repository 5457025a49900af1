//! Error types for spark-folio.
//!
//! Only the loading and terminal layers can fail. The typewriter and
//! holographic card behaviors are total and never produce errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading content/config or driving the terminal.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The content file is not valid TOML or is missing required records.
    #[error("invalid content file {path}: {source}")]
    ContentParse {
        /// Where the content came from (`<embedded>` for the built-in file).
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// The settings file is not valid TOML.
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// A theme override could not be parsed as a color.
    #[error("invalid color for theme.{key}: {value:?}")]
    InvalidColor {
        /// Theme key being overridden.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The layout engine rejected the node tree.
    #[error("layout failed: {0}")]
    Layout(String),

    /// A `--snapshot` argument was not of the form `WxH` or `WxH@ms`.
    #[error("invalid snapshot geometry {0:?}, expected WIDTHxHEIGHT[@MS]")]
    InvalidSnapshot(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FolioError>;

impl From<taffy::TaffyError> for FolioError {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Layout(err.to_string())
    }
}
