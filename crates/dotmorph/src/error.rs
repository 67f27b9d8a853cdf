//! # DOTMORPH Error Types
//!
//! Only loading configuration and constructing the effect can fail.
//! Frame ticks never return errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up a dotted text effect.
#[derive(Error, Debug)]
pub enum DotMorphError {
    /// Reading a configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for the config schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for DOTMORPH setup operations.
pub type Result<T> = std::result::Result<T, DotMorphError>;
