//! Error types for brhelp configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or validating a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config file was not valid TOML, or did not match the expected shape.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// `help_root` does not exist or is not a directory.
    #[error("help_root does not exist or is not a directory: {path}")]
    HelpRootNotFound {
        /// The configured help root.
        path: PathBuf,
    },

    /// `online_help_base_url` was empty.
    #[error("online_help_base_url must not be empty")]
    EmptyBaseUrl,

    /// `search_limit_default` was zero.
    #[error("search_limit_default must be greater than zero")]
    ZeroSearchLimit,
}
