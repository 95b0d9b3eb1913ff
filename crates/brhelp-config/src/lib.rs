//! Configuration for brhelp.
//!
//! A [`Config`] is a plain, fully-resolved struct: one TOML file in, one
//! struct out, every optional field backed by a documented default. There
//! is no multi-file merge or discovery walk here — the embedding binary
//! decides which file to load (or builds a [`Config`] directly from its
//! own CLI flags / environment) and hands it to [`brhelp_index`] and
//! [`brhelp_facade`] as an already-validated value.

#![warn(missing_docs)]

mod error;
mod parse;
mod validate;

use std::path::{Path, PathBuf};

pub use error::ConfigError;
use serde::Deserialize;

/// Default on-disk location of the search index, relative to nothing in
/// particular — callers are expected to override this via config or CLI
/// flag; it exists so a [`Config`] can always be constructed with defaults.
pub const DEFAULT_DB_PATH: &str = ".brhelp-index";

/// Default product version string embedded in generated online help URLs.
pub const DEFAULT_AS_VERSION: &str = "4";

/// Default prefix for derived online help URLs.
pub const DEFAULT_ONLINE_HELP_BASE_URL: &str = "https://help.br-automation.com/#/en/4/";

/// Default result count when a caller omits `limit` from `search_help`.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Fully-resolved brhelp configuration.
///
/// Every field is populated — optional fields in the TOML source fall back
/// to the `DEFAULT_*` constants above during [`Config::load`] /
/// [`Config::resolve`], so downstream code never has to think about
/// missingness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory containing `brhelpcontent.xml` and the referenced HTML pages.
    pub help_root: PathBuf,
    /// On-disk location of the persistent search index.
    pub db_path: PathBuf,
    /// If true, the search engine rebuilds its index regardless of the
    /// stored source fingerprint.
    pub force_rebuild: bool,
    /// Product version string, embedded in `online_help_url`.
    pub as_version: String,
    /// Prefix for derived online help URLs.
    pub online_help_base_url: String,
    /// Default result count when a caller omits `limit` from `search_help`.
    pub search_limit_default: usize,
}

/// Configuration as deserialized directly from TOML, before defaults are applied.
///
/// Every field is optional so a caller may supply only the options that
/// differ from the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// See [`Config::help_root`].
    pub help_root: Option<String>,
    /// See [`Config::db_path`].
    pub db_path: Option<String>,
    /// See [`Config::force_rebuild`].
    pub force_rebuild: Option<bool>,
    /// See [`Config::as_version`].
    pub as_version: Option<String>,
    /// See [`Config::online_help_base_url`].
    pub online_help_base_url: Option<String>,
    /// See [`Config::search_limit_default`].
    pub search_limit_default: Option<usize>,
}

impl Config {
    /// Loads a config from a TOML file at `path`, applies defaults for any
    /// field the file omits, and validates the result.
    ///
    /// `help_root` in the TOML file is resolved relative to nothing special
    /// (an absolute or cwd-relative path, as written); validation (§
    /// [`validate::validate`]) requires it to exist once resolved.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse::load_raw(path)?;
        let config = Self::resolve(raw);
        validate::validate(&config)?;
        Ok(config)
    }

    /// Applies defaults to a [`RawConfig`], filling in any field the source
    /// TOML omitted. Does not validate — callers that need a config
    /// guaranteed consistent with the filesystem should go through
    /// [`Config::load`] or call [`Config::validate`] themselves.
    pub fn resolve(raw: RawConfig) -> Self {
        Self {
            help_root: raw.help_root.map(PathBuf::from).unwrap_or_default(),
            db_path: raw.db_path.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            force_rebuild: raw.force_rebuild.unwrap_or(false),
            as_version: raw.as_version.unwrap_or_else(|| DEFAULT_AS_VERSION.to_string()),
            online_help_base_url: raw
                .online_help_base_url
                .unwrap_or_else(|| DEFAULT_ONLINE_HELP_BASE_URL.to_string()),
            search_limit_default: raw.search_limit_default.unwrap_or(DEFAULT_SEARCH_LIMIT),
        }
    }

    /// Re-runs validation against the current field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self)
    }

    /// Builds a config with every default applied except `help_root`, for
    /// tests and callers that already know the directory they want to index.
    pub fn defaults_with_help_root(help_root: PathBuf) -> Self {
        Self::resolve(RawConfig {
            help_root: Some(help_root.to_string_lossy().into_owned()),
            ..RawConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn resolve_applies_defaults_to_missing_fields() {
        let config = Config::resolve(RawConfig::default());
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.force_rebuild, false);
        assert_eq!(config.as_version, DEFAULT_AS_VERSION);
        assert_eq!(config.online_help_base_url, DEFAULT_ONLINE_HELP_BASE_URL);
        assert_eq!(config.search_limit_default, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn resolve_keeps_explicit_values() {
        let raw = RawConfig {
            db_path: Some("/custom/index".to_string()),
            force_rebuild: Some(true),
            search_limit_default: Some(5),
            ..RawConfig::default()
        };
        let config = Config::resolve(raw);
        assert_eq!(config.db_path, PathBuf::from("/custom/index"));
        assert!(config.force_rebuild);
        assert_eq!(config.search_limit_default, 5);
    }

    #[test]
    fn load_reads_defaults_and_validates() {
        let temp = TempDir::new().unwrap();
        let help_root = temp.path().join("help");
        fs::create_dir_all(&help_root).unwrap();

        let config_path = temp.path().join("brhelp.toml");
        fs::write(
            &config_path,
            format!(r#"help_root = "{}""#, help_root.display()),
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.help_root, help_root);
        assert_eq!(config.search_limit_default, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn load_fails_validation_for_missing_help_root() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("brhelp.toml");
        fs::write(&config_path, r#"help_root = "/nope/not/here""#).unwrap();

        assert!(matches!(
            Config::load(&config_path),
            Err(ConfigError::HelpRootNotFound { .. })
        ));
    }

    #[test]
    fn rejects_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("brhelp.toml");
        fs::write(&config_path, r#"not_a_real_field = "x""#).unwrap();

        assert!(matches!(Config::load(&config_path), Err(ConfigError::ParseToml { .. })));
    }
}
