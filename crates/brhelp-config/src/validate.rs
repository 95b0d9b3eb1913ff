//! Configuration validation.
//!
//! Validation runs after defaults have been applied, so every field is
//! already populated; it only rejects values that would make the rest of
//! the crate unusable (a help root that doesn't exist, a URL prefix or
//! search limit that can't produce a sensible result).

use crate::{Config, ConfigError};

/// Validates a fully-resolved config.
///
/// Checks `help_root` exists and is a directory, `online_help_base_url` is
/// non-empty, and `search_limit_default` is non-zero. The search index
/// path (`db_path`) is not validated here — it need not exist yet; the
/// search engine creates it on first build.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if !config.help_root.is_dir() {
        return Err(ConfigError::HelpRootNotFound {
            path: config.help_root.clone(),
        });
    }
    if config.online_help_base_url.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if config.search_limit_default == 0 {
        return Err(ConfigError::ZeroSearchLimit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn base_config(help_root: PathBuf) -> Config {
        Config {
            help_root,
            ..Config::defaults_with_help_root(PathBuf::new())
        }
    }

    #[test]
    fn accepts_a_well_formed_config() {
        let temp = TempDir::new().unwrap();
        let config = base_config(temp.path().to_path_buf());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_missing_help_root() {
        let config = base_config(PathBuf::from("/does/not/exist/anywhere"));
        assert!(matches!(validate(&config), Err(ConfigError::HelpRootNotFound { .. })));
    }

    #[test]
    fn rejects_help_root_that_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("not_a_dir");
        std::fs::write(&file_path, b"x").unwrap();
        let config = base_config(file_path);
        assert!(matches!(validate(&config), Err(ConfigError::HelpRootNotFound { .. })));
    }

    #[test]
    fn rejects_empty_base_url() {
        let temp = TempDir::new().unwrap();
        let mut config = base_config(temp.path().to_path_buf());
        config.online_help_base_url = String::new();
        assert!(matches!(validate(&config), Err(ConfigError::EmptyBaseUrl)));
    }

    #[test]
    fn rejects_zero_search_limit() {
        let temp = TempDir::new().unwrap();
        let mut config = base_config(temp.path().to_path_buf());
        config.search_limit_default = 0;
        assert!(matches!(validate(&config), Err(ConfigError::ZeroSearchLimit)));
    }
}
