//! Loading a [`crate::Config`] from a TOML file on disk.

use std::fs;
use std::path::Path;

use crate::{ConfigError, RawConfig};

/// Reads and parses a TOML config file into a [`RawConfig`].
///
/// All fields of [`RawConfig`] are optional, so a partial file — or an
/// empty one — is not an error; missing fields fall back to
/// [`crate::Config`]'s defaults when the raw config is resolved.
pub fn load_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn loads_a_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("brhelp.toml");
        fs::write(
            &path,
            r#"
            help_root = "/vendor/help"
            db_path = "/var/lib/brhelp/index"
            force_rebuild = true
            as_version = "4"
            online_help_base_url = "https://help.example.com/"
            search_limit_default = 25
            "#,
        )
        .unwrap();

        let raw = load_raw(&path).unwrap();
        assert_eq!(raw.help_root.as_deref(), Some("/vendor/help"));
        assert_eq!(raw.force_rebuild, Some(true));
        assert_eq!(raw.search_limit_default, Some(25));
    }

    #[test]
    fn loads_an_empty_file_as_all_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("brhelp.toml");
        fs::write(&path, "").unwrap();

        let raw = load_raw(&path).unwrap();
        assert!(raw.help_root.is_none());
        assert!(raw.search_limit_default.is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("does_not_exist.toml");
        assert!(matches!(load_raw(&path), Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("brhelp.toml");
        fs::write(&path, "this is not [ valid toml").unwrap();
        assert!(matches!(load_raw(&path), Err(ConfigError::ParseToml { .. })));
    }
}
