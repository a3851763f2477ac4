//! Registration configuration

use crate::error::ConfigError;
use cg_graph::ReplacementPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Knobs for one graph build
///
/// ```toml
/// replacement = "keep-overloads"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistrationConfig {
    /// How same-name entries of a container collection are handled
    pub replacement: ReplacementPolicy,
}

impl RegistrationConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, unknown keys or
    /// unknown policy names.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Fixtures are written by the test itself")]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RegistrationConfig::from_toml_str("").unwrap();
        assert_eq!(config.replacement, ReplacementPolicy::LastWriteWins);
    }

    #[test]
    fn test_keep_overloads() {
        let config = RegistrationConfig::from_toml_str(r#"replacement = "keep-overloads""#).unwrap();
        assert_eq!(config.replacement, ReplacementPolicy::KeepOverloads);
    }

    #[test]
    fn test_rejects_unknown_keys_and_values() {
        assert!(matches!(
            RegistrationConfig::from_toml_str("overloads = true"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RegistrationConfig::from_toml_str(r#"replacement = "first-wins""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"replacement = "last-write-wins""#).unwrap();

        let config = RegistrationConfig::load(file.path()).unwrap();
        assert_eq!(config, RegistrationConfig::default());

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            RegistrationConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }
}
