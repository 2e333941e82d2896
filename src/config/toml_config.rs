use crate::utils::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file layered under the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub destination: DestinationConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationConfig {
    pub migrate_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    pub batch_size: Option<usize>,
    pub delay_seconds: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MigrationError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MigrationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable, leaving
    /// unknown variables untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MigrationError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_settings_file() {
        let toml_content = r#"
[source]
input_path = "exports/keys.txt"

[destination]
migrate_path = "/migrate"
timeout_seconds = 30

[upload]
batch_size = 25
delay_seconds = 0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.input_path.as_deref(), Some("exports/keys.txt"));
        assert_eq!(config.destination.migrate_path.as_deref(), Some("/migrate"));
        assert_eq!(config.destination.timeout_seconds, Some(30));
        assert_eq!(config.upload.batch_size, Some(25));
        assert_eq!(config.upload.delay_seconds, Some(0));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let config = TomlConfig::from_toml_str("[upload]\nbatch_size = 5\n").unwrap();

        assert!(config.source.input_path.is_none());
        assert!(config.destination.migrate_path.is_none());
        assert_eq!(config.upload.batch_size, Some(5));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KEY_MIGRATE_TEST_INPUT", "/data/export.txt");

        let toml_content = r#"
[source]
input_path = "${KEY_MIGRATE_TEST_INPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.input_path.as_deref(), Some("/data/export.txt"));

        std::env::remove_var("KEY_MIGRATE_TEST_INPUT");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let toml_content = r#"
[source]
input_path = "${KEY_MIGRATE_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.input_path.as_deref(),
            Some("${KEY_MIGRATE_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[upload\nbatch_size = ").unwrap_err();
        assert!(matches!(err, MigrationError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[upload]\nbatch_size = 3\ndelay_seconds = 1\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.upload.batch_size, Some(3));
        assert_eq!(config.upload.delay_seconds, Some(1));
    }
}
