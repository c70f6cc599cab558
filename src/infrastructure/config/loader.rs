use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project configuration, relative to the base directory
pub const CONFIG_DIR: &str = ".credscope";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CREDSCOPE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Log level outside trace..error
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Log format other than json or pretty
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .credscope/config.yaml
    /// 3. .credscope/local.yaml (optional local overrides)
    /// 4. Environment variables (CREDSCOPE_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Load configuration with `.credscope/` resolved under `base`
    pub fn load_from_dir(base: impl AsRef<Path>) -> Result<Config> {
        let dir = base.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, ignoring the environment
    ///
    /// Unlike the project files merged by [`load`](Self::load), the file
    /// must exist.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        if !path.as_ref().is_file() {
            return Err(ConfigError::FileNotFound(path.as_ref().to_path_buf()).into());
        }
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Level and format are both matched case-insensitively.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{CorruptedScopePolicy, LoggingConfig, ScopeConfig};
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scope.corrupted_scope, CorruptedScopePolicy::Replace);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
scope:
  corrupted_scope: surface
logging:
  level: debug
  format: pretty
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.scope.corrupted_scope, CorruptedScopePolicy::Surface);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config {
            scope: ScopeConfig {
                corrupted_scope: CorruptedScopePolicy::Surface,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "json".to_string(),
            },
        };
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogFormat(format)) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "scope:\n  corrupted_scope: surface").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.scope.corrupted_scope, CorruptedScopePolicy::Surface);
        assert_eq!(config.logging.level, "info", "Defaults fill unset fields");
    }

    #[test]
    fn test_validate_is_case_insensitive() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_string();
        config.logging.format = "PRETTY".to_string();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.logging.format = "Json".to_string();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.yaml");

        let err = ConfigLoader::load_from_file(&missing).unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::FileNotFound(path)) => assert_eq!(path, &missing),
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  format: xml").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_load_from_file_rejects_unknown_policy() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "scope:\n  corrupted_scope: ignore").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_hierarchical_merging_with_env_override() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.yaml"),
            "logging:\n  level: info\n  format: pretty\n",
        )
        .unwrap();
        fs::write(config_dir.join("local.yaml"), "logging:\n  level: debug\n").unwrap();

        let config = temp_env::with_vars(
            [
                ("CREDSCOPE_SCOPE__CORRUPTED_SCOPE", Some("surface")),
                ("CREDSCOPE_LOGGING__LEVEL", None),
            ],
            || ConfigLoader::load_from_dir(dir.path()),
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug", "Local override should win");
        assert_eq!(
            config.logging.format, "pretty",
            "Base value should persist when not overridden"
        );
        assert_eq!(
            config.scope.corrupted_scope,
            CorruptedScopePolicy::Surface,
            "Environment should win over files"
        );
    }

    #[test]
    fn test_load_from_empty_dir_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = temp_env::with_vars(
            [
                ("CREDSCOPE_SCOPE__CORRUPTED_SCOPE", None::<&str>),
                ("CREDSCOPE_LOGGING__LEVEL", None),
                ("CREDSCOPE_LOGGING__FORMAT", None),
            ],
            || ConfigLoader::load_from_dir(dir.path()),
        )
        .unwrap();

        assert_eq!(config.scope.corrupted_scope, CorruptedScopePolicy::Replace);
        assert_eq!(config.logging.level, "info");
    }
}
