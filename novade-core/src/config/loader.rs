//! Configuration Loading Logic.
//!
//! This module implements [`ConfigLoader`], the entry point for reading and validating
//! a [`CoreConfig`] from disk.
//!
//! ## Configuration File Location
//!
//! `ConfigLoader::load()` attempts to load `config.toml` from the application-specific
//! configuration directory, as determined by [`crate::utils::paths::get_app_config_dir`].
//! If the file is not found, a default configuration is used.
//!
//! ## Validation
//!
//! After loading (or generating defaults), the configuration undergoes validation via
//! [`ConfigLoader::validate_config`]. This includes:
//! - Normalizing and validating log levels and formats.
//! - Resolving relative log file paths to absolute paths within the application's state directory.
//! - Ensuring necessary parent directories for log files are created.

use std::fs;
use crate::config::CoreConfig;
use crate::error::{CoreError, ConfigError};
use crate::utils::fs as nova_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

/// `ConfigLoader` provides static methods to load and validate `CoreConfig`.
///
/// This is an empty struct used as a namespace for configuration loading logic.
/// The main entry point is the `load()` method.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the `CoreConfig` for the application.
    ///
    /// If `config.toml` does not exist in the application config directory, a default
    /// `CoreConfig` is used in its place. Any other I/O error, or a TOML parse error,
    /// is propagated.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let config_dir = get_app_config_dir()?;
        let config_path = config_dir.join("config.toml");

        let content = match fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut default_config = CoreConfig::default();
                Self::validate_config(&mut default_config)?;
                return Ok(default_config);
            }
            Err(e) => return Err(CoreError::Io(e)),
        };

        let mut config: CoreConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Validates the loaded `CoreConfig` and resolves relative paths.
    ///
    /// - The logging level and format are lower-cased and checked against the allowed sets.
    /// - A relative `logging.file_path` is resolved against the application state directory.
    /// - The parent directory of the resolved log path is created if missing.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))));
            }
        }

        if let Some(path) = &config.logging.file_path {
            let absolute_path = if path.is_absolute() {
                path.clone()
            } else {
                get_app_state_dir()?.join(path)
            };

            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    nova_fs::ensure_directory_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;
    use std::env;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Redirects XDG config/state lookups to temporary directories for the duration of a test.
    struct TestEnv {
        _temp_config_dir: TempDir,
        _temp_state_dir: TempDir,
        original_xdg_config_home: Option<String>,
        original_xdg_state_home: Option<String>,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_config_dir = TempDir::new().unwrap();
            let temp_state_dir = TempDir::new().unwrap();

            let original_xdg_config_home = env::var("XDG_CONFIG_HOME").ok();
            let original_xdg_state_home = env::var("XDG_STATE_HOME").ok();

            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
            env::set_var("XDG_STATE_HOME", temp_state_dir.path());

            let app_cfg_dir = get_app_config_dir().expect("resolve temp app config dir");
            utils::fs::ensure_directory_exists(&app_cfg_dir).expect("create temp app config dir");

            let app_state_dir = get_app_state_dir().expect("resolve temp app state dir");
            utils::fs::ensure_directory_exists(&app_state_dir).expect("create temp app state dir");

            Self {
                _temp_config_dir: temp_config_dir,
                _temp_state_dir: temp_state_dir,
                original_xdg_config_home,
                original_xdg_state_home,
            }
        }
    }

    impl Drop for TestEnv {
        fn drop(&mut self) {
            match &self.original_xdg_config_home {
                Some(val) => env::set_var("XDG_CONFIG_HOME", val),
                None => env::remove_var("XDG_CONFIG_HOME"),
            }
            match &self.original_xdg_state_home {
                Some(val) => env::set_var("XDG_STATE_HOME", val),
                None => env::remove_var("XDG_STATE_HOME"),
            }
        }
    }

    #[test]
    fn test_config_loader_load_success() {
        let _test_env = TestEnv::new();
        let app_config_dir = get_app_config_dir().unwrap();

        let toml_content = r#"
[logging]
level = "debug"
format = "json"
file_path = "logs/app.log"
        "#;
        fs::write(app_config_dir.join("config.toml"), toml_content).unwrap();

        let config = ConfigLoader::load().expect("ConfigLoader::load failed");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        let log_path = config.logging.file_path.expect("file_path should be set");
        assert!(log_path.is_absolute());
        assert!(log_path.to_string_lossy().ends_with("logs/app.log"));
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_config_loader_load_default_when_not_found() {
        let _test_env = TestEnv::new();
        let app_config_dir = get_app_config_dir().unwrap();
        let config_file_path = app_config_dir.join("config.toml");
        if config_file_path.exists() {
            fs::remove_file(&config_file_path).unwrap();
        }

        let config = ConfigLoader::load().expect("load should fall back to defaults");
        assert_eq!(config.logging.level, CoreConfig::default().logging.level);
        assert_eq!(config.logging.file_path, CoreConfig::default().logging.file_path);
    }

    #[test]
    fn test_config_loader_load_parse_error() {
        let _test_env = TestEnv::new();
        let app_config_dir = get_app_config_dir().unwrap();
        fs::write(app_config_dir.join("config.toml"), "this is not valid toml content").unwrap();

        let result = ConfigLoader::load();
        match result {
            Err(CoreError::Config(ConfigError::ParseError(_))) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_config_valid_settings() {
        let _test_env = TestEnv::new();
        let mut config = CoreConfig::default();
        config.logging.level = "TRACE".to_string();
        config.logging.format = "JSON".to_string();
        config.logging.file_path = Some(PathBuf::from("my_app/log.txt"));

        ConfigLoader::validate_config(&mut config).expect("validation should succeed");

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "json");
        let log_path = config.logging.file_path.unwrap();
        assert!(log_path.is_absolute());
        assert!(log_path.to_string_lossy().ends_with("my_app/log.txt"));
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_validate_config_invalid_log_level() {
        let mut config = CoreConfig::default();
        config.logging.level = "superlog".to_string();
        let result = ConfigLoader::validate_config(&mut config);
        match result {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert!(msg.contains("Invalid log level: 'superlog'"));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_config_invalid_log_format() {
        let mut config = CoreConfig::default();
        config.logging.format = "binary".to_string();
        let result = ConfigLoader::validate_config(&mut config);
        match result {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert!(msg.contains("Invalid log format: 'binary'"));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_config_absolute_log_path() {
        let _test_env = TestEnv::new();
        let temp_dir_for_log = TempDir::new().unwrap();
        let abs_log_path = temp_dir_for_log.path().join("sub/absolute.log");

        let mut config = CoreConfig::default();
        config.logging.file_path = Some(abs_log_path.clone());

        ConfigLoader::validate_config(&mut config).expect("validation should succeed");

        assert_eq!(config.logging.file_path.unwrap(), abs_log_path);
        assert!(abs_log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_validate_config_log_path_is_root_parent() {
        let _test_env = TestEnv::new();
        let mut config = CoreConfig::default();
        let log_file_name_only = PathBuf::from("logfile.log");
        config.logging.file_path = Some(log_file_name_only.clone());

        ConfigLoader::validate_config(&mut config).expect("validation should succeed");

        let app_state_dir = get_app_state_dir().unwrap();
        let expected_abs_path = app_state_dir.join(log_file_name_only);
        assert_eq!(config.logging.file_path, Some(expected_abs_path.clone()));
        assert!(expected_abs_path.parent().unwrap().exists());
    }
}
