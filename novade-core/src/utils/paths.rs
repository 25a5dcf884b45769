//! Filesystem Path Utilities.
//!
//! This module provides helper functions for resolving standard XDG (X Desktop Group)
//! base directories and application-specific directories for configuration, data,
//! cache, and state files. It uses the `directories-next` crate.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// The qualifier for the project, typically a reverse domain name.
const QUALIFIER: &str = "org";
/// The organization name associated with the project.
const ORGANIZATION: &str = "NovaDE";
/// The application name.
const APPLICATION: &str = "NovaDE";

/// Retrieves the XDG configuration base directory.
///
/// This is typically `~/.config` on Linux.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the config base directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_config_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "Config Base".to_string(),
            })
        })
}

/// Retrieves the XDG data base directory.
///
/// This is typically `~/.local/share` on Linux.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the data base directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_data_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "Data Base".to_string(),
            })
        })
}

/// Retrieves the XDG cache base directory.
///
/// This is typically `~/.cache` on Linux.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the cache base directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_cache_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "Cache Base".to_string(),
            })
        })
}

/// Retrieves the XDG state base directory.
///
/// On Linux, this attempts to use `$XDG_STATE_HOME`, falling back to `~/.local/state`.
/// On other platforms, it uses the equivalent of a local data directory.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the state base directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                std::env::var("XDG_STATE_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| dirs.home_dir().join(".local/state"))
            }
            #[cfg(not(target_os = "linux"))]
            {
                // As per spec, using data_local_dir for non-Linux state.
                // Note: directories_next::BaseDirs doesn't have a dedicated `state_dir`.
                // `data_local_dir` is often `~/.local/share` on Linux,
                // `~/Library/Application Support` on macOS,
                // `%APPDATA%` (roaming) or `%LOCALAPPDATA%` on Windows.
                // The spec might need refinement here for true cross-platform state,
                // but adhering to current spec.
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Retrieves the application-specific configuration directory.
///
/// Path is typically like `~/.config/NovaDE/NovaDE` on Linux.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the application's config directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Config".to_string(),
            })
        })
}

/// Retrieves the application-specific data directory.
///
/// Path is typically like `~/.local/share/NovaDE/NovaDE` on Linux.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the application's data directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Data".to_string(),
            })
        })
}

/// Retrieves the application-specific cache directory.
///
/// Path is typically like `~/.cache/NovaDE/NovaDE` on Linux.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the application's cache directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_app_cache_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Cache".to_string(),
            })
        })
}

/// Retrieves the application-specific state directory.
///
/// This combines the XDG state base directory with the project's path components.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the application's state directory.
/// * `Err(CoreError)` if the directory cannot be determined.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .and_then(|proj_dirs| {
            get_state_base_dir().ok().map(|base_state| base_state.join(proj_dirs.project_path()))
        })
        .ok_or_else(|| {
            // This error is returned if ProjectDirs::from was None OR if get_state_base_dir().ok() was None (meaning get_state_base_dir() returned Err).
            // Consider a more specific error message or error type if get_state_base_dir() itself fails.
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App State".to_string(), 
            })
        })
}

/// Retrieves the system-wide configuration file path.
///
/// Path is typically `/etc/novade/config.toml`.
/// This can be overridden for testing using the `NOVADE_TEST_SYSTEM_CONFIG_PATH` environment variable.
///
/// # Returns
///
/// * `Ok(PathBuf)` containing the path to the system configuration file.
/// * `Err(ConfigError::DirectoryUnavailable)` if the path cannot be determined (e.g. env var is invalid UTF-8).
pub fn get_system_config_path_with_override() -> Result<PathBuf, ConfigError> {
    match std::env::var("NOVADE_TEST_SYSTEM_CONFIG_PATH") {
        Ok(path_str) => {
            if path_str.is_empty() {
                 // Treat empty string as "use default" or error, this seems like an invalid override.
                 // For now, let's assume an empty path is not intended and fall back or error.
                 // Falling back to default:
                 Ok(PathBuf::from("/etc/novade/config.toml"))
            } else {
                Ok(PathBuf::from(path_str))
            }
        }
        Err(std::env::VarError::NotPresent) => {
            // Environment variable not set, use the default system path
            Ok(PathBuf::from("/etc/novade/config.toml"))
        }
        Err(std::env::VarError::NotUnicode(_)) => {
            // Environment variable was set but contained invalid UTF-8
            Err(ConfigError::DirectoryUnavailable { // Reusing DirectoryUnavailable, consider a new variant if more fitting
                dir_type: "System Config Path (Invalid UTF-8 Env Var)".to_string(),
            })
        }
    }
}
