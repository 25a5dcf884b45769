//! # NovaDE Core Library (`novade-core`)
//!
//! `novade-core` is the foundational library for the NovaDE (Nova Desktop Environment) project.
//! It provides the error handling, configuration, logging, and filesystem utilities shared by
//! higher-level NovaDE crates such as `novade-system`.
//!
//! ## Purpose
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types, `ConfigError` and `LoggingError`.
//! - **Configuration Management**: Loading, parsing, and validating application configuration
//!   through the `ConfigLoader`, `CoreConfig` and `ConfigProvider` types.
//! - **Logging**: A flexible logging framework built on top of the `tracing` crate,
//!   configurable for console and file output in text or JSON format.
//! - **Utility Functions**: Filesystem helpers (`utils::fs`) and XDG path resolution
//!   (`utils::paths`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novade_core::config::ConfigLoader;
//! use novade_core::logging::init_logging;
//!
//! fn main() -> Result<(), novade_core::error::CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!     tracing::info!("NovaDE Core initialized successfully.");
//!     Ok(())
//! }
//! ```

/// Error handling types for the NovaDE core.
pub mod error;
/// Configuration management for NovaDE applications.
pub mod config;
/// Logging infrastructure for NovaDE.
pub mod logging;
/// Utility functions for common tasks.
pub mod utils;

use tracing_subscriber::EnvFilter;

/// Initializes core components of the NovaDE system, with a primary focus on the logging system.
///
/// This is a convenience entry point for callers that only want environment-driven
/// logging (`RUST_LOG=info,novade_core=debug`) without loading a `CoreConfig` first.
/// Applications that load configuration should prefer [`logging::init_logging`].
///
/// # Errors
///
/// Returns a [`error::CoreError::Logging`] if a global tracing subscriber has already
/// been set elsewhere in the application or by another library.
pub fn init() -> Result<(), crate::error::CoreError> {
    match tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        Ok(()) => {
            tracing::info!("NovaDE Core components initialized successfully via novade_core::init().");
            Ok(())
        }
        Err(e) => Err(crate::error::CoreError::Logging(
            crate::error::LoggingError::InitializationError(format!(
                "Failed to initialize global tracing subscriber: {}",
                e
            )),
        )),
    }
}

// Re-export key types for convenience
pub use error::{CoreError, ConfigError, LoggingError};
pub use config::{CoreConfig, LoggingConfig, ConfigLoader, ConfigProvider, FileConfigProvider};
pub use logging::{init_logging, init_minimal_logging};
pub use utils::{ensure_directory_exists, read_file_to_string, write_string_to_file};

#[cfg(test)]
mod init_tests {
    use std::sync::Once;
    use crate::error::CoreError;

    static TRACING_INIT: Once = Once::new();

    #[test]
    fn test_init_success() {
        let result = crate::init();

        match result {
            Ok(()) => {
                tracing::info!("test_init_success: init() succeeded or was already initialized.");
            }
            Err(CoreError::Logging(_)) => {
                tracing::warn!("test_init_success: init() failed as expected (already initialized).");
            }
            Err(e) => {
                panic!("init() failed with an unexpected error type: {:?}", e);
            }
        }
    }

    #[test]
    fn test_init_error_on_reinitialization() {
        TRACING_INIT.call_once(|| {
            let _ = crate::init();
        });

        let result = crate::init();
        assert!(result.is_err(), "Second call to init() should return an error.");
        assert!(matches!(result, Err(CoreError::Logging(_))));
    }
}
