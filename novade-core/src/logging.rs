//! Flexible Logging System for NovaDE Core.
//!
//! This module provides a configurable logging framework for the NovaDE core library,
//! built upon the `tracing` ecosystem. It supports console output and optional
//! file logging with configurable formats.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils; // For utils::fs::ensure_directory_exists

use std::io::stdout;
use std::path::Path;
use tracing::Level; // Removed info, Added Level
// use tracing_appender::non_blocking::WorkerGuard; // WorkerGuard is intentionally forgotten for now
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, // Added Layer
    Registry,
};
use atty;

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// This function is intended for use in tests, early application startup before full
/// configuration is loaded, or as a fallback if detailed logging initialization fails.
/// It filters messages based on the `RUST_LOG` environment variable, defaulting to
/// "info" level if `RUST_LOG` is not set or is invalid.
/// Errors during initialization (e.g., if a global logger is already set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Direct to stderr
        .with_ansi(atty::is(atty::Stream::Stderr)) // Colors if stderr is a TTY
        .try_init(); // Ignore error if already initialized
}

/// Creates a file logging layer.
///
/// Ensures the parent directory for the log file exists, sets up daily rolling
/// file appender, and configures the log format (text or JSON).
///
/// # Arguments
///
/// * `log_path`: Path to the log file.
/// * `format`: Logging format ("text" or "json").
///
/// # Returns
///
/// A boxed `Layer` for file logging, or `CoreError` on failure.
fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<Box<dyn Layer<Registry> + Send + Sync + 'static>, CoreError> {
    // Ensure parent directory exists
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() { // Check if parent is not root or empty
            utils::fs::ensure_directory_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")), // Default to current dir if no parent
        log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("core.log")), // Default filename
    );

    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    // TODO: Proper WorkerGuard handling is required.
    // The _guard must be kept alive for the duration of the application to ensure logs are flushed.
    // Storing it in a global static (e.g., OnceCell<WorkerGuard>) or returning it from
    // init_logging for the application to manage is necessary.
    // As per spec for this subtask, using std::mem::forget as a temporary measure.
    // THIS IS NOT FOR PRODUCTION USE.
    std::mem::forget(_guard);

    match format.to_lowercase().as_str() {
        "json" => {
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_writer)
                .with_ansi(false); // No ANSI colors in files
            Ok(Box::new(layer))
        }
        _ => { // Default to text format
            let layer = fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false); // No ANSI colors in files
            Ok(Box::new(layer))
        }
    }
}

/// Initializes the global logging system based on the provided [`LoggingConfig`].
///
/// Configures and sets the global `tracing` subscriber with a console layer and
/// an optional file logging layer.
///
/// # Arguments
///
/// * `config`: A reference to the [`LoggingConfig`].
/// * `is_reload`: If `true`, informational messages are logged on re-initialization attempts;
///   if `false`, errors are returned if a logger is already set.
///
/// # Errors
///
/// Returns `CoreError::Logging` if configuration is invalid or
/// setting the global subscriber fails on an initial setup.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    // Validate and parse log level from config
    // This should ideally be caught by config::validate_config, but as per spec, check here too.
    let level_filter_str = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE.to_string(),
        "debug" => Level::DEBUG.to_string(),
        "info" => Level::INFO.to_string(),
        "warn" => Level::WARN.to_string(),
        "error" => Level::ERROR.to_string(),
        invalid_level => {
            // This error case is per spec for init_logging, even if validate_config should catch it.
            return Err(CoreError::Logging(LoggingError::InitializationError(format!(
                "Invalid log level in config: {}",
                invalid_level
            ))));
        }
    };

    // Stdout Layer
    let stdout_filter = EnvFilter::new(level_filter_str.clone());
    let stdout_layer = fmt::layer()
        .with_writer(stdout)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .with_filter(stdout_filter)
        .boxed();

    // File Layer (Optional)
    let file_layer_opt: Option<Box<dyn Layer<Registry> + Send + Sync + 'static>> =
        if let Some(log_path) = &config.file_path {
            let file_filter_env = EnvFilter::new(level_filter_str);
            let base_file_layer = create_file_layer(log_path, &config.format)?;
            Some(base_file_layer.with_filter(file_filter_env).boxed())
        } else {
            None
        };
    
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = Vec::new();
    layers.push(stdout_layer);
    if let Some(file_layer) = file_layer_opt {
        layers.push(file_layer);
    }

    let result = Registry::default().with(layers).try_init();

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if !is_reload {
                Err(CoreError::Logging(LoggingError::InitializationError(format!(
                    "Failed to set global tracing subscriber. Was it already initialized? Error: {}", e
                ))))
            } else {
                // If is_reload, log an info message. The actual logger might not have changed.
                // Use eprintln as a fallback if tracing system is in an uncertain state.
                let msg = format!("[INFO] Re-initializing logging configuration attempted. Previous logger may persist. Error: {}", e);
                eprintln!("{}", msg);
                Ok(())
            }
        }
    }
}
