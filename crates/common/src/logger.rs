use crate::error::BizToneError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "biztone.log";

/// Initialize logging
///
/// Always logs to the console; also appends to `<log_dir>/biztone.log` when
/// a directory is given. `RUST_LOG` overrides `log_level`.
pub fn setup_logging(log_dir: Option<&Path>, log_level: &str) -> Result<(), BizToneError> {
    let file_layer = match log_dir {
        Some(dir) => Some(
            fmt::layer()
                .with_writer(Arc::new(open_log_file(dir)?))
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false),
        ),
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_log_level(log_level).as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| BizToneError::config(format!("Failed to initialize logging: {}", e)))?;

    match log_dir {
        Some(dir) => tracing::info!("Logging initialized: level={}, log_file={}", log_level, log_path(dir).display()),
        None => tracing::info!("Console logging initialized: level={}", log_level),
    }

    Ok(())
}

fn log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

fn open_log_file(log_dir: &Path) -> Result<std::fs::File, BizToneError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        BizToneError::config(format!("Failed to create log directory {}: {}", log_dir.display(), e))
    })?;

    let path = log_path(log_dir);
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| BizToneError::config(format!("Failed to open log file {}: {}", path.display(), e)))
}

/// Parse string to tracing Level
pub fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO", level);
            Level::INFO
        }
    }
}
