//! Logging initialization

use super::config::LogConfig;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_NAME: &str = "nearby.log";

/// Initialize the logging system
///
/// - compact output on stderr
/// - daily-rotated, non-blocking file log under `log_dir` (unless disabled)
/// - panic hook that records panics before the default handler runs
///
/// Returns the file writer guard; keep it alive until exit so buffered lines
/// are flushed.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter = || {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new(super::config::DEFAULT_LOG_LEVEL))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(env_filter());

    let mut guard = None;
    let file_layer = if config.file_logging {
        match fs::create_dir_all(&config.log_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
                let (writer, file_guard) = tracing_appender::non_blocking(appender);
                guard = Some(file_guard);
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(false)
                        .with_filter(env_filter()),
                )
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory: {}", e);
                None
            }
        }
    } else {
        None
    };

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        // Already initialized (tests, embedding apps); keep theirs.
        return guard;
    }

    tracing::info!(
        log_file = %config.log_file().display(),
        log_level = %config.log_level,
        file_logging = config.file_logging,
        "Logging initialized"
    );

    setup_panic_hook();
    guard
}

/// Set up panic hook to log panics with their location
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");
        default_panic(panic_info);
    }));
}
