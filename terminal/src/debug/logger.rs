//! File-based logging initialization

use super::config::{DebugConfig, DEFAULT_LOG_LEVEL, LOG_FILE_NAME};
use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system
///
/// Sets up file-based logging with:
/// - Daily log rotation under `config.log_dir`
/// - Optional stderr mirror for development
/// - Non-blocking writes to prevent UI lag
/// - Panic hook integration for crash logging
///
/// Failure to create the log directory falls back to stderr only.
pub fn init(config: &DebugConfig) {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let stderr_layer = config.log_to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
    });

    let file_layer = match fs::create_dir_all(&config.log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // Keep the guard alive for the lifetime of the program
            std::mem::forget(guard);
            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        Err(e) => {
            eprintln!("Warning: Failed to create log directory {}: {}", config.log_dir.display(), e);
            None
        }
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            log_file = %config.log_file().display(),
            log_level = %config.log_level,
            "Logging initialized"
        );
        setup_panic_hook();
    }
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

        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!(location = %location, message = %message, "Application panic");
        tracing::error!(backtrace = %backtrace, "Panic backtrace");

        default_panic(panic_info);
    }));
}
