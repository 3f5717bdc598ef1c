//! Logging with optional rolling file output.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging: stderr always, plus a daily log file in `file_dir`
/// when given.
///
/// `RUST_LOG` overrides the default level (`info`, or `debug` when verbose).
pub fn setup(verbose: bool, file_dir: Option<&Path>) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Console layer (always enabled); stdout is reserved for command output
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let file_layer = file_dir.and_then(|log_dir| {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
            return None;
        }

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "winutil.log");
        Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(false) // No ANSI colors in file output
                .with_writer(file_appender)
                .with_filter(EnvFilter::new("info")),
        )
    });

    match file_layer {
        Some(file_layer) => {
            tracing_subscriber::registry()
                .with(console_layer)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry().with(console_layer).init();
        }
    }

    if let Some(dir) = file_dir {
        tracing::debug!("File logging enabled: {:?}", dir);
    }
}
