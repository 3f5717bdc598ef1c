mod commands;
mod logging;

use clap::Parser;
use commands::Cli;
use winutil_core::config::loader;
use winutil_core::WindowService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The log file location comes from config, so a load failure is held
    // until the subscriber exists.
    let loaded = loader::read_config(cli.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let log_dir = config
        .logging
        .file
        .then(|| config.logging.effective_dir());
    logging::setup(cli.verbose, log_dir.as_deref());
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
    }
    tracing::debug!(?config, "configuration loaded");

    let service = WindowService::new(
        winutil_platform::native_window_system(),
        config.service(),
    );

    commands::run(cli.command, &service, &config).await
}
