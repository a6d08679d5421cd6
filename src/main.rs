// regdesk - referral registration desk for the terminal
//
// A landing page with "Register" triggers, each carrying a referral-code
// tooltip, plus an admin screen for managing card images in hosted storage.
//
// Architecture:
// - Tooltip core: visibility state machine, placement, single-open registry
// - TUI (ratatui): landing/register/admin screens, login modal, toasts
// - Storage: thin client for the hosted object storage REST API
// - Auth: admin credential check against configured values
// - Event system: background tasks report back to the UI loop over mpsc

mod auth;
mod cli;
mod config;
mod events;
mod logging;
mod notify;
mod storage;
mod tooltip;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing
///
/// In TUI mode logs are captured to the buffer (so they don't garble the
/// display); otherwise they go to stderr. File logging is added on top when
/// enabled. The returned guard must live until exit so file logs flush.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("regdesk={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui_mode.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!tui_mode).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                // Non-blocking writer; JSON for structured log parsing
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands run before anything is initialized
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(mode) = cli.interaction_override() {
        config.interaction = mode;
    }

    let log_buffer = LogBuffer::new();
    let tui_mode = cli.command.is_none();
    let _file_guard = init_tracing(&config, tui_mode, &log_buffer);

    tracing::debug!(
        interaction = config.interaction.as_str(),
        admin_configured = config.admin.is_configured(),
        storage_configured = config.storage.is_configured(),
        "configuration loaded"
    );

    match cli.command {
        Some(Commands::Upload {
            file,
            bucket,
            folder,
        }) => cli::handle_upload(&config, file, bucket, folder).await,
        Some(Commands::Delete { url, bucket }) => cli::handle_delete(&config, url, bucket).await,
        Some(Commands::Config { .. }) => Ok(()),
        None => tui::run_tui(config, log_buffer).await,
    }
}
