/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Interactive task card TUI with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use taskcard_adapter::{Clipboard, Identity};
use taskcard_viewer::notify::{DEFAULT_NOTIFICATION_TTL, NotificationHub};
use taskcard_viewer::{CardConfig, MemoryClipboard, Osc52Clipboard, TaskCard, build_services};

use tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogSink, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "taskcard-viewer", version, about = "Interactive card for a DAO task")]
struct Cli {
    /// YAML configuration; falls back to the user config dir, then a demo setup
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Also append logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Validate configuration and wiring, then exit
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if args.dry_run {
        init_stderr_tracing(&args.log_level)?;
        let config = load_config(args.config_path.as_deref())?;
        let services = build_services(
            &config,
            Arc::new(taskcard_viewer::RecordingNotifier::default()),
            Arc::new(MemoryClipboard::default()),
        )?;
        info!("dry-run requested; configuration validated");
        println!(
            "configuration valid: task {} as {} ({:?} service)",
            config.task_id,
            services.identity.current_address(),
            config.service.kind
        );
        return Ok(());
    }

    let log_buffer = LogBuffer::shared(LOG_BUFFER_CAPACITY);
    let _file_guard = init_tui_tracing(&args.log_level, log_buffer.clone(), args.log_file.as_deref())?;

    let config = load_config(args.config_path.as_deref())?;
    let options = RunOptions::from_env();
    info!(
        task_id = %config.task_id,
        headless = options.exit_after_ticks.is_some(),
        "starting taskcard-viewer"
    );

    let (notifier, hub) = NotificationHub::channel(DEFAULT_NOTIFICATION_TTL);
    let clipboard: Arc<dyn Clipboard> = if options.exit_after_ticks.is_some() {
        Arc::new(MemoryClipboard::default())
    } else {
        Arc::new(Osc52Clipboard::stdout())
    };
    let services = build_services(&config, Arc::new(notifier), clipboard)?;
    let card = TaskCard::new(services, config.task_id, config.share_base_url.clone());

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    tui::run_tui(card, hub, log_buffer, options, shutdown)
        .await
        .context("run tui")?;
    info!("taskcard-viewer stopped");
    Ok(())
}

fn init_stderr_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn init_tui_tracing(
    log_level: &str,
    log_buffer: LogBufferHandle,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let buffer_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(LogSink::new(log_buffer));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().context("log file path has no file name")?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(buffer_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn load_config(path: Option<&Path>) -> Result<CardConfig> {
    let config = match path {
        Some(path) => CardConfig::from_file(path).context("load config")?,
        None => match CardConfig::default_path().filter(|path| path.exists()) {
            Some(path) => {
                info!(path = %path.display(), "using default config path");
                CardConfig::from_file(&path).context("load default config")?
            }
            None => {
                info!("no config found; using built-in demo configuration");
                CardConfig::demo()
            }
        },
    };
    config.validate().context("validate config")?;
    Ok(config)
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
