//! WindowWatch Daemon
//!
//! Headless runner: drives the countdown and clock ticks and logs every
//! display update.

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tokio::sync::broadcast;
use windowwatch_core::models::{Config, WindowConfig};
use windowwatch_core::storage::{init_config_dir, ConfigStorage};
use windowwatch_core::{ManualClock, SystemClock};
use windowwatch_daemon::{load_config, read_config, EngineSchedule, LogSink, WindowEngine};

#[derive(Parser, Debug)]
#[command(name = "windowwatchd")]
#[command(about = "WindowWatch daemon - headless window countdown", long_about = None)]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the window opening instant (RFC 3339)
    #[arg(long)]
    opens_at: Option<String>,

    /// Override the window closing instant (RFC 3339)
    #[arg(long)]
    closes_at: Option<String>,

    /// Print a single JSON snapshot and exit
    #[arg(long)]
    once: bool,

    /// Evaluate the snapshot at this instant instead of now (RFC 3339)
    #[arg(long, requires = "once")]
    at: Option<String>,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.once {
        print_snapshot(&args)
    } else {
        let config = load_config(
            args.config.clone(),
            args.opens_at.as_deref(),
            args.closes_at.as_deref(),
        )?;
        run_daemon(args, config).await
    }
}

/// One-shot mode: logs go to stderr so stdout stays pure JSON, and the config
/// file is only read, never created.
fn print_snapshot(args: &Args) -> Result<()> {
    let log_level = args.log_level.as_deref().unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_level)
        .with_ansi(false)
        .init();

    let config = read_config(
        args.config.clone(),
        args.opens_at.as_deref(),
        args.closes_at.as_deref(),
    )?;

    let now = match args.at.as_deref() {
        Some(value) => WindowConfig::parse_instant(value)?,
        None => chrono::Utc::now(),
    };

    let (tx, _) = broadcast::channel(1);
    let engine = WindowEngine::from_config(ManualClock::new(now), &config, tx)?;
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

async fn run_daemon(args: Args, config: Config) -> Result<()> {
    let config_dir = init_config_dir()?;
    let log_file_path = config_dir.join("daemon.log");

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    // Write to both file and stdout
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let stdout_writer = std::io::stdout.with_max_level(tracing::Level::INFO);
    let file_writer = log_file.with_max_level(tracing::Level::DEBUG);

    let log_level = args
        .log_level
        .unwrap_or_else(|| config.daemon.log_level.clone());

    tracing_subscriber::fmt()
        .with_writer(stdout_writer.and(file_writer))
        .with_env_filter(log_level.as_str())
        .with_ansi(false)
        .init();

    tracing::info!("WindowWatch daemon starting...");
    tracing::info!("Log file: {}", log_file_path.display());
    match &args.config {
        Some(path) => tracing::info!("Config file: {}", path.display()),
        None => tracing::info!(
            "Config file: {}",
            ConfigStorage::new(config_dir.clone()).path().display()
        ),
    }
    tracing::info!(
        "Window: {} to {}",
        config.window.opens_at.to_rfc3339(),
        config.window.closes_at.to_rfc3339()
    );

    let (event_tx, _) = broadcast::channel(100);
    let mut engine = WindowEngine::from_config(SystemClock, &config, event_tx)?;
    let mut schedule = EngineSchedule::new(&config.display);
    let mut sink = LogSink::default();

    tracing::info!("Daemon ready");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
    };
    engine.run(&mut schedule, &mut sink, shutdown).await;

    tracing::info!("Shutting down...");
    Ok(())
}
