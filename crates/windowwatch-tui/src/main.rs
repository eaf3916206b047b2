mod app;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tokio::time::Duration;
use tracing::info;
use windowwatch_core::SystemClock;
use windowwatch_daemon::{EngineSchedule, WindowEngine, load_config};

fn setup_logging() -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("windowwatch-tui.log");

    let log_file = std::fs::File::create(log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter("windowwatch_tui=debug,windowwatch_daemon=info")
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

#[derive(Parser, Debug)]
#[command(name = "windowwatch")]
#[command(about = "WindowWatch TUI - live countdown for a fixed time window", long_about = None)]
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
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;
    setup_panic_hook();
    info!("WindowWatch TUI starting up");

    let args = Args::parse();

    let config = match load_config(
        args.config,
        args.opens_at.as_deref(),
        args.closes_at.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let (event_tx, _) = broadcast::channel(100);
    let engine = WindowEngine::from_config(SystemClock, &config, event_tx)?;
    let mut schedule = EngineSchedule::new(&config.display);
    let mut app = App::new(engine);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            task = schedule.next() => {
                app.run_task(task);
            }
            _ = tokio::time::sleep(Duration::from_millis(16)) => {
                if event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            app.handle_key(key.code);
                        }
                        Event::Resize(width, height) => {
                            info!(width, height, "Terminal resized");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    info!("WindowWatch TUI shutting down");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
