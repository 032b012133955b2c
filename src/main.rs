// ABOUTME: Main entry point for shieldquote with TUI and CLI support
//
// Binary: shieldquote
// Usage: shieldquote [COMMAND]
// - No command: launches the quote wizard TUI
// - steps: show the step graph of the saved quote
// - analyze: show promotions for the saved quote
// - promos: list accepted promo codes
// - reset: discard the saved quote

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};
use tracing::{error, info};

mod cli;

use shieldquote::app::{App, EventHandler};
use shieldquote::components::WizardView;
use shieldquote::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = cli::load_config(args.config.as_ref())?;

    let result = match args.command {
        Some(cli::Commands::Steps) => cli::session::steps(&config, args.format),
        Some(cli::Commands::Analyze) => cli::session::analyze_saved(&config, args.format),
        Some(cli::Commands::Promos) => cli::promos::execute(args.format),
        Some(cli::Commands::Reset) => cli::session::reset(&config),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            if args.config.is_none() {
                write_default_config(&config);
            }

            let store = cli::open_store(&config)?;
            let mut app = App::new(store, &config);

            // Flush any pending terminal events so stray keypresses don't land on the first step
            while crossterm::event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = crossterm::event::read();
            }

            run_tui(&mut app).await
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

/// Save defaults on first run so the file is there to edit
fn write_default_config(config: &AppConfig) {
    match AppConfig::default_path() {
        Ok(path) if !path.exists() => {
            if let Err(e) = config.save_to(&path) {
                error!("Failed to write default config: {:#}", e);
            } else {
                info!("Wrote default config to {}", path.display());
            }
        }
        Ok(_) => {}
        Err(e) => error!("Could not resolve config path: {:#}", e),
    }
}

async fn run_tui(app: &mut App) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(app, &mut terminal).await;
    app.shutdown();

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let view = WizardView::new();
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| view.render(frame, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Windows reports releases too
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        // Let the submission task make progress between frames
        tokio::task::yield_now().await;

        if app.state.should_quit {
            info!("Exiting quote wizard");
            return Ok(());
        }
    }
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    // Create log directory if it doesn't exist
    let log_dir = AppConfig::base_dir()
        .map(|base| base.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".shieldquote/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "shieldquote-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // The terminal belongs to the TUI; without a log file there is nowhere to write
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shieldquote=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs in ~/.shieldquote/logs for more details.");
    }));
}
