//! DramaShorts - short-form drama streaming in the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! dramashorts
//!
//! # CLI mode (for automation)
//! dramashorts episodes --locked
//! dramashorts chat "Quem é seu pai?" --json
//! ```

use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use dramashorts::api::ChatBridge;
use dramashorts::app::App;
use dramashorts::cli::{Cli, Command, ExitCode, Output};
use dramashorts::commands;
use dramashorts::config::Config;
use dramashorts::panel::ChatRequest;
use dramashorts::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Event loop tick; also the playback clock resolution
const TICK_RATE: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let mut config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.is_cli_mode() => {
            let output = Output::new(&cli);
            let code = output.error(e.to_string(), ExitCode::ConfigError);
            std::process::exit(code.into());
        }
        Err(e) => return Err(e).context("Failed to load config"),
    };
    cli.apply_overrides(&mut config);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(&config).await
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Log directory (<data_dir>/dramashorts/logs)
fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("dramashorts").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("dramashorts").join("logs"))
}

/// Daily rolling file log; the terminal belongs to the TUI
fn init_logging() -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(log_dir(), "dramashorts.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dramashorts=info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    info!("dramashorts v{} starting", env!("CARGO_PKG_VERSION"));
    Some(guard)
}

// =============================================================================
// CLI Mode
// =============================================================================

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Episodes(cmd)) => commands::episodes_cmd(cmd, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &output).await,

        Some(Command::Packages(cmd)) => commands::packages_cmd(cmd, &output).await,

        Some(Command::Chat(cmd)) => commands::chat_cmd(cmd, config, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Put the terminal back before the default panic output
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
        error!("panic: {}", panic_info);
        default_hook(panic_info);
    }));
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    install_panic_hook();

    let bridge = config.chat_bridge();
    if !bridge.is_configured() {
        info!("no Gemini credential; chat replies will explain the missing key");
    }

    let mut terminal = init_terminal()?;
    let mut app = App::with_config(config);

    let result = run_event_loop(&mut terminal, &mut app, bridge).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    info!(coins = app.coins, "session ended");
    result
}

/// Send one chat request on its own task; the reply comes back on `tx`
fn dispatch_chat(bridge: &ChatBridge, request: ChatRequest, tx: mpsc::UnboundedSender<String>) {
    let bridge = bridge.clone();
    tokio::spawn(async move {
        let reply = bridge
            .reply(&request.character, &request.history, &request.message)
            .await;
        // Receiver gone means the app already quit
        let _ = tx.send(reply);
    });
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, bridge: ChatBridge) -> Result<()> {
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    let mut last_tick = Instant::now();

    while app.running {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so playback keeps ticking
        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if let Some(request) = app.take_chat_request() {
            dispatch_chat(&bridge, request, reply_tx.clone());
        }

        while let Ok(reply) = reply_rx.try_recv() {
            app.receive_chat_reply(reply);
        }

        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;
    }

    Ok(())
}
