//! Signup - Terminal Signup Form
//!
//! A terminal signup form with per-field validation and a simulated,
//! delayed save of the entered data to local storage.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use signup::application::App;
use signup::infrastructure::{KeyValueStore, SignupConfig};
use signup::presentation::{render_ui, InputHandler};

const LOG_FILE: &str = "signup.log";
const TICK_RATE: Duration = Duration::from_millis(100);

/// Entry point for the signup form.
///
/// Sets up logging and the terminal interface, builds the storage and
/// submission pipeline from `signup.toml`, and runs the event loop until the
/// user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<()> {
    init_tracing();

    let config = SignupConfig::load();
    tracing::info!(
        storage = %config.storage_path.display(),
        delay_ms = config.submit_delay_ms,
        "starting signup form"
    );
    let store: Box<dyn KeyValueStore> = Box::new(config.build_store());
    let mut app = App::new(config.build_simulator(store));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Logs go to a file; writing to stdout or stderr would corrupt the TUI.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
        }
        Err(_) => {
            tracing_subscriber::registry().with(env_filter).init();
        }
    }
}

/// Main application event loop.
///
/// Redraws every tick and waits at most one tick for input, so a pending
/// submission completes even while no key is pressed.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }

        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
