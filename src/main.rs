//! Certificate Intake - Terminal form for graduation certificate submissions
//!
//! A Ratatui-based TUI that collects an applicant's certificate details,
//! validates them, and uploads the certificate file to the intake endpoint.

mod app;
mod config;
mod platform;
mod state;
mod submission;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::IntakeConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use submission::HttpSubmitClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certificate_intake=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Configuration problems are reported before the terminal is taken over
    let config = IntakeConfig::load().context("failed to load configuration")?;
    let client = HttpSubmitClient::new(&config)?;
    tracing::info!(endpoint = %client.endpoint(), "starting certificate intake");

    let mut terminal = enter_terminal()?;
    let mut app = App::new(Arc::new(client));
    let outcome = run_app(&mut terminal, &mut app).await;
    leave_terminal(&mut terminal)?;

    if let Err(err) = outcome {
        tracing::error!(error = %err, "intake session aborted");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen
fn enter_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Give the shell its screen back
fn leave_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Pick up a finished submission before drawing
        app.poll_submission();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.quit();
                } else {
                    app.handle_key(key).await?;
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
