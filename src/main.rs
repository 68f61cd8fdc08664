//! causelist-tui - A terminal UI for eCourts cause lists
//!
//! Pick a court, pick a date, fetch the day's list, then export it as
//! JSON or open the printable PDF. Uses the Component Architecture
//! pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
#[cfg(test)]
mod test_helpers;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::{ECourtsClient, SystemOpener};
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(logs_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(logs_dir, "causelist-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,causelist_tui=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> Result<()> {
    let _log_guard = init_logging(&Config::log_dir());

    let config = Config::load_or_default();
    info!(
        base_url = %config.active.base_url,
        timeout = config.active.request_timeout_secs,
        "Starting"
    );

    let service = Arc::new(ECourtsClient::new(&config.active)?);
    let mut app = App::new(config, service, Box::new(SystemOpener));
    app.init()?;

    // Setup terminal
    tui::install_panic_hook();
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    match app.session_config() {
        Some(session) => {
            if let Err(e) = session.save() {
                warn!(error = %e, "Could not save config");
            }
        }
        None => warn!("Config file was unreadable at startup, not saving the session"),
    }

    // Handle any errors
    if let Err(err) = result {
        error!(error = ?err, "Exited with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                error!(error = %e, "Draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }

        // Drain finished jobs every loop so results show up while keys are held
        app.update(Action::Tick)?;
    }

    Ok(())
}
