//! Terminal UI for teammove that ranks carpool drivers for a passenger address.

mod app;
mod config;
mod input;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use teammove_core::service::TeammoveService;

use crate::app::App;
use crate::config::Config;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.init_logging()?;

    // Ride source + service setup
    let source = config.ride_source()?;
    tracing::info!(source = source.name(), "starting teammove");
    let service = Arc::new(TeammoveService::new(source));

    // App state
    let mut app = App::new(service);
    app.refresh_events().await;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::ReloadEvents => {
                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    app.refresh_events().await;
                    app.is_loading = false;
                }
                Action::MatchPassenger => {
                    let Some(event) = app.selected_event.as_ref().map(|event| event.id.clone())
                    else {
                        app.error_message = Some("Select an event first".into());
                        continue;
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    // An empty address still matches; every ride then ranks as "other".
                    let address = app.address_input.trim().to_owned();
                    let res = app.service.match_with_stats(&event, &address).await;

                    app.is_loading = false;
                    match res {
                        Ok(result) => {
                            app.show_matches(result.matches, result.stats);
                        }
                        Err(err) => {
                            app.error_message = Some(format!("Matching failed: {err}"));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
