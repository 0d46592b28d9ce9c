use std::io;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod app;
mod config;
mod db;
mod error;
mod form;
mod models;
mod tui;

use app::{App, Tab};
use config::Config;
use error::Result;
use tui::{draw, handle_key_event};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    // Initialize app
    let mut app = App::new(&config)?;

    // Check for --records flag (headless listing)
    let headless_records = args.len() >= 2 && args[1] == "--records";
    if headless_records {
        app.reload_records().await;
        if let Some(error) = &app.records_error {
            eprintln!("{error}");
            std::process::exit(1);
        }
        for record in &app.records {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                record.id,
                record.full_name,
                record.pet_id.as_deref().unwrap_or("-"),
                record.date_of_birth,
                record.department.as_deref().unwrap_or("-"),
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
            );
        }
        return Ok(());
    }

    // Populate the records tab up front; a failure lands in the tab, not here
    app.reload_records().await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let intake_active = app.active_tab == Tab::Intake;
                    if let Some(action) = handle_key_event(key, intake_active, app.show_help) {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
