use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod controller;
mod domain;
mod model;
mod view;

use controller::Controller;
use domain::{AppError, Config};
use model::{Model, Status};

/// Demo data table with a per column filter dropdown in its header.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// File to write logs to (the terminal itself is taken over by the UI)
    #[arg(long, default_value = "colfilter.log")]
    log_file: PathBuf,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn main() -> ExitCode {
    let result = run();
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;
    info!("Starting colfilter demo");

    let cfg = Config {
        event_poll_time: cli.poll_ms,
        ..Config::default()
    };

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;

    let mut model = Model::init(&cfg, size.width, size.height);
    let controller = Controller::new(&cfg);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|frame| view::draw(&model, frame))?;

        // Handle events and map them to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        }
    }

    Ok(())
}

fn init_tracing(path: &std::path::Path) -> Result<(), AppError> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(())
}
