use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordle_at_home::cli::Cli;
use wordle_at_home::game::GameView;
use wordle_at_home::service::HttpGuessService;
use wordle_at_home::wordle::MAX_ATTEMPTS;

mod tui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    tui::install_hooks()?;

    let service = HttpGuessService::new(cli.server_url.as_str(), cli.timeout())
        .wrap_err("Failed to create the guess service client")?;
    info!(server_url = %cli.server_url, "Starting game");

    let mut terminal = tui::init().wrap_err("Failed to set up the terminal")?;
    let mut app = tui::App::init(Arc::new(service));
    let app_result = app.run(&mut terminal).await;
    tui::restore()?;
    app_result?;

    if !cli.no_summary {
        print_summary(app.game());
    }
    Ok(())
}

/// Logs go to a file, the terminal belongs to the board
fn init_tracing(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn print_summary(game: &GameView) {
    if game.guesses().is_empty() {
        return;
    }
    for record in game.guesses() {
        println!("{record}");
    }
    let verdict = if game.is_solved() {
        format!("Solved in {}/{}", game.attempts(), MAX_ATTEMPTS)
            .green()
            .bold()
    } else if game.is_over() {
        "Out of guesses".red().bold()
    } else {
        format!("Unfinished, {} of {} guesses used", game.attempts(), MAX_ATTEMPTS).yellow()
    };
    println!("{verdict}");
}
