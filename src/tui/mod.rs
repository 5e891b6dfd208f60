use std::io::{self, stdout, Stdout};
use std::sync::Arc;

use crossterm::{execute, terminal::*};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use wordle_at_home::game::GameView;
use wordle_at_home::service::GuessService;

use actions::Action;

mod actions;
mod events;
mod ui;

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Restore the terminal before panics and error reports are printed
pub fn install_hooks() -> color_eyre::Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        panic_hook(panic_info);
    }));

    let eyre_hook = eyre_hook.into_eyre_hook();
    color_eyre::eyre::set_hook(Box::new(move |error| {
        let _ = restore();
        eyre_hook(error)
    }))?;
    Ok(())
}

/// Initialize the terminal
pub fn init() -> io::Result<Tui> {
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

pub struct App {
    exit: bool,
    game: GameView,
    service: Arc<dyn GuessService>,
    /// One line of feedback below the input row
    status: Option<String>,
    restarting: bool,
    action_tx: mpsc::UnboundedSender<Option<Action>>,
    action_rx: mpsc::UnboundedReceiver<Option<Action>>,
    token: CancellationToken,
}

impl App {
    pub fn init(service: Arc<dyn GuessService>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        App {
            exit: false,
            game: GameView::new(),
            service,
            status: None,
            restarting: false,
            action_tx,
            action_rx,
            token: CancellationToken::new(),
        }
    }

    pub fn game(&self) -> &GameView {
        &self.game
    }

    /// runs the application's main loop until the user quits
    pub async fn run(&mut self, terminal: &mut Tui) -> io::Result<()> {
        let task = self.handle_events(self.action_tx.clone());

        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;

            match self.action_rx.recv().await {
                Some(action) => self.update(action),
                None => break,
            }
        }
        self.token.cancel();
        task.abort();
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.size());
    }
}
