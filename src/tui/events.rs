use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::warn;

use super::actions::*;
use super::*;

impl App {
    pub fn handle_events(
        &self,
        tx: mpsc::UnboundedSender<Option<Action>>,
    ) -> tokio::task::JoinHandle<()> {
        let tick_rate = Duration::from_millis(250);
        let token = self.token.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            loop {
                let action = tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tick.tick() => None,
                    event = reader.next() => match event {
                        Some(Ok(Event::Key(key))) => handle_key_event(key),
                        Some(Ok(_)) => None,
                        Some(Err(err)) => {
                            warn!(%err, "Reading terminal events failed");
                            Some(Action::Exit)
                        }
                        None => break,
                    },
                };
                if tx.send(action).is_err() {
                    break;
                }
            }
        })
    }
}

fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc => Action::Exit,
        KeyCode::Char('c') if ctrl => Action::Exit,
        KeyCode::Char('r') if ctrl => Action::Restart,

        // Navigation
        KeyCode::Right => Action::MoveRight,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Enter => Action::Enter,

        // Enter words, anything but a letter is dropped by the game
        KeyCode::Char(x) if !ctrl => Action::EnterChar(x),
        KeyCode::Backspace => Action::DeleteChar,
        _ => return None,
    };
    Some(action)
}
