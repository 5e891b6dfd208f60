use tracing::{debug, warn};

use wordle_at_home::error::ServiceError;
use wordle_at_home::game::{Key, Submission};
use wordle_at_home::service::CheckResponse;
use wordle_at_home::wordle::{MAX_ATTEMPTS, WORD_LENGTH};

use super::*;

pub enum Action {
    Exit,
    MoveLeft,
    MoveRight,
    Enter,
    EnterChar(char),
    DeleteChar,
    Restart,
    Checked {
        submission: Submission,
        result: Result<CheckResponse, ServiceError>,
    },
    Restarted(Result<(), ServiceError>),
}

impl App {
    pub fn update(&mut self, msg: Option<Action>) {
        if let Some(msg) = msg {
            match msg {
                Action::Exit => {
                    self.token.cancel();
                    self.exit = true;
                }
                Action::MoveLeft => {
                    if let Some(index) = self.game.focused().checked_sub(1) {
                        self.game.request_focus(index);
                    }
                }
                Action::MoveRight => {
                    self.game.request_focus(self.game.focused() + 1);
                }
                Action::Enter => {
                    if self.game.is_over() {
                        self.restart();
                    } else if let Some(submission) =
                        self.game.handle_key(self.game.focused(), Key::Enter)
                    {
                        self.check(submission);
                    }
                }
                Action::EnterChar(x) => {
                    if self.game.edit_cell(self.game.focused(), &x.to_string()) {
                        self.status = None;
                    }
                }
                Action::DeleteChar => {
                    let index = self.game.focused();
                    self.game.handle_key(index, Key::Backspace);
                    // A filled cell is cleared by the edit itself
                    if self.game.current_guess().get(index).is_some() {
                        self.game.edit_cell(index, "");
                    }
                }
                Action::Restart => {
                    self.restart();
                }
                Action::Checked { submission, result } => match result {
                    Ok(response) => {
                        if self.game.apply_feedback(&submission, response) {
                            self.status = self.game_over_message();
                        }
                    }
                    Err(err) => {
                        warn!(guess = %submission.guess, %err, "Checking guess failed");
                        if self.game.abort_submit(&submission) {
                            self.status = Some(err.to_string());
                        }
                    }
                },
                Action::Restarted(result) => {
                    self.restarting = false;
                    match result {
                        Ok(()) => {
                            self.game.reset();
                            self.status = None;
                        }
                        Err(err) => {
                            warn!(%err, "Restarting failed");
                            self.status = Some(err.to_string());
                        }
                    }
                }
            }
        }
    }

    fn game_over_message(&self) -> Option<String> {
        if self.game.is_solved() {
            Some(format!(
                "Solved in {}/{}!",
                self.game.attempts(),
                MAX_ATTEMPTS
            ))
        } else if self.game.is_over() {
            Some("Game Over!".to_string())
        } else {
            None
        }
    }

    /// Send a guess to the service in the background
    fn check(&mut self, submission: Submission) {
        debug_assert_eq!(submission.guess.len(), WORD_LENGTH);
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        let token = self.token.child_token();
        self.status = Some(format!("Checking {}...", submission.guess));

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return;
                }
                x = service.check_guess(&submission.guess) => x,
            };
            if tx.send(Some(Action::Checked { submission, result })).is_err() {
                debug!("Verdict arrived after shutdown");
            }
        });
    }

    fn restart(&mut self) {
        if self.restarting {
            return;
        }
        self.restarting = true;
        self.status = Some("Starting a new game...".to_string());

        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        let token = self.token.child_token();

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return;
                }
                x = service.restart() => x,
            };
            if tx.send(Some(Action::Restarted(result))).is_err() {
                debug!("Restart finished after shutdown");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use wordle_at_home::wordle::LetterStatus;

    use super::*;
    use LetterStatus::*;

    /// Never answers a check, counts restarts
    #[derive(Default)]
    struct Offline {
        restarts: AtomicUsize,
        restart_fails: bool,
    }

    #[async_trait]
    impl GuessService for Offline {
        async fn check_guess(&self, _guess: &str) -> Result<CheckResponse, ServiceError> {
            Err(ServiceError::Malformed("offline".into()))
        }

        async fn restart(&self) -> Result<(), ServiceError> {
            self.restarts.fetch_add(1, Ordering::SeqCst);
            if self.restart_fails {
                Err(ServiceError::Rejected {
                    status: 503,
                    message: "down".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn app() -> App {
        App::init(Arc::new(Offline::default()))
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.update(Some(Action::EnterChar(c)));
        }
    }

    fn verdict(feedback: [LetterStatus; WORD_LENGTH], game_over: bool) -> CheckResponse {
        CheckResponse {
            feedback,
            game_over,
        }
    }

    #[test]
    fn typing_and_deleting() {
        let mut app = app();
        type_word(&mut app, "ab1c");
        assert_eq!(app.game.current_guess().to_string(), "ABC__");
        assert_eq!(app.game.focused(), 3);

        // First backspace steps back, the next one clears
        app.update(Some(Action::DeleteChar));
        assert_eq!(app.game.focused(), 2);
        assert_eq!(app.game.current_guess().to_string(), "ABC__");
        app.update(Some(Action::DeleteChar));
        assert_eq!(app.game.current_guess().to_string(), "AB___");
        assert_eq!(app.game.focused(), 2);
    }

    #[test]
    fn arrows_move_the_cursor() {
        let mut app = app();
        app.update(Some(Action::MoveLeft));
        assert_eq!(app.game.focused(), 0);
        for _ in 0..10 {
            app.update(Some(Action::MoveRight));
        }
        assert_eq!(app.game.focused(), WORD_LENGTH - 1);
    }

    #[test]
    fn verdicts_update_the_board() {
        let mut app = app();
        type_word(&mut app, "money");
        let submission = app.game.begin_submit().unwrap();

        app.update(Some(Action::Checked {
            submission,
            result: Ok(verdict([Green; WORD_LENGTH], true)),
        }));
        assert!(app.game.is_over());
        assert_eq!(app.status.as_deref(), Some("Solved in 1/6!"));

        app.update(Some(Action::Restarted(Ok(()))));
        assert!(!app.game.is_over());
        assert_eq!(app.status, None);
    }

    #[test]
    fn failed_check_is_reported() {
        let mut app = app();
        type_word(&mut app, "flask");
        let submission = app.game.begin_submit().unwrap();

        app.update(Some(Action::Checked {
            submission,
            result: Err(ServiceError::Malformed("offline".into())),
        }));
        assert!(!app.game.is_submitting());
        assert_eq!(app.game.current_guess().to_string(), "FLASK");
        assert!(app.status.unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn restart_runs_once_at_a_time() {
        let service = Arc::new(Offline::default());
        let mut app = App::init(service.clone());
        type_word(&mut app, "kn");

        app.update(Some(Action::Restart));
        app.update(Some(Action::Restart));
        assert!(app.restarting);

        let action = app.action_rx.recv().await.unwrap();
        app.update(action);
        assert!(!app.restarting);
        assert!(app.game.current_guess().is_empty());
        assert_eq!(service.restarts.load(Ordering::SeqCst), 1);
        assert!(app.action_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_restart_keeps_the_board() {
        let service = Arc::new(Offline {
            restart_fails: true,
            ..Offline::default()
        });
        let mut app = App::init(service.clone());
        type_word(&mut app, "kn");

        app.update(Some(Action::Restart));
        let action = app.action_rx.recv().await.unwrap();
        app.update(action);

        assert!(!app.restarting);
        assert_eq!(app.game.current_guess().to_string(), "KN___");
        assert!(app.status.as_deref().unwrap().contains("down"));

        // The guard is released, so trying again reaches the service
        app.update(Some(Action::Restart));
        let action = app.action_rx.recv().await.unwrap();
        app.update(action);
        assert_eq!(service.restarts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn check_from_before_restart_is_ignored() {
        let mut app = app();
        type_word(&mut app, "money");
        let old = app.game.begin_submit().unwrap();

        app.update(Some(Action::Restarted(Ok(()))));
        type_word(&mut app, "money");
        let new = app.game.begin_submit().unwrap();

        app.update(Some(Action::Checked {
            submission: old.clone(),
            result: Ok(verdict([Green; WORD_LENGTH], true)),
        }));
        assert!(!app.game.is_over());
        assert_eq!(app.game.attempts(), 0);
        assert_eq!(app.status, None);

        // A late failure of the old check does not touch the new one either
        app.update(Some(Action::Checked {
            submission: old,
            result: Err(ServiceError::Malformed("offline".into())),
        }));
        assert!(app.game.is_submitting());
        assert_eq!(app.status, None);

        app.update(Some(Action::Checked {
            submission: new,
            result: Ok(verdict([Gray, Green, Gray, Gray, Gray], false)),
        }));
        assert_eq!(app.game.attempts(), 1);
        assert!(!app.game.is_over());
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut app = app();
        app.update(Some(Action::Exit));
        assert!(app.exit);
        assert!(app.token.is_cancelled());
    }
}
