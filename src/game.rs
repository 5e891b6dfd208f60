//! The game state machine behind the board.
//!
//! [`GameView`] owns every piece of state the board is drawn from. It never
//! talks to the terminal; the renderer reads it and honors [`GameView::focused`].

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::service::{CheckResponse, GuessService};
use crate::wordle::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Over,
}

/// Keys with a meaning beyond editing a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Enter,
}

/// A guess handed to the service, tagged so its verdict can be matched up.
///
/// Ids are never reused, not even across restarts, so a verdict from an
/// earlier game cannot be mistaken for one of the current game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub guess: String,
}

#[derive(Debug)]
pub struct GameView {
    phase: Phase,
    current: Cells,
    /// Submitted guesses, each stored with its feedback
    history: Vec<GuessRecord>,
    /// Latest status seen for each letter
    letters: FxHashMap<char, LetterStatus>,
    focus: usize,
    /// The guess waiting for a verdict, if any
    pending: Option<Submission>,
    /// Id for the next submission, survives restarts
    next_id: u64,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView {
    pub fn new() -> Self {
        GameView {
            phase: Phase::Playing,
            current: Cells::new(),
            history: Vec::with_capacity(MAX_ATTEMPTS),
            letters: FxHashMap::default(),
            focus: 0,
            pending: None,
            next_id: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_guess(&self) -> &Cells {
        &self.current
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn attempts(&self) -> usize {
        self.history.len()
    }

    /// The cell the renderer should put the cursor on
    pub fn focused(&self) -> usize {
        self.focus
    }

    pub fn letter_feedback(&self, letter: char) -> Option<LetterStatus> {
        self.letters.get(&letter.to_ascii_uppercase()).copied()
    }

    /// True when the last verdict was all green
    pub fn is_solved(&self) -> bool {
        self.history.last().is_some_and(GuessRecord::is_solved)
    }

    /// Writes `raw` into the cell at `index`.
    ///
    /// Only an empty string or a single letter is accepted; anything else,
    /// an index outside the row or a finished game leaves the state untouched.
    /// Returns whether the edit was applied.
    pub fn edit_cell(&mut self, index: usize, raw: &str) -> bool {
        if self.is_over() || index >= WORD_LENGTH {
            return false;
        }
        let Some(letter) = parse_cell_input(raw) else {
            debug!(index, raw, "Ignoring cell input");
            return false;
        };

        self.current.set_letter(letter, index);
        if letter.is_some() && index < WORD_LENGTH - 1 {
            self.focus = index + 1;
        }
        self.focus_first_empty();
        true
    }

    pub fn focus_first_empty(&mut self) {
        if let Some(index) = self.current.first_empty() {
            self.focus = index;
        }
    }

    /// Moves the cursor on explicit request, e.g. arrow keys.
    pub fn request_focus(&mut self, index: usize) -> bool {
        if self.is_over() || index >= WORD_LENGTH {
            return false;
        }
        self.focus = index;
        true
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Playing
            && self.pending.is_none()
            && self.history.len() < MAX_ATTEMPTS
            && self.current.is_complete()
    }

    /// Marks the current row as in flight and returns what to send.
    ///
    /// While a guess is in flight no other submission is accepted. The
    /// verdict has to be handed to [`GameView::apply_feedback`], a failure
    /// to [`GameView::abort_submit`].
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        let guess = self.current.to_guess()?;
        debug_assert_eq!(guess.len(), WORD_LENGTH);

        let submission = Submission {
            id: self.next_id,
            guess,
        };
        self.next_id += 1;
        debug!(
            id = submission.id,
            guess = %submission.guess,
            attempt = self.history.len() + 1,
            "Submitting guess"
        );
        self.pending = Some(submission.clone());
        Some(submission)
    }

    fn is_pending(&self, submission: &Submission) -> bool {
        self.pending.as_ref().is_some_and(|p| p.id == submission.id)
    }

    /// Records the verdict for `submission`.
    ///
    /// Verdicts for anything but the submission in flight are dropped, which
    /// covers answers arriving after a restart. Returns whether it was applied.
    pub fn apply_feedback(&mut self, submission: &Submission, response: CheckResponse) -> bool {
        if !self.is_pending(submission) {
            debug!(
                id = submission.id,
                guess = %submission.guess,
                "Dropping verdict for a guess that is not in flight"
            );
            return false;
        }
        self.pending = None;

        let record = GuessRecord::new(submission.guess.as_str(), response.feedback);
        // Later guesses overwrite earlier verdicts, even a better one
        for (letter, status) in record.letters() {
            self.letters.insert(letter, status);
        }
        self.history.push(record);
        self.current = Cells::new();

        if self.history.len() >= MAX_ATTEMPTS || response.game_over {
            info!(
                attempts = self.history.len(),
                solved = self.is_solved(),
                "Game over"
            );
            self.phase = Phase::Over;
        }
        self.focus_first_empty();
        true
    }

    /// Releases the in-flight guard after a failed check. The row is kept.
    pub fn abort_submit(&mut self, submission: &Submission) -> bool {
        if self.is_pending(submission) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Sends the current row to `service` and applies the verdict.
    ///
    /// Returns `Ok(false)` when the row could not be submitted at all.
    pub async fn submit<S>(&mut self, service: &S) -> Result<bool, ServiceError>
    where
        S: GuessService + ?Sized,
    {
        let Some(submission) = self.begin_submit() else {
            return Ok(false);
        };
        match service.check_guess(&submission.guess).await {
            Ok(response) => Ok(self.apply_feedback(&submission, response)),
            Err(err) => {
                self.abort_submit(&submission);
                Err(err)
            }
        }
    }

    /// Handles the keys that do more than edit a cell.
    ///
    /// Backspace on an empty cell moves the cursor one cell back without
    /// touching the row. Enter starts a submission and returns what is now
    /// in flight, see [`GameView::begin_submit`].
    pub fn handle_key(&mut self, index: usize, key: Key) -> Option<Submission> {
        match key {
            Key::Backspace => {
                if !self.is_over() && index > 0 && self.current.get(index).is_none() {
                    self.focus = index - 1;
                }
                None
            }
            Key::Enter => self.begin_submit(),
        }
    }

    /// Starts a new game on the service, then clears the board.
    pub async fn restart<S>(&mut self, service: &S) -> Result<(), ServiceError>
    where
        S: GuessService + ?Sized,
    {
        service.restart().await?;
        self.reset();
        Ok(())
    }

    /// Clears every store and returns to [`Phase::Playing`].
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = GameView::new();
        self.next_id = next_id;
        info!("New game");
    }

    pub fn letter_color(&self, letter: char) -> LetterColor {
        self.letter_feedback(letter).into()
    }
}
