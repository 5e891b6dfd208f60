use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Per-letter verdict returned by the guess service.
///
/// On the wire the variants are the lowercase color names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// The letter does not appear in the word
    Gray,
    /// The letter appears, but somewhere else
    Yellow,
    /// The letter is in the right position
    Green,
}

pub type Feedback = [LetterStatus; WORD_LENGTH];

/// The color a key of the on-screen keyboard is painted with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LetterColor {
    Green,
    Yellow,
    Gray,
    Unset,
}

impl From<Option<LetterStatus>> for LetterColor {
    fn from(status: Option<LetterStatus>) -> Self {
        match status {
            Some(LetterStatus::Green) => LetterColor::Green,
            Some(LetterStatus::Yellow) => LetterColor::Yellow,
            Some(LetterStatus::Gray) => LetterColor::Gray,
            None => LetterColor::Unset,
        }
    }
}

/// The editable row of input boxes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cells {
    pub chars: [Option<char>; WORD_LENGTH],
}

impl Default for Cells {
    fn default() -> Self {
        Self::new()
    }
}

impl Cells {
    /// Create a row with empty cells
    pub fn new() -> Cells {
        Cells {
            chars: [None; WORD_LENGTH],
        }
    }

    /// Set the letter at a position of the row
    ///
    /// # Example
    ///
    /// ```
    /// use wordle_at_home::wordle::Cells;
    /// let mut cells = Cells::new();
    /// cells.set_letter(Some('E'), 0);
    /// assert_eq!(cells.chars[0], Some('E'));
    /// ```
    ///
    /// Positions past the end of the row are ignored and `false` is returned.
    pub fn set_letter(&mut self, char: Option<char>, position: usize) -> bool {
        match self.chars.get_mut(position) {
            Some(cell) => {
                *cell = char;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, position: usize) -> Option<char> {
        self.chars.get(position).copied().flatten()
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.chars.iter().position(|c| c.is_none())
    }

    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.iter().all(|c| c.is_none())
    }

    /// Joins the row into a guess, if every cell holds a letter.
    ///
    /// ```
    /// use wordle_at_home::wordle::create_cells_from_string;
    /// assert_eq!(create_cells_from_string("crane").to_guess().as_deref(), Some("CRANE"));
    /// assert_eq!(create_cells_from_string("cra").to_guess(), None);
    /// ```
    pub fn to_guess(&self) -> Option<String> {
        self.chars.iter().copied().collect()
    }
}

/// Normalizes what the player typed into a cell.
///
/// Returns `Some(None)` for a clear, `Some(Some(letter))` for a single letter
/// and `None` when the input has to be ignored.
///
/// ```
/// use wordle_at_home::wordle::parse_cell_input;
/// assert_eq!(parse_cell_input("q"), Some(Some('Q')));
/// assert_eq!(parse_cell_input(""), Some(None));
/// assert_eq!(parse_cell_input("5"), None);
/// assert_eq!(parse_cell_input("ab"), None);
/// ```
pub fn parse_cell_input(raw: &str) -> Option<Option<char>> {
    let mut chars = raw.chars().flat_map(char::to_uppercase);
    match (chars.next(), chars.next()) {
        (None, _) => Some(None),
        (Some(c), None) if c.is_ascii_uppercase() => Some(Some(c)),
        _ => None,
    }
}

/// A submitted guess together with the feedback the service returned for it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GuessRecord {
    pub word: String,
    pub feedback: Feedback,
}

impl GuessRecord {
    pub fn new(word: impl Into<String>, feedback: Feedback) -> GuessRecord {
        GuessRecord {
            word: word.into(),
            feedback,
        }
    }

    /// Iterate over the letters of the guess and their status
    pub fn letters(&self) -> impl Iterator<Item = (char, LetterStatus)> + '_ {
        self.word.chars().zip(self.feedback)
    }

    pub fn is_solved(&self) -> bool {
        self.feedback.iter().all(|s| *s == LetterStatus::Green)
    }
}

impl fmt::Display for Cells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.chars {
            match c {
                Some(ch) => write!(f, "{}", ch)?,
                None => write!(f, "_")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for GuessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ch, s) in self.letters() {
            let ch = format!(" {} ", ch).bold();
            match s {
                LetterStatus::Gray => write!(f, "{}", ch.on_black())?,
                LetterStatus::Yellow => write!(f, "{}", ch.black().on_yellow())?,
                LetterStatus::Green => write!(f, "{}", ch.black().on_green())?,
            }
        }
        Ok(())
    }
}

pub fn create_cells_from_string(word: &str) -> Cells {
    let mut res = Cells::new();
    for (i, letter) in word.chars().take(WORD_LENGTH).enumerate() {
        res.set_letter(Some(letter.to_ascii_uppercase()), i);
    }
    res
}

#[cfg(test)]
mod tests {

    use super::*;
    use LetterStatus::*;

    #[test]
    fn status_wire_format() {
        let feedback: Feedback =
            serde_json::from_str(r#"["green","gray","gray","yellow","gray"]"#).unwrap();
        assert_eq!(feedback, [Green, Gray, Gray, Yellow, Gray]);
        assert_eq!(serde_json::to_string(&Yellow).unwrap(), r#""yellow""#);
        assert!(serde_json::from_str::<Feedback>(r#"["green","gray"]"#).is_err());
        assert!(serde_json::from_str::<LetterStatus>(r#""blue""#).is_err());
    }

    #[test]
    fn color_from_status() {
        assert_eq!(LetterColor::from(Some(Green)), LetterColor::Green);
        assert_eq!(LetterColor::from(Some(Yellow)), LetterColor::Yellow);
        assert_eq!(LetterColor::from(Some(Gray)), LetterColor::Gray);
        assert_eq!(LetterColor::from(None), LetterColor::Unset);
    }

    #[test]
    fn cell_input() {
        assert_eq!(parse_cell_input("a"), Some(Some('A')));
        assert_eq!(parse_cell_input("Z"), Some(Some('Z')));
        assert_eq!(parse_cell_input(""), Some(None));
        assert_eq!(parse_cell_input(" "), None);
        assert_eq!(parse_cell_input("é"), None);
        assert_eq!(parse_cell_input("AB"), None);
        assert_eq!(parse_cell_input("?"), None);
    }

    #[test]
    fn cells_first_empty() {
        let mut cells = Cells::new();
        assert_eq!(cells.first_empty(), Some(0));
        assert!(cells.is_empty());

        cells.set_letter(Some('A'), 0);
        cells.set_letter(Some('C'), 2);
        assert_eq!(cells.first_empty(), Some(1));
        assert_eq!(cells.to_guess(), None);
        assert_eq!(cells.to_string(), "A_C__");

        assert!(!cells.set_letter(Some('Z'), WORD_LENGTH));
        assert_eq!(cells.to_string(), "A_C__");

        let cells = create_cells_from_string("slate");
        assert!(cells.is_complete());
        assert_eq!(cells.first_empty(), None);
        assert_eq!(cells.to_string(), "SLATE");
    }

    #[test]
    fn record_letters() {
        let record = GuessRecord::new("ABCDE", [Green, Gray, Gray, Yellow, Gray]);
        let letters: Vec<_> = record.letters().collect();
        assert_eq!(letters[0], ('A', Green));
        assert_eq!(letters[3], ('D', Yellow));
        assert!(!record.is_solved());
        assert!(GuessRecord::new("MONEY", [Green; WORD_LENGTH]).is_solved());
    }
}
