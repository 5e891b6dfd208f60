use ratatui::{
    prelude::*,
    widgets::{block::*, *},
};

use wordle_at_home::wordle::{
    Cells, GuessRecord, LetterColor, ALPHABET, MAX_ATTEMPTS, WORD_LENGTH,
};

use super::App;

const TILE_WIDTH: u16 = 7;
const TILE_HEIGHT: u16 = 3;
const KEYS_PER_ROW: usize = 10;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = self.create_border();

        let keyboard_rows = ALPHABET.len().div_ceil(KEYS_PER_ROW) as u16;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(TILE_HEIGHT * MAX_ATTEMPTS as u16),
                Constraint::Length(TILE_HEIGHT + 1),
                Constraint::Length(1),
                Constraint::Length(TILE_HEIGHT * keyboard_rows + 1),
                Constraint::Fill(1),
            ])
            .split(border.inner(area));

        self.render_history(rows[0], buf);
        self.render_input(rows[1], buf);
        self.render_status(rows[2], buf);
        self.render_keyboard(rows[3], buf);

        border.render(area, buf);
    }
}

impl App {
    fn create_border(&self) -> Block<'_> {
        let title = Title::from(" Wordle at Home ".bold());
        let instructions = Title::from(Line::from(vec![
            " Quit ".into(),
            "<Esc> ".blue().bold(),
            " Submit ".into(),
            "<Enter> ".blue().bold(),
            " Restart ".into(),
            "<Ctrl-R> ".blue().bold(),
        ]));
        Block::default()
            .title(title.alignment(Alignment::Center))
            .title(
                instructions
                    .alignment(Alignment::Center)
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL)
            .border_set(symbols::border::PLAIN)
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let word_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(TILE_HEIGHT); MAX_ATTEMPTS])
            .split(area);

        for (i, row) in word_rows.iter().enumerate() {
            match self.game().guesses().get(i) {
                Some(record) => record.render(*row, buf),
                None => render_blank_row(*row, buf),
            }
        }
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let area = Block::new().padding(Padding::top(1)).inner(area);
        let game = self.game();

        if game.is_over() {
            Paragraph::new(vec![
                Line::from("Game Over!".light_green().bold()),
                Line::from(vec![
                    "Press ".into(),
                    "<Enter>".blue().bold(),
                    " to play again".into(),
                ]),
            ])
            .centered()
            .render(area, buf);
            return;
        }

        // While a guess is in flight the row is dimmed
        let focused = if game.is_submitting() {
            None
        } else {
            Some(game.focused())
        };
        game.current_guess().render(area, buf, focused);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let game = self.game();
        let line = match &self.status {
            Some(message) => Line::from(message.as_str().yellow()),
            None => Line::from(vec![
                "Attempt ".dark_gray(),
                (game.attempts() + 1).min(MAX_ATTEMPTS).to_string().bold(),
                format!(" of {MAX_ATTEMPTS}").dark_gray(),
            ]),
        };
        Paragraph::new(line).centered().render(area, buf);
    }

    fn render_keyboard(&self, area: Rect, buf: &mut Buffer) {
        let area = Block::new().padding(Padding::top(1)).inner(area);
        let letters: Vec<char> = ALPHABET.chars().collect();
        let chunks: Vec<&[char]> = letters.chunks(KEYS_PER_ROW).collect();

        let key_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(TILE_HEIGHT); chunks.len()])
            .split(area);

        for (row, keys) in key_rows.iter().zip(chunks) {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(TILE_WIDTH - 2); keys.len()])
                .flex(layout::Flex::Center)
                .split(*row);
            for (column, letter) in columns.iter().zip(keys) {
                let color = self.game().letter_color(*letter);
                render_tile(*column, buf, *letter, color);
            }
        }
    }
}

fn tile_style(color: LetterColor) -> Style {
    match color {
        LetterColor::Green => Style::default()
            .bg(Color::LightGreen)
            .fg(Color::Black)
            .bold(),
        LetterColor::Yellow => Style::default().bg(Color::LightYellow).fg(Color::Black),
        LetterColor::Gray => Style::default().bg(Color::DarkGray).fg(Color::White),
        LetterColor::Unset => Style::default().fg(Color::White),
    }
}

fn render_tile(area: Rect, buf: &mut Buffer, letter: char, color: LetterColor) {
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    Paragraph::new(String::from(letter))
        .bold()
        .centered()
        .block(block)
        .style(tile_style(color))
        .render(area, buf);
}

fn tile_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(TILE_WIDTH); WORD_LENGTH])
        .flex(layout::Flex::Center)
        .split(area)
}

fn render_blank_row(area: Rect, buf: &mut Buffer) {
    for column in tile_columns(area).iter() {
        Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().dark_gray())
            .render(*column, buf);
    }
}

trait RenderRow {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

impl RenderRow for GuessRecord {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        for (column, (letter, status)) in tile_columns(area).iter().zip(self.letters()) {
            let color = LetterColor::from(Some(status));
            render_tile(*column, buf, letter, color);
        }
    }
}

trait RenderInput {
    fn render(&self, area: Rect, buf: &mut Buffer, focused: Option<usize>);
}

impl RenderInput for Cells {
    fn render(&self, area: Rect, buf: &mut Buffer, focused: Option<usize>) {
        for (i, column) in tile_columns(area).iter().enumerate() {
            let (border_type, border_style) = match focused {
                Some(pos) if pos == i => (BorderType::Double, Style::new().light_blue()),
                Some(_) => (BorderType::Rounded, Style::new().white()),
                None => (BorderType::Rounded, Style::new().dark_gray()),
            };
            let block = Block::new()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style);
            let letter = self.get(i).map(String::from).unwrap_or_default();
            Paragraph::new(letter)
                .bold()
                .centered()
                .block(block)
                .render(*column, buf);
        }
    }
}
