//! TUI application state and logic

use crate::core::{DifficultyMode, GROUP_SIZE};
use crate::game::{Game, SelectOutcome, SubmitOutcome};
use crate::output::formatters::{select_message, submit_message};
use crate::selector::Direction;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

const MAX_MESSAGES: usize = 5;

/// Application state
pub struct App {
    pub game: Game,
    /// Index into the session's remaining words
    pub cursor: usize,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Board,
    Help,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Results for finished sessions in this run
#[derive(Debug, Default, Clone, Copy)]
pub struct Statistics {
    pub games_played: usize,
    pub games_won: usize,
}

impl Statistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64 * 100.0
        }
    }
}

impl App {
    #[must_use]
    pub fn new(game: Game) -> Self {
        let mut app = Self {
            game,
            cursor: 0,
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Board,
        };
        app.add_message(
            "Find four groups of four words. Space selects, Enter submits.",
            MessageStyle::Info,
        );
        if app.game.session().puzzle().is_fallback() {
            app.add_message(
                "Not enough groups available; playing the sample puzzle.",
                MessageStyle::Error,
            );
        }
        app
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Word under the cursor, if any remain
    #[must_use]
    pub fn cursor_word(&self) -> Option<&str> {
        self.game.session().remaining_words().get(self.cursor).copied()
    }

    fn clamp_cursor(&mut self) {
        let remaining = self.game.session().remaining_words().len();
        self.cursor = self.cursor.min(remaining.saturating_sub(1));
    }

    /// Move the cursor on the four-column grid
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let remaining = self.game.session().remaining_words().len();
        if remaining == 0 {
            return;
        }
        let target = self
            .cursor
            .checked_add_signed(dx + dy * GROUP_SIZE as isize)
            .filter(|&t| t < remaining);
        if let Some(target) = target {
            self.cursor = target;
        }
    }

    pub fn toggle_current(&mut self) {
        let Some(word) = self.cursor_word().map(str::to_string) else {
            return;
        };
        let outcome = self.game.session_mut().select_word(&word);
        if matches!(outcome, SelectOutcome::Full | SelectOutcome::Ignored) {
            self.add_message(&select_message(&word, outcome), MessageStyle::Error);
        }
    }

    pub fn submit(&mut self) {
        let outcome = self.game.session_mut().submit_guess();
        let style = match outcome {
            SubmitOutcome::Correct(_) | SubmitOutcome::Won(_) => MessageStyle::Success,
            SubmitOutcome::Incorrect { .. } | SubmitOutcome::Lost => MessageStyle::Error,
            SubmitOutcome::Rejected => MessageStyle::Info,
        };
        match outcome {
            SubmitOutcome::Won(_) => {
                self.stats.games_played += 1;
                self.stats.games_won += 1;
            }
            SubmitOutcome::Lost => self.stats.games_played += 1,
            _ => {}
        }
        self.add_message(&submit_message(&outcome), style);
        if matches!(outcome, SubmitOutcome::Won(_) | SubmitOutcome::Lost) {
            self.add_message("Press 'n' for a new game or 'q' to quit.", MessageStyle::Info);
        }
        self.clamp_cursor();
    }

    pub fn deselect_all(&mut self) {
        self.game.session_mut().deselect_all();
    }

    pub fn shuffle(&mut self) {
        if self.game.shuffle() {
            self.add_message("Board shuffled.", MessageStyle::Info);
        }
    }

    pub fn reveal(&mut self) {
        if self.game.session_mut().reveal_solution() {
            self.add_message("Solution revealed.", MessageStyle::Info);
        } else {
            self.add_message(
                "The solution can be revealed only after a loss.",
                MessageStyle::Error,
            );
        }
        self.clamp_cursor();
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
        self.cursor = 0;
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
    }

    pub fn navigate(&mut self, direction: Direction) {
        if self.game.navigate(direction) {
            self.cursor = 0;
            let (position, total) = self.game.view().position;
            self.add_message(&format!("Puzzle {position} of {total}"), MessageStyle::Info);
        } else if self.game.session().is_ended() && !self.game.is_custom() {
            self.add_message("Press 'n' for a new game to browse puzzles", MessageStyle::Info);
        }
    }

    pub fn change_difficulty(&mut self, mode: DifficultyMode) {
        if self.game.change_difficulty(mode) {
            self.cursor = 0;
            self.add_message(
                &format!("Difficulty: {}", mode.display_name()),
                MessageStyle::Info,
            );
        } else {
            self.add_message(
                "A shared puzzle keeps its own difficulty.",
                MessageStyle::Error,
            );
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.input_mode == InputMode::Help {
            // any key closes help
            self.input_mode = InputMode::Board;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.input_mode = InputMode::Help,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char('d') => self.deselect_all(),
            KeyCode::Char('s') => self.shuffle(),
            KeyCode::Char('r') => self.reveal(),
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('[') => self.navigate(Direction::Prev),
            KeyCode::Char(']') => self.navigate(Direction::Next),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.change_difficulty(DifficultyMode::ALL[index]);
            }
            _ => {}
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
