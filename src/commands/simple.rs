//! Simple interactive CLI mode
//!
//! Text-based play without the TUI

use crate::core::{DifficultyMode, word_key};
use crate::game::{Game, SelectOutcome};
use crate::output::formatters::{select_message, submit_message};
use crate::output::print_board;
use crate::selector::Direction;
use anyhow::Result;
use std::io::{self, Write};

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Toggle one or more words
    Toggle(Vec<String>),
    Submit,
    Deselect,
    Shuffle,
    Navigate(Direction),
    NewGame,
    Mode(DifficultyMode),
    Reveal,
    Help,
    Quit,
    Invalid(String),
}

impl PlayCommand {
    /// Parse a prompt line against the words still on the board
    ///
    /// A line naming a board word is always a toggle, so words such as `S` or
    /// `ICE CREAM` are never read as a command or split apart. Other lines are
    /// checked for commands, then read as a word list: comma separated when
    /// the line has a comma, else whitespace separated with multi-word board
    /// words matched greedily.
    #[must_use]
    pub fn parse(input: &str, board: &[&str]) -> Self {
        let input = input.trim();
        if let Some(word) = find_board_word(input, board) {
            return Self::Toggle(vec![word.to_string()]);
        }

        let (head, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(h, r)| (h, r.trim()));

        match head.to_lowercase().as_str() {
            "" => Self::Invalid(String::new()),
            "submit" | "s" => Self::Submit,
            "deselect" | "d" => Self::Deselect,
            "shuffle" => Self::Shuffle,
            "next" | "]" => Self::Navigate(Direction::Next),
            "prev" | "[" => Self::Navigate(Direction::Prev),
            "new" | "n" => Self::NewGame,
            "reveal" | "r" => Self::Reveal,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "mode" => match rest.parse() {
                Ok(mode) => Self::Mode(mode),
                Err(err) => Self::Invalid(format!("{err}")),
            },
            _ if input.contains(',') => Self::Toggle(
                input
                    .split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => Self::Toggle(split_words(input, board)),
        }
    }
}

/// The board word `text` names, ignoring case
fn find_board_word<'a>(text: &str, board: &[&'a str]) -> Option<&'a str> {
    let key = word_key(text);
    board.iter().copied().find(|w| word_key(w) == key)
}

/// Split on whitespace, joining runs of tokens that spell a board word
fn split_words(input: &str, board: &[&str]) -> Vec<String> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut words = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        let longest = (start + 1..=tokens.len())
            .rev()
            .find_map(|end| find_board_word(&tokens[start..end].join(" "), board).map(|w| (end, w)));
        match longest {
            Some((end, word)) => {
                words.push(word.to_string());
                start = end;
            }
            None => {
                words.push(tokens[start].to_string());
                start += 1;
            }
        }
    }
    words
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading from stdin or writing to stdout fails.
pub fn run_simple(game: &mut Game) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Connections - Simple Mode                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Find four groups of four words that share something in common.\n");
    print_help();

    print_board(&game.view());

    loop {
        let Some(line) = get_user_input("Words or command")? else {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        };

        let command = PlayCommand::parse(&line, &game.session().remaining_words());
        let redraw = match command {
            PlayCommand::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            PlayCommand::Help => {
                print_help();
                false
            }
            PlayCommand::Toggle(words) => {
                for word in &words {
                    let outcome = game.session_mut().select_word(word);
                    if outcome != SelectOutcome::Selected && outcome != SelectOutcome::Deselected {
                        println!("{}", select_message(word, outcome));
                    }
                }
                println!("Selected: {}", game.session().selected().join(", "));
                false
            }
            PlayCommand::Submit => {
                let outcome = game.session_mut().submit_guess();
                println!("\n{}", submit_message(&outcome));
                true
            }
            PlayCommand::Deselect => {
                game.session_mut().deselect_all();
                println!("Selection cleared.");
                false
            }
            PlayCommand::Shuffle => game.shuffle(),
            PlayCommand::Navigate(direction) => {
                if game.session().is_ended() && !game.is_custom() {
                    println!("This game is over. Start a new game (n) to browse puzzles.");
                } else if !game.navigate(direction) {
                    println!("No other puzzles to move to.");
                }
                true
            }
            PlayCommand::NewGame => {
                game.new_game();
                println!("\n🔄 New game started!");
                true
            }
            PlayCommand::Mode(mode) => {
                if game.change_difficulty(mode) {
                    println!("\nDifficulty set to {}.", mode.display_name());
                } else {
                    println!("A shared puzzle keeps its own difficulty.");
                }
                true
            }
            PlayCommand::Reveal => {
                if !game.session_mut().reveal_solution() {
                    println!("The solution can be revealed only after a loss.");
                }
                true
            }
            PlayCommand::Invalid(reason) => {
                if !reason.is_empty() {
                    println!("❌ {reason}");
                }
                false
            }
        };

        if redraw {
            print_board(&game.view());
        }
    }
}

fn print_help() {
    println!("Type one or more words to select or deselect them.");
    println!("Separate words with commas when a word contains a space.");
    println!("Commands: submit (s), deselect (d), shuffle, next (]), prev ([),");
    println!("          new (n), mode <mixed|easy|medium|hard|expert>, reveal (r), quit (q)\n");
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}
