//! Formatting utilities for terminal output

use crate::core::{Difficulty, GROUP_SIZE};
use crate::game::{MAX_MISTAKES, SelectOutcome, SubmitOutcome};
use colored::{Color, ColoredString, Colorize};

/// Tile colour for a difficulty tier
#[must_use]
pub const fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Yellow,
        Difficulty::Medium => Color::Green,
        Difficulty::Hard => Color::Blue,
        Difficulty::Expert => Color::Magenta,
    }
}

/// Text painted in the tier's colour
#[must_use]
pub fn paint_difficulty(text: &str, difficulty: Difficulty) -> ColoredString {
    text.color(difficulty_color(difficulty)).bold()
}

/// Remaining mistakes as filled and hollow dots, e.g. `●●○○`
#[must_use]
pub fn mistake_dots(remaining: u8) -> String {
    let remaining = remaining.min(MAX_MISTAKES);
    format!(
        "{}{}",
        "●".repeat(usize::from(remaining)),
        "○".repeat(usize::from(MAX_MISTAKES - remaining))
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { (value * width / max).min(width) };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Lay words out four per row, each padded to the widest word
#[must_use]
pub fn board_rows<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let width = words.iter().map(|w| w.as_ref().chars().count()).max().unwrap_or(0);
    words
        .chunks(GROUP_SIZE)
        .map(|row| {
            row.iter()
                .map(|w| format!("[{:^width$}]", w.as_ref()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Shorten an RFC 3339 timestamp to `YYYY-MM-DD HH:MM`
#[must_use]
pub fn short_timestamp(rfc3339: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(rfc3339).map_or_else(
        |_| rfc3339.to_string(),
        |t| t.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Feedback for a word that was not simply toggled
#[must_use]
pub fn select_message(word: &str, outcome: SelectOutcome) -> String {
    match outcome {
        SelectOutcome::Selected => format!("Selected {word}."),
        SelectOutcome::Deselected => format!("Deselected {word}."),
        SelectOutcome::Full => format!("Already four words selected; {word} was not added."),
        SelectOutcome::Ignored => format!("{word} is not on the board."),
    }
}

/// Feedback after submitting a selection
#[must_use]
pub fn submit_message(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Correct(group) => format!("Correct! Category: {}", group.category()),
        SubmitOutcome::Incorrect { remaining } => format!(
            "Incorrect! {remaining} {} remaining",
            if *remaining == 1 { "mistake" } else { "mistakes" }
        ),
        SubmitOutcome::Won(group) => format!(
            "Correct! Category: {}. Congratulations, you found every group!",
            group.category()
        ),
        SubmitOutcome::Lost => {
            "Out of mistakes. Reveal the solution to see the groups you missed.".to_string()
        }
        SubmitOutcome::Rejected => "Select exactly four words to submit.".to_string(),
    }
}
