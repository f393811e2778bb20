//! TUI rendering with ratatui
//!
//! Board, selection and status panels for the puzzle.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Difficulty, GROUP_SIZE, Group};
use crate::game::{MAX_MISTAKES, SessionStatus};
use crate::output::formatters::mistake_dots;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Tile colour for a difficulty tier
const fn tier_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Yellow,
        Difficulty::Medium => Color::Green,
        Difficulty::Hard => Color::Blue,
        Difficulty::Expert => Color::Magenta,
    }
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(14),   // Main content
            Constraint::Length(4), // Selection / help
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_selection(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let view = app.game.view();
    let mut title = format!("🧩 {}", view.title().to_uppercase());
    if !view.is_custom {
        let (position, total) = view.position;
        title.push_str(&format!("  ({position}/{total})"));
    }

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn solved_line(group: &Group, width: usize) -> Line<'static> {
    let text = format!("{}: {}", group.category().to_uppercase(), group.words_label());
    Line::from(Span::styled(
        format!("{text:^width$}"),
        Style::default()
            .fg(Color::Black)
            .bg(tier_color(group.difficulty()))
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();
    let remaining = session.remaining_words();
    let cell = remaining
        .iter()
        .map(|w| w.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    let row_width = (cell + 1) * GROUP_SIZE;

    let mut lines: Vec<Line> = Vec::new();
    for group in session.solved_groups() {
        lines.push(solved_line(group, row_width));
        lines.push(Line::from(""));
    }

    for (row, words) in remaining.chunks(GROUP_SIZE).enumerate() {
        let spans: Vec<Span> = words
            .iter()
            .enumerate()
            .flat_map(|(col, word)| {
                let index = row * GROUP_SIZE + col;
                let mut style = Style::default().fg(Color::White);
                if session.is_selected(word) {
                    style = style
                        .fg(Color::Black)
                        .bg(Color::Gray)
                        .add_modifier(Modifier::BOLD);
                }
                if index == app.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                [
                    Span::styled(format!("{word:^cell$}"), style),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_mistakes(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_mistakes(f: &mut Frame, app: &App, area: Rect) {
    let remaining = app.game.session().mistakes_remaining();
    let percent = u16::from(remaining) * 100 / u16::from(MAX_MISTAKES);
    let color = if remaining <= 1 { Color::Red } else { Color::Cyan };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Mistakes Remaining ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(mistake_dots(remaining));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_selection(f: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();

    let (title, content, color) = match (app.input_mode, session.status()) {
        (InputMode::Help, _) => (
            " Keys | press any key to close ",
            "←↑↓→/hjkl move · Space select · Enter submit · d deselect · s shuffle · \
             r reveal · n new game · [ ] prev/next · 1-5 mixed/easy/medium/hard/expert · q quit"
                .to_string(),
            Color::Cyan,
        ),
        (InputMode::Board, SessionStatus::Won) => (
            " 🎉 SOLVED! 🎉 | Press 'n' for new game or 'q' to quit ",
            String::new(),
            Color::Green,
        ),
        (InputMode::Board, SessionStatus::Lost) => (
            " Out of mistakes | 'r' reveal, 'n' new game, 'q' quit ",
            String::new(),
            Color::Red,
        ),
        (InputMode::Board, SessionStatus::Playing) => (
            " Selection | Space toggles, Enter submits ",
            format!(
                "{} ({}/{GROUP_SIZE})",
                session.selected().join("  "),
                session.selected().len()
            ),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let view = app.game.view();

    let mode_text = if view.is_custom {
        "Mode: Custom".to_string()
    } else {
        format!("Mode: {}", view.mode.display_name())
    };
    let mode = Paragraph::new(mode_text).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.games_played,
        app.stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let solved_text = format!(
        "Solved: {}/{}",
        view.session.solved_groups().len(),
        view.session.puzzle().groups().len()
    );
    let solved = Paragraph::new(solved_text).alignment(Alignment::Center);
    f.render_widget(solved, chunks[2]);

    let help_text = if view.has_next || view.has_prev {
        "q: Quit | ?: Keys | [ ]: Browse"
    } else {
        "q: Quit | ?: Keys"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::sample_puzzle;
    use crate::game::Game;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn draws_title_and_words() {
        let app = App::new(Game::custom_with_rng(sample_puzzle(), StdRng::seed_from_u64(2)));
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("CUSTOM PUZZLE"));
        assert!(text.contains("BANANA"));
        assert!(text.contains("Mode: Custom"));
    }

    #[test]
    fn solved_line_is_padded() {
        let group = sample_puzzle().groups()[0].clone();
        let line = solved_line(&group, 60);
        assert_eq!(line.width(), 60);
    }
}
