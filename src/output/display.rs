//! Display functions for command results

use super::formatters::{
    board_rows, create_progress_bar, mistake_dots, paint_difficulty, short_timestamp,
};
use crate::backend::{Submission, SubmissionStats, SubmissionStatus};
use crate::commands::{AdminOutcome, DraftCheck, GenerateResult};
use crate::core::{GROUP_SIZE, Group};
use crate::game::{GameView, SessionStatus};
use colored::{Color, Colorize};

fn banner(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn print_group_line(group: &Group) {
    println!(
        "  {} {}",
        paint_difficulty(&format!("{:<24}", group.category()), group.difficulty()),
        group.words_label()
    );
}

/// Print the board for the simple mode
pub fn print_board(view: &GameView<'_>) {
    let session = view.session;
    let (position, total) = view.position;

    println!("\n{}", "─".repeat(60).cyan());
    if view.is_custom {
        println!("{}", view.title().bright_yellow().bold());
    } else {
        println!(
            "{}  {}",
            view.title().bright_yellow().bold(),
            format!("puzzle {position}/{total}").bright_black()
        );
    }
    println!("{}", "─".repeat(60).cyan());

    for group in session.solved_groups() {
        print_group_line(group);
    }

    let remaining = session.remaining_words();
    if !remaining.is_empty() {
        println!();
        for row in board_rows(&remaining) {
            println!("  {row}");
        }
    }

    println!(
        "\nMistakes remaining: {}",
        mistake_dots(session.mistakes_remaining()).bright_red()
    );
    if !session.selected().is_empty() {
        println!(
            "Selected ({}/{GROUP_SIZE}): {}",
            session.selected().len(),
            session.selected().join(", ").bright_white().bold()
        );
    }

    match session.status() {
        SessionStatus::Won => println!("{}", "🎉 Puzzle solved!".green().bold()),
        SessionStatus::Lost => println!("{}", "❌ Game over.".red().bold()),
        SessionStatus::Playing => {}
    }
}

/// Print generated candidates
pub fn print_generate_result(result: &GenerateResult, verbose: bool) {
    banner(&format!("CANDIDATES: {}", result.mode.display_name().to_uppercase()));

    println!("\n📊 {}", "Pool:".bright_cyan().bold());
    for &(tier, count) in &result.tier_counts {
        println!(
            "   {} {count:3} groups",
            paint_difficulty(&format!("{:<8}", tier.display_name()), tier)
        );
    }

    if result.is_fallback() {
        println!(
            "\n{}",
            "⚠️  Not enough groups for this mode; play would use the sample puzzle."
                .yellow()
                .bold()
        );
        return;
    }

    println!(
        "\n🧩 {} {}",
        result.candidates.len().to_string().bright_yellow().bold(),
        if result.candidates.len() == 1 {
            "candidate"
        } else {
            "candidates"
        }
    );
    for puzzle in &result.candidates {
        println!("\n {}", puzzle.id().bright_white().bold());
        if verbose {
            for group in puzzle.groups() {
                print_group_line(group);
            }
        } else {
            let categories: Vec<String> = puzzle
                .groups()
                .iter()
                .map(|g| paint_difficulty(g.category(), g.difficulty()).to_string())
                .collect();
            println!("  {}", categories.join(" · "));
        }
    }
}

/// Print a draft validation report with its board preview
pub fn print_draft_check(check: &DraftCheck) {
    banner("PUZZLE DRAFT");

    println!();
    for (i, group) in check.draft.groups().iter().enumerate() {
        let category = if group.category().trim().is_empty() {
            "(no category)"
        } else {
            group.category()
        };
        println!(
            "  {}. {} {}/{GROUP_SIZE} words",
            i + 1,
            paint_difficulty(&format!("{category:<24}"), group.difficulty()),
            group.filled_count()
        );
    }

    let preview: Vec<&str> = check.preview.iter().map(|t| t.text.as_str()).collect();
    println!("\n👀 {}", "Preview:".bright_cyan().bold());
    for row in board_rows(&preview) {
        println!("  {row}");
    }

    println!();
    if check.report.is_valid() {
        println!("{}", "✅ Ready to share or submit.".green().bold());
    } else if check.report.violations.is_empty() {
        println!("{}", format!("⚠️  {}", check.report).yellow().bold());
    } else {
        for violation in &check.report.violations {
            println!("{} {violation}", "❌".red());
        }
    }
}

/// Print a share link
pub fn print_share_link(link: &str) {
    println!("\n🔗 {}", "Share link:".bright_cyan().bold());
    println!("   {}", link.bright_white().underline());
    println!();
}

/// Print confirmation of a new submission
pub fn print_submission_created(id: &str) {
    println!(
        "\n{} {}",
        "✅ Submitted for review:".green().bold(),
        id.bright_white()
    );
    println!("   A moderator will approve or reject it.\n");
}

fn status_label(status: SubmissionStatus) -> colored::ColoredString {
    match status {
        SubmissionStatus::Pending => status.as_str().yellow(),
        SubmissionStatus::Approved => status.as_str().green(),
        SubmissionStatus::Rejected => status.as_str().red(),
    }
}

fn print_submissions(submissions: &[Submission]) {
    banner("SUBMISSIONS");
    if submissions.is_empty() {
        println!("\n  No submissions.\n");
        return;
    }

    for submission in submissions {
        println!(
            "\n {} [{}] {}",
            submission.id.bright_white().bold(),
            status_label(submission.status),
            short_timestamp(&submission.created_at).bright_black()
        );
        if let Some(title) = &submission.title {
            println!("  {}", title.bright_yellow());
        }
        println!("  by {}", submission.submitted_by);
        if let Some(description) = &submission.description {
            println!("  {description}");
        }
        for group in submission.puzzle.groups() {
            print_group_line(group);
        }
        if let Some(notes) = submission.admin_notes.as_deref().filter(|n| !n.is_empty()) {
            println!("  📝 {notes}");
        }
    }
    println!();
}

fn print_stats(stats: &SubmissionStats) {
    banner("SUBMISSION STATS");
    println!("\n   Total:     {}", stats.total.to_string().bright_yellow().bold());
    for (label, count, color) in [
        ("Pending", stats.pending, Color::Yellow),
        ("Approved", stats.approved, Color::Green),
        ("Rejected", stats.rejected, Color::Red),
    ] {
        println!(
            "   {label:<10} {} {count:4}",
            create_progress_bar(count, stats.total, 30).color(color)
        );
    }
    println!();
}

/// Print the result of an admin action
pub fn print_admin_outcome(outcome: &AdminOutcome) {
    match outcome {
        AdminOutcome::Submissions(list) => print_submissions(list),
        AdminOutcome::Stats(stats) => print_stats(stats),
        AdminOutcome::Reviewed { id, status } => {
            println!("\n✓ Submission {} is now {}\n", id.bright_white(), status_label(*status));
        }
    }
}
