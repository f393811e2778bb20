//! Puzzle session state machine
//!
//! One attempt at one puzzle. The session moves from `Playing` to either
//! `Won` or `Lost`; both are terminal. All mutation goes through the methods
//! below, each of which runs to completion.

use super::evaluator::evaluate;
use crate::core::{GROUP_SIZE, Group, PUZZLE_GROUPS, Puzzle, word_key};
use rand::Rng;
use rand::seq::SliceRandom;

/// Wrong guesses allowed before the session is lost
pub const MAX_MISTAKES: u8 = 4;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

/// Result of toggling a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Deselected,
    /// Four words are already selected
    Full,
    /// Session ended, or the word is not on the board
    Ignored,
}

/// Result of submitting the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A group was found and more remain
    Correct(Group),
    /// No group matched; the session continues
    Incorrect { remaining: u8 },
    /// The last group was found
    Won(Group),
    /// The last mistake was spent
    Lost,
    /// Nothing was evaluated: not four words, or the session has ended
    Rejected,
}

/// State of one attempt at a puzzle
#[derive(Debug, Clone)]
pub struct SessionState {
    puzzle: Puzzle,
    /// All sixteen words in display order
    board: Vec<String>,
    selected: Vec<String>,
    mistakes_remaining: u8,
    solved: Vec<Group>,
    status: SessionStatus,
}

impl SessionState {
    /// Start a session with the board shuffled by `rng`
    pub fn new<R: Rng + ?Sized>(puzzle: Puzzle, rng: &mut R) -> Self {
        let mut session = Self::unshuffled(puzzle);
        session.board.shuffle(rng);
        session
    }

    /// Start a session with the board in authored order
    #[must_use]
    pub fn unshuffled(puzzle: Puzzle) -> Self {
        let board = puzzle.words().map(str::to_string).collect();
        Self {
            puzzle,
            board,
            selected: Vec::with_capacity(GROUP_SIZE),
            mistakes_remaining: MAX_MISTAKES,
            solved: Vec::with_capacity(PUZZLE_GROUPS),
            status: SessionStatus::Playing,
        }
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// All sixteen words in display order, solved ones included
    #[must_use]
    pub fn board(&self) -> &[String] {
        &self.board
    }

    /// Selected words in the order they were picked
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub const fn mistakes_remaining(&self) -> u8 {
        self.mistakes_remaining
    }

    #[must_use]
    pub const fn mistakes_made(&self) -> u8 {
        MAX_MISTAKES - self.mistakes_remaining
    }

    /// Solved groups in the order they were found (or revealed)
    #[must_use]
    pub fn solved_groups(&self) -> &[Group] {
        &self.solved
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.status != SessionStatus::Playing
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == SessionStatus::Won
    }

    /// Submission is possible with exactly four words while playing
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_ended() && self.selected.len() == GROUP_SIZE
    }

    #[must_use]
    pub fn is_selected(&self, word: &str) -> bool {
        let key = word_key(word);
        self.selected.iter().any(|w| word_key(w) == key)
    }

    /// Whether `word` belongs to a solved group
    #[must_use]
    pub fn is_solved(&self, word: &str) -> bool {
        self.solved.iter().any(|g| g.contains(word))
    }

    /// Board words not yet in a solved group, in display order
    #[must_use]
    pub fn remaining_words(&self) -> Vec<&str> {
        self.board
            .iter()
            .map(String::as_str)
            .filter(|w| !self.is_solved(w))
            .collect()
    }

    /// Groups not solved yet, in puzzle order
    pub fn unsolved_groups(&self) -> impl Iterator<Item = &Group> {
        self.puzzle
            .groups()
            .iter()
            .filter(|g| !self.solved.contains(g))
    }

    /// Toggle a word in the selection
    ///
    /// Matching is case-insensitive against the unsolved board words; the
    /// board's spelling is what gets stored.
    pub fn select_word(&mut self, word: &str) -> SelectOutcome {
        if self.is_ended() {
            return SelectOutcome::Ignored;
        }

        let key = word_key(word);
        let Some(board_word) = self
            .board
            .iter()
            .find(|w| word_key(w) == key && !self.is_solved(w))
        else {
            return SelectOutcome::Ignored;
        };

        if let Some(pos) = self.selected.iter().position(|w| word_key(w) == key) {
            self.selected.remove(pos);
            SelectOutcome::Deselected
        } else if self.selected.len() >= GROUP_SIZE {
            SelectOutcome::Full
        } else {
            self.selected.push(board_word.clone());
            SelectOutcome::Selected
        }
    }

    /// Evaluate the current selection
    ///
    /// Every evaluated attempt clears the selection.
    pub fn submit_guess(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Rejected;
        }

        let found = evaluate(&self.puzzle, &self.selected).cloned();
        self.selected.clear();

        match found {
            Some(group) => {
                self.solved.push(group.clone());
                if self.solved.len() == PUZZLE_GROUPS {
                    self.status = SessionStatus::Won;
                    tracing::debug!(puzzle = self.puzzle.id(), "Puzzle solved");
                    SubmitOutcome::Won(group)
                } else {
                    SubmitOutcome::Correct(group)
                }
            }
            None => {
                self.mistakes_remaining = self.mistakes_remaining.saturating_sub(1);
                if self.mistakes_remaining == 0 {
                    self.status = SessionStatus::Lost;
                    tracing::debug!(puzzle = self.puzzle.id(), "Out of mistakes");
                    SubmitOutcome::Lost
                } else {
                    SubmitOutcome::Incorrect {
                        remaining: self.mistakes_remaining,
                    }
                }
            }
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Append every unsolved group after a loss
    ///
    /// Returns `false` when nothing changed: the session was not lost, or the
    /// solution is already shown.
    pub fn reveal_solution(&mut self) -> bool {
        if self.status != SessionStatus::Lost {
            return false;
        }
        let unsolved: Vec<Group> = self.unsolved_groups().cloned().collect();
        if unsolved.is_empty() {
            return false;
        }
        self.solved.extend(unsolved);
        true
    }

    /// Reorder the board and clear the selection; only while playing
    pub fn shuffle_board<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_ended() {
            return false;
        }
        self.board.shuffle(rng);
        self.selected.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::sample_puzzle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> SessionState {
        SessionState::unshuffled(sample_puzzle())
    }

    fn select_all(session: &mut SessionState, words: &[&str]) {
        for word in words {
            session.select_word(word);
        }
    }

    fn guess(session: &mut SessionState, words: [&str; 4]) -> SubmitOutcome {
        select_all(session, &words);
        session.submit_guess()
    }

    const WRONG: [&str; 4] = ["APPLE", "KING", "FLOP", "LEVEL"];

    #[test]
    fn new_session_starts_playing() {
        let s = SessionState::new(sample_puzzle(), &mut StdRng::seed_from_u64(1));
        assert_eq!(s.status(), SessionStatus::Playing);
        assert_eq!(s.mistakes_remaining(), MAX_MISTAKES);
        assert_eq!(s.board().len(), 16);
        assert!(s.selected().is_empty());
        assert!(s.solved_groups().is_empty());
        assert!(!s.can_submit());
    }

    #[test]
    fn select_toggles_and_caps_at_four() {
        let mut s = session();
        assert_eq!(s.select_word("apple"), SelectOutcome::Selected);
        assert_eq!(s.selected(), ["APPLE"]);
        assert_eq!(s.select_word("APPLE"), SelectOutcome::Deselected);
        assert!(s.selected().is_empty());

        select_all(&mut s, &["APPLE", "KING", "FLOP", "LEVEL"]);
        assert!(s.can_submit());
        assert_eq!(s.select_word("RADAR"), SelectOutcome::Full);
        assert_eq!(s.selected().len(), 4);
    }

    #[test]
    fn select_ignores_unknown_and_solved_words() {
        let mut s = session();
        assert_eq!(s.select_word("ROOK"), SelectOutcome::Ignored);

        guess(&mut s, ["APPLE", "BANANA", "CHERRY", "GRAPE"]);
        assert_eq!(s.select_word("APPLE"), SelectOutcome::Ignored);
    }

    #[test]
    fn selection_keeps_insertion_order() {
        let mut s = session();
        select_all(&mut s, &["RADAR", "apple", "King"]);
        assert_eq!(s.selected(), ["RADAR", "APPLE", "KING"]);
    }

    #[test]
    fn correct_guess_appends_group_and_clears_selection() {
        let mut s = session();
        let outcome = guess(&mut s, ["RIVER", "FLOP", "BLIND", "TURN"]);

        assert!(matches!(outcome, SubmitOutcome::Correct(ref g) if g.category() == "Poker terms"));
        assert_eq!(s.solved_groups().len(), 1);
        assert!(s.selected().is_empty());
        assert_eq!(s.mistakes_remaining(), MAX_MISTAKES);
        assert_eq!(s.remaining_words().len(), 12);
    }

    #[test]
    fn incorrect_guess_costs_a_mistake() {
        let mut s = session();
        assert_eq!(guess(&mut s, WRONG), SubmitOutcome::Incorrect { remaining: 3 });
        assert!(s.selected().is_empty());
        assert_eq!(s.mistakes_made(), 1);
    }

    #[test]
    fn lost_exactly_after_fourth_mistake() {
        let mut s = session();
        for expected in [3, 2, 1] {
            assert_eq!(guess(&mut s, WRONG), SubmitOutcome::Incorrect { remaining: expected });
            assert!(!s.is_ended());
        }
        assert_eq!(guess(&mut s, WRONG), SubmitOutcome::Lost);
        assert!(s.is_ended());
        assert!(!s.is_won());
        assert_eq!(s.mistakes_remaining(), 0);

        assert_eq!(s.select_word("APPLE"), SelectOutcome::Ignored);
        assert_eq!(s.submit_guess(), SubmitOutcome::Rejected);
    }

    #[test]
    fn solving_all_groups_wins() {
        let mut s = session();
        guess(&mut s, WRONG);
        guess(&mut s, ["APPLE", "BANANA", "CHERRY", "GRAPE"]);
        guess(&mut s, ["KING", "QUEEN", "BISHOP", "KNIGHT"]);
        guess(&mut s, ["FLOP", "RIVER", "TURN", "BLIND"]);
        let outcome = guess(&mut s, ["LEVEL", "RADAR", "KAYAK", "CIVIC"]);

        assert!(matches!(outcome, SubmitOutcome::Won(_)));
        assert!(s.is_ended() && s.is_won());
        assert_eq!(s.mistakes_remaining(), 3);
        assert!(s.remaining_words().is_empty());
        assert!(!s.reveal_solution());
    }

    #[test]
    fn submit_rejected_without_four_words() {
        let mut s = session();
        select_all(&mut s, &["APPLE", "BANANA", "CHERRY"]);
        assert_eq!(s.submit_guess(), SubmitOutcome::Rejected);
        assert_eq!(s.selected().len(), 3);
        assert_eq!(s.mistakes_remaining(), MAX_MISTAKES);
    }

    #[test]
    fn mistakes_never_increase() {
        let mut s = session();
        let mut last = s.mistakes_remaining();
        let guesses = [
            WRONG,
            ["APPLE", "BANANA", "CHERRY", "GRAPE"],
            WRONG,
            ["KING", "QUEEN", "BISHOP", "KNIGHT"],
            ["FLOP", "RIVER", "TURN", "LEVEL"],
            WRONG,
        ];
        for words in guesses {
            guess(&mut s, words);
            assert!(s.mistakes_remaining() <= last);
            last = s.mistakes_remaining();
            if last == 0 {
                assert!(s.is_ended() && !s.is_won());
            }
        }
    }

    #[test]
    fn reveal_only_after_loss_and_idempotent() {
        let mut s = session();
        assert!(!s.reveal_solution());

        guess(&mut s, ["KING", "QUEEN", "BISHOP", "KNIGHT"]);
        for _ in 0..4 {
            guess(&mut s, WRONG);
        }
        assert_eq!(s.status(), SessionStatus::Lost);

        assert!(s.reveal_solution());
        let categories: Vec<&str> = s.solved_groups().iter().map(Group::category).collect();
        assert_eq!(categories, ["Chess pieces", "Fruits", "Poker terms", "Palindromes"]);

        let snapshot = s.solved_groups().to_vec();
        assert!(!s.reveal_solution());
        assert_eq!(s.solved_groups(), snapshot.as_slice());
        assert_eq!(s.status(), SessionStatus::Lost);
    }

    #[test]
    fn deselect_all_clears_selection() {
        let mut s = session();
        select_all(&mut s, &["APPLE", "KING"]);
        s.deselect_all();
        assert!(s.selected().is_empty());
    }

    #[test]
    fn shuffle_keeps_words_and_clears_selection() {
        let mut s = session();
        let mut before = s.board().to_vec();
        s.select_word("APPLE");

        assert!(s.shuffle_board(&mut StdRng::seed_from_u64(3)));
        assert!(s.selected().is_empty());

        let mut after = s.board().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffle_refused_after_game_ends() {
        let mut s = session();
        for _ in 0..4 {
            guess(&mut s, WRONG);
        }
        assert!(!s.shuffle_board(&mut StdRng::seed_from_u64(3)));
    }
}
