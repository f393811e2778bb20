//! Game controller
//!
//! `Game` owns everything one player interacts with: the pool, the deck of
//! candidates and the active session. Front ends hold a `Game` and read it
//! through [`GameView`].

use super::session::SessionState;
use crate::core::{DifficultyMode, Puzzle};
use crate::pool::PuzzlePool;
use crate::selector::{Direction, PuzzleDeck};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Title shown for a shared custom puzzle
pub const CUSTOM_TITLE: &str = "Custom Puzzle";

/// Base title for generated puzzles
pub const GAME_TITLE: &str = "Connections";

/// Read-only snapshot for rendering
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub session: &'a SessionState,
    pub has_prev: bool,
    pub has_next: bool,
    pub is_custom: bool,
    pub mode: DifficultyMode,
    /// 1-based position in the deck and the deck size
    pub position: (usize, usize),
}

impl GameView<'_> {
    /// `Connections`, `Connections - Hard`, or the custom puzzle title
    #[must_use]
    pub fn title(&self) -> String {
        if self.is_custom {
            return CUSTOM_TITLE.to_string();
        }
        match self.mode {
            DifficultyMode::Mixed => GAME_TITLE.to_string(),
            DifficultyMode::Tier(tier) => format!("{GAME_TITLE} - {}", tier.display_name()),
        }
    }
}

/// One player's game
pub struct Game {
    pool: PuzzlePool,
    deck: PuzzleDeck,
    session: SessionState,
    mode: DifficultyMode,
    rng: StdRng,
}

impl Game {
    /// Start a game from a pool, generating candidates for `mode`
    #[must_use]
    pub fn new(pool: PuzzlePool, mode: DifficultyMode) -> Self {
        Self::with_rng(pool, mode, StdRng::from_os_rng())
    }

    /// Start a game with a caller-supplied random source
    #[must_use]
    pub fn with_rng(pool: PuzzlePool, mode: DifficultyMode, mut rng: StdRng) -> Self {
        let deck = PuzzleDeck::generate(&pool, mode, &mut rng);
        let session = SessionState::new(deck.current().clone(), &mut rng);
        tracing::debug!(%mode, puzzle = deck.current().id(), candidates = deck.len(), "Game started");
        Self {
            pool,
            deck,
            session,
            mode,
            rng,
        }
    }

    /// Play a single shared puzzle; navigation and difficulty are locked
    #[must_use]
    pub fn custom(puzzle: Puzzle) -> Self {
        Self::custom_with_rng(puzzle, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn custom_with_rng(puzzle: Puzzle, mut rng: StdRng) -> Self {
        let session = SessionState::new(puzzle.clone(), &mut rng);
        tracing::debug!(puzzle = puzzle.id(), "Custom game started");
        Self {
            pool: PuzzlePool::empty(),
            deck: PuzzleDeck::custom(puzzle),
            session,
            mode: DifficultyMode::default(),
            rng,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// The active session, for player actions
    pub const fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[must_use]
    pub const fn mode(&self) -> DifficultyMode {
        self.mode
    }

    #[must_use]
    pub const fn deck(&self) -> &PuzzleDeck {
        &self.deck
    }

    #[must_use]
    pub const fn pool(&self) -> &PuzzlePool {
        &self.pool
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.deck.is_custom()
    }

    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        let browsing = !self.session.is_ended();
        GameView {
            session: &self.session,
            has_prev: browsing && self.deck.has_prev(),
            has_next: browsing && self.deck.has_next(),
            is_custom: self.deck.is_custom(),
            mode: self.mode,
            position: (self.deck.position() + 1, self.deck.len()),
        }
    }

    /// Move to the previous or next candidate with a fresh session
    ///
    /// Returns `false` if navigation is disabled or the game has ended.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.session.is_ended() || !self.deck.navigate(direction) {
            return false;
        }
        self.restart_session();
        true
    }

    /// Regenerate candidates for a new mode
    ///
    /// Returns `false` for a custom puzzle, which keeps its mode locked.
    pub fn change_difficulty(&mut self, mode: DifficultyMode) -> bool {
        if self.is_custom() {
            return false;
        }
        self.mode = mode;
        self.regenerate();
        true
    }

    /// Fresh candidates for the current mode; a custom puzzle restarts
    pub fn new_game(&mut self) {
        if self.is_custom() {
            self.restart_session();
        } else {
            self.regenerate();
        }
    }

    /// Shuffle the active board with the game's generator
    pub fn shuffle(&mut self) -> bool {
        self.session.shuffle_board(&mut self.rng)
    }

    fn regenerate(&mut self) {
        self.deck = PuzzleDeck::generate(&self.pool, self.mode, &mut self.rng);
        self.restart_session();
        tracing::debug!(mode = %self.mode, candidates = self.deck.len(), "Regenerated candidates");
    }

    fn restart_session(&mut self) {
        self.session = SessionState::new(self.deck.current().clone(), &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::sample_puzzle;
    use crate::core::{Difficulty, Group};

    fn seeded(pool: PuzzlePool, mode: DifficultyMode) -> Game {
        Game::with_rng(pool, mode, StdRng::seed_from_u64(17))
    }

    #[test]
    fn embedded_game_has_navigation() {
        let game = seeded(PuzzlePool::embedded(), DifficultyMode::Mixed);
        let view = game.view();
        assert!(view.has_prev && view.has_next);
        assert!(!view.is_custom);
        assert_eq!(view.position.0, 1);
        assert_eq!(view.title(), "Connections");
    }

    #[test]
    fn navigate_resets_session() {
        let mut game = seeded(PuzzlePool::embedded(), DifficultyMode::Mixed);
        let first = game.session().puzzle().id().to_string();
        let word = game.session().board()[0].clone();
        game.session_mut().select_word(&word);

        assert!(game.navigate(Direction::Next));
        assert_ne!(game.session().puzzle().id(), first);
        assert!(game.session().selected().is_empty());
        assert_eq!(game.view().position.0, 2);

        assert!(game.navigate(Direction::Prev));
        assert_eq!(game.session().puzzle().id(), first);
    }

    #[test]
    fn navigation_stops_once_the_game_ends() {
        let mut game = seeded(PuzzlePool::embedded(), DifficultyMode::Mixed);
        let id = game.session().puzzle().id().to_string();
        let groups = game.session().puzzle().groups().to_vec();
        for group in &groups {
            for word in group.words() {
                game.session_mut().select_word(word);
            }
            game.session_mut().submit_guess();
        }

        assert!(game.session().is_won());
        let view = game.view();
        assert!(!view.has_prev && !view.has_next);
        assert!(!game.navigate(Direction::Next));
        assert!(!game.navigate(Direction::Prev));
        assert_eq!(game.session().puzzle().id(), id);
        assert_eq!(game.view().position.0, 1);

        game.new_game();
        assert!(game.navigate(Direction::Next));
    }

    #[test]
    fn empty_pool_plays_placeholder_without_navigation() {
        let mut game = seeded(PuzzlePool::empty(), DifficultyMode::Mixed);
        assert!(game.session().puzzle().is_fallback());
        assert!(!game.view().has_next);
        assert!(!game.navigate(Direction::Next));
    }

    #[test]
    fn change_difficulty_regenerates_for_tier() {
        let mut game = seeded(PuzzlePool::embedded(), DifficultyMode::Mixed);
        assert!(game.change_difficulty(DifficultyMode::Tier(Difficulty::Expert)));

        let view = game.view();
        assert_eq!(view.title(), "Connections - Expert");
        assert!(
            view.session
                .puzzle()
                .groups()
                .iter()
                .all(|g| g.difficulty() == Difficulty::Expert)
        );
    }

    #[test]
    fn custom_game_locks_navigation_and_mode() {
        let mut game = Game::custom_with_rng(sample_puzzle(), StdRng::seed_from_u64(1));
        let view = game.view();
        assert!(view.is_custom);
        assert!(!view.has_prev && !view.has_next);
        assert_eq!(view.title(), CUSTOM_TITLE);

        assert!(!game.navigate(Direction::Next));
        assert!(!game.change_difficulty(DifficultyMode::Tier(Difficulty::Easy)));
        assert_eq!(game.session().puzzle(), &sample_puzzle());
    }

    #[test]
    fn new_game_on_custom_restarts_same_puzzle() {
        let mut game = Game::custom_with_rng(sample_puzzle(), StdRng::seed_from_u64(1));
        for word in ["APPLE", "BANANA", "CHERRY", "GRAPE"] {
            game.session_mut().select_word(word);
        }
        game.session_mut().submit_guess();
        assert_eq!(game.session().solved_groups().len(), 1);

        game.new_game();
        assert!(game.session().solved_groups().is_empty());
        assert_eq!(game.session().puzzle(), &sample_puzzle());
    }

    #[test]
    fn new_game_keeps_mode() {
        let pool = PuzzlePool::embedded();
        let mut game = seeded(pool, DifficultyMode::Tier(Difficulty::Medium));
        game.new_game();
        assert_eq!(game.mode(), DifficultyMode::Tier(Difficulty::Medium));
        assert!(
            game.session()
                .puzzle()
                .groups()
                .iter()
                .map(Group::difficulty)
                .all(|d| d == Difficulty::Medium)
        );
    }
}
