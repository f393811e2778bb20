//! Gameplay
//!
//! The session state machine, the guess evaluator, and the [`Game`] that ties
//! a session to its deck of candidate puzzles.

mod controller;
mod evaluator;
mod session;

pub use controller::{CUSTOM_TITLE, GAME_TITLE, Game, GameView};
pub use evaluator::evaluate;
pub use session::{MAX_MISTAKES, SelectOutcome, SessionState, SessionStatus, SubmitOutcome};
