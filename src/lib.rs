//! Connections Puzzle
//!
//! A word-grouping puzzle: sixteen words hide four groups of four, and the
//! player has four mistakes to find them all. Puzzles are generated from a
//! pool of approved groups, shared as links, or written by players and sent
//! to moderators for review.
//!
//! # Quick Start
//!
//! ```rust
//! use connections_puzzle::core::DifficultyMode;
//! use connections_puzzle::game::{Game, SubmitOutcome};
//! use connections_puzzle::pool::PuzzlePool;
//!
//! let mut game = Game::new(PuzzlePool::embedded(), DifficultyMode::Mixed);
//!
//! // Select the four words of the first group and submit them
//! let group = game.session().puzzle().groups()[0].clone();
//! for word in group.words() {
//!     game.session_mut().select_word(word);
//! }
//! assert!(matches!(game.session_mut().submit_guess(), SubmitOutcome::Correct(_)));
//! ```

// Core domain types
pub mod core;

// Approved group pools
pub mod pool;

// Candidate generation and browsing
pub mod selector;

// Session state machine and game controller
pub mod game;

// Puzzle drafts written by players
pub mod creator;

// Persistence and moderation
pub mod backend;

// Optional TOML configuration
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
