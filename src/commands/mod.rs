//! Command implementations

pub mod admin;
pub mod draft;
pub mod generate;
pub mod simple;

pub use admin::{AdminAction, AdminOutcome, run_admin, seed_admin};
pub use draft::{DraftCheck, share_draft, submit_draft, validate_draft};
pub use generate::{GenerateResult, generate};
pub use simple::{PlayCommand, run_simple};
