//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_admin_outcome, print_board, print_draft_check, print_generate_result,
    print_share_link, print_submission_created,
};
