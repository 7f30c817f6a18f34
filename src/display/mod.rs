//! Terminal display formatting
//!
//! Plain column formatting for CLI output; no TUI.

pub mod expense;
pub mod ledger;
pub mod transaction;
