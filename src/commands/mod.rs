//! Subcommand entry points used by the binary.

mod check;
mod context;
mod rules;

pub use check::run_check;
pub use rules::{RuleResolution, format_rules_listing, run_rules};
