pub mod builtin;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod registry;
pub mod resource;
pub mod rule;
pub mod runner;
pub mod scan;
pub mod scanner;
pub mod status;
pub mod violation;

pub use error::{Result, RuleScanError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_THRESHOLD_EXCEEDED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
