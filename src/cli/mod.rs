//! CLI layer - Command-line interface

pub mod commands;
pub mod dispatch;
pub mod output;

pub use commands::{Cli, Commands};
pub use dispatch::run;
