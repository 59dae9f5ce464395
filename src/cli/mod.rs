//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod dispatch;
pub mod error;

pub use args::Cli;
pub use dispatch::dispatch;
pub use error::{CliError, CliResult};
