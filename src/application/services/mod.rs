//! Command handlers
//!
//! Each service implements [`Handler`](crate::application::command::Handler)
//! for one family of commands.

pub mod toolchain;

pub use toolchain::{standard_commands, ToolchainCommand};
