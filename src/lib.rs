//! gpm (Go Package Manager)
//!
//! A command-line front-end that dispatches named subcommands from a
//! localized registry, relays the output of the Go toolchain live, and
//! funnels every path through one lifecycle that owns the exit status and
//! the cleanup chain.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod output;
pub mod util;
