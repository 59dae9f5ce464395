//! Colored diagnostics on stderr
//!
//! Everything here goes to stderr so relayed toolchain output on stdout stays
//! clean. `colored` honors NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// `gpm: error: <msg>`
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("gpm: {}: {}", "error".red().bold(), msg);
}

/// `gpm: warning: <msg>`
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("gpm: {}: {}", "warning".yellow(), msg);
}
