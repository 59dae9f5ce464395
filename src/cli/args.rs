//! CLI argument definitions using clap
//!
//! Only global options are parsed here. The command name and its arguments
//! are passed through verbatim to the registry dispatch.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// gpm (Go Package Manager): search, install, update and share Go packages
#[derive(Parser, Debug)]
#[command(name = "gpm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Installation directory holding conf/ and i18n/ (default: next to the executable)
    #[arg(long, env = "GPM_HOME", value_hint = ValueHint::DirPath)]
    pub home: Option<PathBuf>,

    /// Command followed by its arguments
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub args: Vec<String>,
}
