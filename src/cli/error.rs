//! CLI-level errors (wraps application and template errors)

use thiserror::Error;

use crate::application::template::TemplateError;
use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// Start-up failed; no command was dispatched.
    #[error("{0}")]
    Init(#[from] ApplicationError),

    /// A usage or help template failed to render.
    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Template(_) => crate::exitcode::SOFTWARE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Init(e) => match e {
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Locale { .. } => crate::exitcode::NOINPUT,
                ApplicationError::Domain(DomainError::MalformedUsage { .. })
                | ApplicationError::Template(_) => crate::exitcode::DATAERR,
                ApplicationError::Domain(_) => crate::exitcode::USAGE,
                ApplicationError::OperationFailed { .. } => crate::exitcode::CANTCREAT,
            },
        }
    }
}
