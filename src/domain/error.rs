//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the command/usage rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unacceptable usage text for command: {name}")]
    MalformedUsage { name: String },

    #[error("unknown subcommand {0:?}")]
    UnknownCommand(String),

    #[error("unknown help topic `{0}`")]
    UnknownTopic(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
