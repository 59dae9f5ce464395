//! Infrastructure-level errors (process spawning and stream I/O)

use thiserror::Error;

/// Infrastructure errors cover I/O-level concerns of talking to the
/// filesystem and to external processes.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open {stream} pipe of {program}")]
    Pipe {
        program: String,
        stream: &'static str,
    },

    #[error("relaying {stream} failed: {source}")]
    Relay {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting for {program} failed: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
