//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;
use std::process::ExitStatus;

use tracing::error;

use crate::infrastructure::InfraResult;
use crate::output;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Runs an external program while forwarding its output live.
pub trait ProcessRelay: Send + Sync {
    /// Spawn `program` with `args`, relay its stdout/stderr to ours and
    /// wait until the child has exited and both streams are drained.
    ///
    /// A non-zero exit is not an error here; callers inspect the status.
    fn run(&self, program: &str, args: &[String]) -> InfraResult<ExitStatus>;

    /// Like [`ProcessRelay::run`], but reports a failure to stderr and
    /// returns `None` instead of propagating it.
    fn relay(&self, program: &str, args: &[String]) -> Option<ExitStatus> {
        match self.run(program, args) {
            Ok(status) => Some(status),
            Err(e) => {
                error!(program = program, "relay failed: {}", e);
                output::error(&e);
                None
            }
        }
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
