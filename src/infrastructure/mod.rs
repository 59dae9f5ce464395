//! Infrastructure layer: I/O implementations, process relay and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod relay;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use relay::{RelaySession, StreamRelay};
pub use traits::{FileSystem, ProcessRelay, RealFileSystem};
