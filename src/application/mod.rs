//! Application layer: commands, templates, lifecycle and start-up
//!
//! This layer orchestrates domain rules and depends on I/O boundary traits.

pub mod bootstrap;
pub mod command;
pub mod error;
pub mod lifecycle;
pub mod locale;
pub mod registry;
pub mod services;
pub mod template;
pub mod usage;

pub use bootstrap::{initialize, initialize_with, App};
pub use command::{Command, CommandContext, Handler};
pub use error::{ApplicationError, ApplicationResult};
pub use lifecycle::Lifecycle;
pub use registry::Registry;
