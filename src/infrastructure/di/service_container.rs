//! Service container for dependency injection
//!
//! Wires up the I/O boundaries shared by every command.

use std::sync::Arc;

use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, ProcessRelay};

/// Container holding settings and I/O boundaries for one process run.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// External process relay
    pub relay: Arc<dyn ProcessRelay>,
}

impl ServiceContainer {
    /// Create a service container from explicit settings and I/O boundaries.
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        relay: Arc<dyn ProcessRelay>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            relay,
        }
    }
}
