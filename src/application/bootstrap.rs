//! Process start-up: settings, locale, registry and working directories
//!
//! Every failure here is an initialization failure: the caller reports it and
//! exits before any command is dispatched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::command::CommandContext;
use crate::application::lifecycle::Lifecycle;
use crate::application::locale::UsageCatalog;
use crate::application::registry::Registry;
use crate::application::services::standard_commands;
use crate::application::template::Template;
use crate::application::usage::usage_template;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, ProcessRelay, RealFileSystem};
use crate::infrastructure::StreamRelay;

/// Directories created under the installation directory at start-up.
pub const WORK_DIRS: [&str; 2] = ["bundles", "snapshots"];

/// A fully initialized application, ready for dispatch.
pub struct App {
    /// Installation directory
    pub home: PathBuf,
    pub services: ServiceContainer,
    pub registry: Registry,
    /// Compiled top-level usage template of the configured language
    pub usage: Template,
}

impl App {
    /// Borrow the pieces a command handler needs.
    pub fn context<'a>(&'a self, lifecycle: &'a Lifecycle) -> CommandContext<'a> {
        CommandContext {
            lifecycle,
            relay: self.services.relay.as_ref(),
            settings: self.services.settings.as_ref(),
        }
    }
}

/// Initialize from the installation directory with real I/O.
pub fn initialize(home: &Path) -> ApplicationResult<App> {
    let settings = Settings::load(home)?;
    initialize_with(
        home,
        settings,
        Arc::new(RealFileSystem),
        Arc::new(StreamRelay),
    )
}

/// Initialize with explicit settings and I/O boundaries.
#[instrument(skip(settings, fs, relay))]
pub fn initialize_with(
    home: &Path,
    settings: Settings,
    fs: Arc<dyn FileSystem>,
    relay: Arc<dyn ProcessRelay>,
) -> ApplicationResult<App> {
    debug!("initialize: settings={:?}", settings);
    let commands = standard_commands();
    let names: Vec<&str> = commands.iter().map(|c| c.name()).collect();
    let catalog = UsageCatalog::load(fs.as_ref(), home, &settings.user_language, &names)?;

    let usage = usage_template(catalog.usage_template())?;
    let commands = commands
        .into_iter()
        .map(|cmd| {
            let text = catalog.text(cmd.name()).cloned();
            match text {
                Some(text) => cmd.with_texts(text),
                None => cmd,
            }
        })
        .collect();
    let registry = Registry::new(commands);

    for dir in WORK_DIRS {
        let path = home.join(dir);
        fs.create_dir_all(&path)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("create directory: {}", path.display()),
                source: Box::new(e),
            })?;
    }

    info!(
        "initialized: home={}, language={}, commands={}",
        home.display(),
        settings.user_language,
        registry.len()
    );
    Ok(App {
        home: home.to_path_buf(),
        services: ServiceContainer::with_deps(settings, fs, relay),
        registry,
        usage,
    })
}
