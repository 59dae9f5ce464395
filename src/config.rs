//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gpm/gpm.toml`
//! 3. Installation config: `<home>/conf/gpm.toml`
//! 4. Environment variables: `GPM_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Toolchain executable used when none is configured.
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub title: Option<String>,
    pub version: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_language: Option<String>,
    pub toolchain: Option<String>,
}

/// Unified configuration for gpm.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Display title of this installation
    pub title: String,
    /// Configuration format version
    pub version: String,
    /// Account name for package sharing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Account password for package sharing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Locale directory under `i18n/` used for usage texts
    pub user_language: String,
    /// Toolchain executable that build commands delegate to
    pub toolchain: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "gpm".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            username: None,
            password: None,
            user_language: DEFAULT_LANGUAGE.into(),
            toolchain: DEFAULT_TOOLCHAIN.into(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("title", &self.title)
            .field("version", &self.version)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("user_language", &self.user_language)
            .field("toolchain", &self.toolchain)
            .finish()
    }
}

/// Get the XDG config directory for gpm.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gpm").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gpm.toml"))
}

/// Get the path to the config file of an installation directory.
pub fn home_config_path(home: &Path) -> PathBuf {
    home.join("conf").join("gpm.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.toolchain = expand_env_vars(&self.toolchain);
    }

    /// Overlay wins if specified, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            title: overlay.title.clone().unwrap_or_else(|| self.title.clone()),
            version: overlay
                .version
                .clone()
                .unwrap_or_else(|| self.version.clone()),
            username: overlay.username.clone().or_else(|| self.username.clone()),
            password: overlay.password.clone().or_else(|| self.password.clone()),
            user_language: overlay
                .user_language
                .clone()
                .unwrap_or_else(|| self.user_language.clone()),
            toolchain: overlay
                .toolchain
                .clone()
                .unwrap_or_else(|| self.toolchain.clone()),
        }
    }

    /// Load settings for an installation directory with layered precedence.
    pub fn load(home: &Path) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), home)
    }

    /// Load settings from an explicit global config path and installation
    /// directory. Missing files are skipped; unreadable ones are errors.
    pub fn load_layers(global: Option<&Path>, home: &Path) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Installation config
        let home_path = home_config_path(home);
        if home_path.exists() {
            debug!("load: installation config {}", home_path.display());
            current = current.merge_with(&load_raw_settings(&home_path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply GPM_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_overrides(settings, gpm_environment())
    }

    fn apply_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("title") {
            settings.title = val;
        }
        if let Ok(val) = config.get_string("version") {
            settings.version = val;
        }
        if let Ok(val) = config.get_string("username") {
            settings.username = Some(val);
        }
        if let Ok(val) = config.get_string("password") {
            settings.password = Some(val);
        }
        if let Ok(val) = config.get_string("user_language") {
            settings.user_language = val;
        }
        if let Ok(val) = config.get_string("toolchain") {
            settings.toolchain = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

/// `GPM_USER_LANGUAGE` → `user_language`; `__` would separate nested keys.
fn gpm_environment() -> Environment {
    Environment::with_prefix("GPM")
        .prefix_separator("_")
        .separator("__")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
