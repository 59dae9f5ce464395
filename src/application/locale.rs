//! Localized usage texts loaded from the installation directory
//!
//! Layout: `<home>/i18n/<lang>/usage.tpl` holds the top-level usage template,
//! `<home>/i18n/<lang>/usage_<command>.txt` the short and long description of
//! each command separated by `|||`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{split_usage_text, UsageText};
use crate::infrastructure::traits::FileSystem;

/// Usage template and per-command texts of one language.
#[derive(Debug, Clone, Default)]
pub struct UsageCatalog {
    usage_template: String,
    texts: HashMap<String, UsageText>,
}

/// Directory holding the files of one language.
pub fn locale_dir(home: &Path, lang: &str) -> PathBuf {
    home.join("i18n").join(lang)
}

impl UsageCatalog {
    /// Load the usage template and the texts of every command in `names`.
    ///
    /// Any missing file or a text without delimiter fails the whole load.
    #[instrument(skip(fs, names))]
    pub fn load(
        fs: &dyn FileSystem,
        home: &Path,
        lang: &str,
        names: &[&str],
    ) -> ApplicationResult<Self> {
        let dir = locale_dir(home, lang);
        let usage_template = read(fs, &dir.join("usage.tpl"))?;

        let mut texts = HashMap::new();
        for name in names {
            let blob = read(fs, &dir.join(format!("usage_{name}.txt")))?;
            texts.insert(name.to_string(), split_usage_text(name, &blob)?);
        }
        debug!("load: lang={}, commands={}", lang, texts.len());

        Ok(Self {
            usage_template,
            texts,
        })
    }

    pub fn usage_template(&self) -> &str {
        &self.usage_template
    }

    pub fn text(&self, name: &str) -> Option<&UsageText> {
        self.texts.get(name)
    }
}

fn read(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<String> {
    fs.read_to_string(path)
        .map_err(|source| ApplicationError::Locale {
            path: path.to_path_buf(),
            source,
        })
}
