//! Text templates for usage and help output
//!
//! A subset of Go's `text/template` syntax, enough for localized usage files:
//!
//! - `{{.}}`, `{{.Field.Sub}}`, string/number/bool literals
//! - function calls and pipelines: `{{trim .Long}}`, `{{.Long | trim | capitalize}}`
//! - `{{if P}}…{{else if Q}}…{{else}}…{{end}}`, `{{range P}}…{{else}}…{{end}}`
//! - `{{/* comments */}}` and `{{-` / `-}}` whitespace trimming
//!
//! Data is any `Serialize` value. Rendering is buffered: a failing template
//! never emits partial output.

mod exec;
mod funcs;
mod lex;
mod parse;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use funcs::{capitalize, FuncMap, TemplateFn};

use parse::Node;

/// Template errors: compilation, execution and data conversion.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template: {name}:{line}: {message}")]
    Parse {
        name: String,
        line: usize,
        message: String,
    },

    #[error("template: {name}: {message}")]
    Exec { name: String, message: String },

    #[error("template data: {0}")]
    Data(#[from] serde_json::Error),

    #[error("template output: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A compiled template.
#[derive(Clone)]
pub struct Template {
    name: String,
    root: Vec<Node>,
    funcs: FuncMap,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("nodes", &self.root.len())
            .finish()
    }
}

impl Template {
    /// Compile `text` with the built-in functions (`trim`, `capitalize`).
    pub fn parse(name: &str, text: &str) -> TemplateResult<Self> {
        Self::parse_with(name, text, FuncMap::builtin())
    }

    /// Compile `text` with a custom function map.
    ///
    /// Calls to functions missing from `funcs` are compile errors.
    pub fn parse_with(name: &str, text: &str, funcs: FuncMap) -> TemplateResult<Self> {
        let items = lex::lex(name, text)?;
        let root = parse::parse(name, items, &funcs)?;
        debug!("parse: name={}, nodes={}", name, root.len());
        Ok(Self {
            name: name.to_string(),
            root,
            funcs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template against `data` and return the whole output.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> TemplateResult<String> {
        let value = serde_json::to_value(data)?;
        exec::execute(self, &value)
    }

    /// Execute the template and write the output only if execution succeeded.
    pub fn render_to<W, T>(&self, w: &mut W, data: &T) -> TemplateResult<()>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized,
    {
        let text = self.render(data)?;
        w.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Parse `text` and render it against `data` into `w`.
pub fn render_to<W, T>(w: &mut W, name: &str, text: &str, data: &T) -> TemplateResult<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    Template::parse(name, text)?.render_to(w, data)
}
