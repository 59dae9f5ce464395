//! Commands: named units of CLI functionality
//!
//! A command is identified by the first word of its usage line. Commands
//! without a handler are documentation topics: `help` shows them, dispatch
//! never runs them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::application::lifecycle::Lifecycle;
use crate::config::Settings;
use crate::domain::{derive_name, UsageText};
use crate::infrastructure::traits::ProcessRelay;

/// Everything a handler may touch while it runs.
pub struct CommandContext<'a> {
    /// Exit status and cleanup chain of this process run
    pub lifecycle: &'a Lifecycle,
    /// Relay for delegating to external programs
    pub relay: &'a dyn ProcessRelay,
    /// Effective settings
    pub settings: &'a Settings,
}

/// The action of a runnable command.
pub trait Handler: Send + Sync {
    /// Run `cmd` with the arguments following its name.
    fn run(&self, cmd: &Command, args: &[String], ctx: &CommandContext<'_>);
}

impl<F> Handler for F
where
    F: Fn(&Command, &[String], &CommandContext<'_>) + Send + Sync,
{
    fn run(&self, cmd: &Command, args: &[String], ctx: &CommandContext<'_>) {
        self(cmd, args, ctx)
    }
}

/// A registered command or help topic.
#[derive(Clone)]
pub struct Command {
    usage_line: String,
    short: String,
    long: String,
    handler: Option<Arc<dyn Handler>>,
    flags: BTreeMap<String, bool>,
}

impl Command {
    /// A documentation-only command; add a handler to make it runnable.
    pub fn new(usage_line: impl Into<String>) -> Self {
        Self {
            usage_line: usage_line.into(),
            short: String::new(),
            long: String::new(),
            handler: None,
            flags: BTreeMap::new(),
        }
    }

    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn with_texts(mut self, text: UsageText) -> Self {
        self.short = text.short;
        self.long = text.long;
        self
    }

    /// Register a command-specific flag with its default.
    pub fn with_flag(mut self, name: impl Into<String>, default: bool) -> Self {
        self.flags.insert(name.into(), default);
        self
    }

    /// The first word of the usage line.
    pub fn name(&self) -> &str {
        derive_name(&self.usage_line)
    }

    pub fn usage_line(&self) -> &str {
        &self.usage_line
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Whether dispatch can run this command.
    pub fn is_runnable(&self) -> bool {
        self.handler.is_some()
    }

    pub fn handler(&self) -> Option<&dyn Handler> {
        self.handler.as_deref()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("usage_line", &self.usage_line)
            .field("runnable", &self.is_runnable())
            .field("flags", &self.flags)
            .finish()
    }
}

/// Template view, using the field names of the usage files.
impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Command", 6)?;
        s.serialize_field("Name", self.name())?;
        s.serialize_field("UsageLine", &self.usage_line)?;
        s.serialize_field("Short", &self.short)?;
        s.serialize_field("Long", &self.long)?;
        s.serialize_field("Runnable", &self.is_runnable())?;
        s.serialize_field("Flags", &self.flags)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_command_without_handler_then_not_runnable() {
        let cmd = Command::new("gopath");
        assert!(!cmd.is_runnable());
        assert!(cmd.handler().is_none());
    }

    #[test]
    fn given_function_handler_then_runnable() {
        fn noop(_: &Command, _: &[String], _: &CommandContext<'_>) {}

        let cmd = Command::new("build [flags]").with_handler(noop);
        assert!(cmd.is_runnable());
        assert_eq!(cmd.name(), "build");
    }

    #[test]
    fn given_registered_flag_then_lookup_returns_default() {
        let cmd = Command::new("install").with_flag("-v", false);
        assert_eq!(cmd.flag("-v"), Some(false));
        assert_eq!(cmd.flag("-x"), None);
    }

    #[test]
    fn given_command_when_serialized_then_template_field_names() {
        let cmd = Command::new("build [flags]").with_texts(UsageText {
            short: "compile packages".into(),
            long: "\nBuild compiles.\n".into(),
        });

        let value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(value["Name"], "build");
        assert_eq!(value["UsageLine"], "build [flags]");
        assert_eq!(value["Short"], "compile packages");
        assert_eq!(value["Runnable"], false);
    }
}
