//! Ordered command catalog with name-based lookup

use serde::{Serialize, Serializer};

use crate::application::command::Command;

/// Commands and help topics, in listing order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// First command whose name equals `name` exactly.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// First runnable command named `name`; help topics never match.
    pub fn lookup_runnable(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name && c.is_runnable())
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(Command::name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Serializes as the ordered command list, the data of the usage template.
impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.commands.serialize(serializer)
    }
}
