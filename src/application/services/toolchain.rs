//! Commands that delegate to the Go toolchain
//!
//! `gpm build …` runs `<toolchain> build …` with the remaining arguments
//! unchanged and relays its output live. The handler decides the exit
//! status: the child's exit code when it fails, 1 when it cannot start.

use tracing::{debug, instrument};

use crate::application::command::{Command, CommandContext, Handler};
use crate::exitcode;

/// Handler running one toolchain subcommand.
#[derive(Debug, Clone)]
pub struct ToolchainCommand {
    verb: &'static str,
}

impl ToolchainCommand {
    pub fn new(verb: &'static str) -> Self {
        Self { verb }
    }

    /// Full argument list passed to the toolchain.
    pub fn toolchain_args(&self, args: &[String]) -> Vec<String> {
        std::iter::once(self.verb.to_string())
            .chain(args.iter().cloned())
            .collect()
    }
}

impl Handler for ToolchainCommand {
    #[instrument(skip(self, cmd, ctx), fields(command = cmd.name()))]
    fn run(&self, cmd: &Command, args: &[String], ctx: &CommandContext<'_>) {
        let program = ctx.settings.toolchain.as_str();
        let full_args = self.toolchain_args(args);
        debug!("run: {} {:?}", program, full_args);

        match ctx.relay.relay(program, &full_args) {
            Some(status) if status.success() => {}
            Some(status) => {
                let code = status.code().unwrap_or(exitcode::FAILURE);
                debug!("run: {} exited with {}", program, status);
                ctx.lifecycle.raise_status(code);
            }
            None => ctx.lifecycle.raise_status(exitcode::FAILURE),
        }
    }
}

/// The registered commands, in listing order, without localized texts.
pub fn standard_commands() -> Vec<Command> {
    vec![
        Command::new("build [build flags] [packages]")
            .with_handler(ToolchainCommand::new("build"))
            .with_flag("-v", false),
        Command::new("install [build flags] [packages]")
            .with_handler(ToolchainCommand::new("install"))
            .with_flag("-v", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_args_when_building_toolchain_args_then_verb_first_rest_verbatim() {
        let cmd = ToolchainCommand::new("install");
        let args = vec!["-v".to_string(), "github.com/x/y".to_string()];
        assert_eq!(
            cmd.toolchain_args(&args),
            ["install", "-v", "github.com/x/y"]
        );
    }

    #[test]
    fn given_standard_commands_then_build_then_install_all_runnable() {
        let commands = standard_commands();
        let names: Vec<_> = commands.iter().map(Command::name).collect();
        assert_eq!(names, ["build", "install"]);
        assert!(commands.iter().all(Command::is_runnable));
    }
}
