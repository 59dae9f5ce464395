//! Name-based command dispatch
//!
//! `gpm <command> [args...]` runs a registered command, `gpm help [command]`
//! renders usage or help. Usage errors are written to `err` and raise the
//! exit status to 2; no path here exits the process. The caller ends the run
//! through [`Lifecycle::shutdown`](crate::application::Lifecycle::shutdown).

use std::io::Write;

use tracing::{debug, instrument};

use crate::application::command::CommandContext;
use crate::application::registry::Registry;
use crate::application::template::{capitalize, Template};
use crate::application::usage::{print_help, print_usage};
use crate::cli::CliResult;
use crate::domain::DomainError;
use crate::exitcode;

/// Dispatch `args` (command name first) against `registry`.
#[instrument(skip(registry, usage, ctx, out, err))]
pub fn dispatch<O, E>(
    args: &[String],
    registry: &Registry,
    usage: &Template,
    ctx: &CommandContext<'_>,
    out: &mut O,
    err: &mut E,
) -> CliResult<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let result = route(args, registry, usage, ctx, out, err);
    out.flush()?;
    err.flush()?;
    result
}

fn route<O, E>(
    args: &[String],
    registry: &Registry,
    usage: &Template,
    ctx: &CommandContext<'_>,
    out: &mut O,
    err: &mut E,
) -> CliResult<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let Some((name, rest)) = args.split_first() else {
        print_usage(err, usage, registry)?;
        ctx.lifecycle.raise_status(exitcode::USAGE);
        return Ok(());
    };

    if name == "help" {
        return help(rest, registry, usage, ctx, out, err);
    }

    let runnable = registry
        .lookup_runnable(name)
        .and_then(|cmd| cmd.handler().map(|handler| (cmd, handler)));
    match runnable {
        Some((cmd, handler)) => {
            debug!("dispatch: running {}", cmd.name());
            handler.run(cmd, rest, ctx);
        }
        None => {
            let e = DomainError::UnknownCommand(name.clone());
            writeln!(err, "gpm: {e}\nRun 'gpm help' for usage.")?;
            ctx.lifecycle.raise_status(exitcode::USAGE);
        }
    }
    Ok(())
}

/// The `help` command.
fn help<O, E>(
    args: &[String],
    registry: &Registry,
    usage: &Template,
    ctx: &CommandContext<'_>,
    out: &mut O,
    err: &mut E,
) -> CliResult<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    match args {
        // succeeded at 'gpm help'
        [] => print_usage(out, usage, registry)?,
        [topic] => match registry.lookup(topic) {
            Some(cmd) => print_help(out, cmd)?,
            None => {
                let e = DomainError::UnknownTopic(topic.clone());
                writeln!(err, "{}.  Run 'gpm help'.", capitalize(&e.to_string()))?;
                ctx.lifecycle.raise_status(exitcode::USAGE);
            }
        },
        _ => {
            writeln!(err, "usage: gpm help command\n\nToo many arguments given.")?;
            ctx.lifecycle.raise_status(exitcode::USAGE);
        }
    }
    Ok(())
}
