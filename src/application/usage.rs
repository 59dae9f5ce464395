//! Usage and help rendering

use std::io::Write;

use crate::application::command::Command;
use crate::application::registry::Registry;
use crate::application::template::{self, Template, TemplateResult};

/// Per-command help: invocation line for runnable commands, then the long text.
pub const HELP_TEMPLATE: &str = "{{if .Runnable}}usage: gpm {{.UsageLine}}

{{end}}{{.Long | trim}}
";

/// Top-level listing shipped with the English locale.
pub const DEFAULT_USAGE_TEMPLATE: &str = include_str!("../../i18n/en-US/usage.tpl");

/// Compile a top-level usage template.
pub fn usage_template(text: &str) -> TemplateResult<Template> {
    Template::parse("usage", text)
}

/// Render the top-level usage listing of every registered command.
pub fn print_usage<W: Write + ?Sized>(
    w: &mut W,
    usage: &Template,
    registry: &Registry,
) -> TemplateResult<()> {
    usage.render_to(w, registry)
}

/// Render the help page of one command or topic.
pub fn print_help<W: Write + ?Sized>(w: &mut W, cmd: &Command) -> TemplateResult<()> {
    template::render_to(w, "help", HELP_TEMPLATE, cmd)
}
