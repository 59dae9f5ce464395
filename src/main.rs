use std::io;
use std::process;

use clap::Parser;
use gpm::application::{initialize, Lifecycle};
use gpm::cli::{dispatch, Cli, CliError};
use gpm::output;
use gpm::util::path::resolve_home;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let app = match resolve_home(cli.home.as_deref()).and_then(|home| initialize(&home)) {
        Ok(app) => app,
        Err(e) => fail(CliError::Init(e)),
    };

    let lifecycle = Lifecycle::new();
    let ctx = app.context(&lifecycle);

    // Unlocked handles: relayed child output is written from other threads.
    if let Err(e) = dispatch(
        &cli.args,
        &app.registry,
        &app.usage,
        &ctx,
        &mut io::stdout(),
        &mut io::stderr(),
    ) {
        fail(e);
    }

    lifecycle.shutdown();
}

/// Report a fatal error and exit without running the cleanup chain.
fn fail(e: CliError) -> ! {
    tracing::error!("fatal: {:?}", e);
    output::error(&e);
    process::exit(e.exit_code());
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            output::warning("verbosity is capped at -ddd");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(verbosity >= 2)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
