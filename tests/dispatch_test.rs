//! Integration tests for name-based command dispatch and the help command.

use std::process::ExitStatus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gpm::application::usage::{usage_template, DEFAULT_USAGE_TEMPLATE};
use gpm::application::{Command, CommandContext, Handler, Lifecycle, Registry};
use gpm::cli::dispatch;
use gpm::config::Settings;
use gpm::domain::UsageText;
use gpm::infrastructure::{InfraResult, ProcessRelay};
use gpm::util::testing;

/// Relay that must never be reached by the tests in this file.
struct NoRelay;

impl ProcessRelay for NoRelay {
    fn run(&self, program: &str, _args: &[String]) -> InfraResult<ExitStatus> {
        panic!("unexpected relay of {program}");
    }
}

/// Records every invocation of the `build` handler.
#[derive(Default)]
struct Recorder {
    calls: AtomicUsize,
    args: Mutex<Vec<String>>,
}

/// Handler forwarding to a shared [`Recorder`].
struct Recording(Arc<Recorder>);

impl Handler for Recording {
    fn run(&self, _cmd: &Command, args: &[String], _ctx: &CommandContext<'_>) {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        self.0.args.lock().unwrap().extend(args.iter().cloned());
    }
}

struct Fixture {
    registry: Registry,
    recorder: Arc<Recorder>,
    settings: Settings,
    lifecycle: Lifecycle,
}

impl Fixture {
    fn new() -> Self {
        testing::init_test_setup();
        let recorder = Arc::new(Recorder::default());
        let build = Command::new("build [build flags] [packages]")
            .with_handler(Recording(Arc::clone(&recorder)))
            .with_texts(UsageText {
                short: "compile packages and dependencies".into(),
                long: "\nBuild compiles the packages.\n".into(),
            });
        let topic = Command::new("gopath").with_texts(UsageText {
            short: "GOPATH environment variable".into(),
            long: "\nThe GOPATH variable.\n".into(),
        });
        Self {
            registry: Registry::new(vec![build, topic]),
            recorder,
            settings: Settings::default(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Dispatch `args`, returning (stdout, stderr).
    fn run(&self, args: &[&str]) -> (String, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let usage = usage_template(DEFAULT_USAGE_TEMPLATE).unwrap();
        let ctx = CommandContext {
            lifecycle: &self.lifecycle,
            relay: &NoRelay,
            settings: &self.settings,
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        dispatch(&args, &self.registry, &usage, &ctx, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn calls(&self) -> usize {
        self.recorder.calls.load(Ordering::SeqCst)
    }
}

#[test]
fn given_no_arguments_when_dispatch_then_usage_on_stderr_and_status_2() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, err) = fixture.run(&[]);

    // Assert
    assert!(out.is_empty());
    assert!(err.contains("\tbuild\tcompile packages and dependencies"));
    assert_eq!(fixture.lifecycle.status(), 2);
    assert_eq!(fixture.calls(), 0);
}

#[test]
fn given_unknown_command_when_dispatch_then_diagnostic_and_status_2() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, err) = fixture.run(&["zzz"]);

    // Assert
    assert!(out.is_empty());
    assert_eq!(
        err,
        "gpm: unknown subcommand \"zzz\"\nRun 'gpm help' for usage.\n"
    );
    assert_eq!(fixture.lifecycle.status(), 2);
    assert_eq!(fixture.calls(), 0);
}

#[test]
fn given_help_topic_name_when_dispatch_then_not_run() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (_, err) = fixture.run(&["gopath"]);

    // Assert: topics are documentation only
    assert!(err.contains("unknown subcommand \"gopath\""));
    assert_eq!(fixture.lifecycle.status(), 2);
}

#[test]
fn given_runnable_command_when_dispatch_then_handler_gets_remaining_args() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, err) = fixture.run(&["build", "-v", "./..."]);

    // Assert
    assert!(out.is_empty());
    assert!(err.is_empty());
    assert_eq!(fixture.calls(), 1);
    assert_eq!(*fixture.recorder.args.lock().unwrap(), ["-v", "./..."]);
    assert_eq!(fixture.lifecycle.status(), 0);
}

#[test]
fn given_help_without_topic_when_dispatch_then_usage_on_stdout() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, err) = fixture.run(&["help"]);

    // Assert
    assert!(err.is_empty());
    assert!(out.contains("Usage:"));
    assert!(out.contains("\tbuild\tcompile packages and dependencies"));
    assert!(!out.contains("gopath"));
    assert_eq!(fixture.lifecycle.status(), 0);
}

#[test]
fn given_help_with_command_when_dispatch_then_usage_line_and_long_text() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, _) = fixture.run(&["help", "build"]);

    // Assert
    assert_eq!(
        out,
        "usage: gpm build [build flags] [packages]\n\nBuild compiles the packages.\n"
    );
    assert_eq!(fixture.lifecycle.status(), 0);
    assert_eq!(fixture.calls(), 0);
}

#[test]
fn given_help_with_topic_when_dispatch_then_long_text_only() {
    let fixture = Fixture::new();

    let (out, _) = fixture.run(&["help", "gopath"]);

    assert_eq!(out, "The GOPATH variable.\n");
}

#[test]
fn given_help_with_unknown_topic_when_dispatch_then_status_2() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, err) = fixture.run(&["help", "nope"]);

    // Assert
    assert!(out.is_empty());
    assert_eq!(err, "Unknown help topic `nope`.  Run 'gpm help'.\n");
    assert_eq!(fixture.lifecycle.status(), 2);
}

#[test]
fn given_help_with_two_topics_when_dispatch_then_too_many_arguments() {
    // Arrange
    let fixture = Fixture::new();

    // Act
    let (out, err) = fixture.run(&["help", "a", "b"]);

    // Assert
    assert!(out.is_empty());
    assert!(err.starts_with("usage: gpm help command"));
    assert!(err.contains("Too many arguments given."));
    assert_eq!(fixture.lifecycle.status(), 2);
}

#[test]
fn given_raised_status_when_dispatch_succeeds_then_status_not_lowered() {
    // Arrange
    let fixture = Fixture::new();
    fixture.lifecycle.raise_status(5);

    // Act
    fixture.run(&["help"]);

    // Assert
    assert_eq!(fixture.lifecycle.status(), 5);
}
