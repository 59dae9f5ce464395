//! Integration tests for the toolchain-delegating commands.
#![cfg(unix)]

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;

use gpm::application::services::{standard_commands, ToolchainCommand};
use gpm::application::{Command, CommandContext, Handler, Lifecycle};
use gpm::config::Settings;
use gpm::infrastructure::{InfraError, InfraResult, ProcessRelay};

/// Relay returning a fixed outcome and recording what it was asked to run.
struct MockRelay {
    exit_code: Option<i32>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockRelay {
    fn exiting(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn unstartable() -> Self {
        Self {
            exit_code: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ProcessRelay for MockRelay {
    fn run(&self, program: &str, args: &[String]) -> InfraResult<ExitStatus> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        match self.exit_code {
            Some(code) => Ok(ExitStatus::from_raw(code << 8)),
            None => Err(InfraError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

fn run_build(relay: &MockRelay, settings: &Settings, args: &[&str]) -> Lifecycle {
    let lifecycle = Lifecycle::new();
    let ctx = CommandContext {
        lifecycle: &lifecycle,
        relay,
        settings,
    };
    let cmd = Command::new("build [build flags] [packages]");
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    ToolchainCommand::new("build").run(&cmd, &args, &ctx);
    lifecycle
}

#[test]
fn given_successful_toolchain_when_build_then_status_stays_ok() {
    // Arrange
    let relay = MockRelay::exiting(0);
    let settings = Settings::default();

    // Act
    let lifecycle = run_build(&relay, &settings, &["-v", "./..."]);

    // Assert
    assert_eq!(lifecycle.status(), 0);
    let calls = relay.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "go");
    assert_eq!(calls[0].1, ["build", "-v", "./..."]);
}

#[test]
fn given_failing_toolchain_when_build_then_status_is_child_exit_code() {
    // Arrange
    let relay = MockRelay::exiting(2);
    let settings = Settings::default();

    // Act
    let lifecycle = run_build(&relay, &settings, &["./broken"]);

    // Assert
    assert_eq!(lifecycle.status(), 2);
}

#[test]
fn given_unstartable_toolchain_when_build_then_status_is_failure() {
    // Arrange
    let relay = MockRelay::unstartable();
    let settings = Settings::default();

    // Act
    let lifecycle = run_build(&relay, &settings, &[]);

    // Assert
    assert_eq!(lifecycle.status(), 1);
}

#[test]
fn given_configured_toolchain_when_build_then_it_is_relayed() {
    // Arrange
    let relay = MockRelay::exiting(0);
    let settings = Settings {
        toolchain: "/opt/go/bin/go".into(),
        ..Settings::default()
    };

    // Act
    run_build(&relay, &settings, &[]);

    // Assert
    assert_eq!(relay.calls.lock().unwrap()[0].0, "/opt/go/bin/go");
}

#[test]
fn given_standard_commands_then_verbose_flag_defaults_off() {
    for cmd in standard_commands() {
        assert_eq!(cmd.flag("-v"), Some(false), "{}", cmd.name());
    }
}
