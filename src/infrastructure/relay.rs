//! Live relay of a child process's output streams
//!
//! A [`RelaySession`] owns one spawned child and both of its output pipes.
//! Pumping the session copies stdout and stderr on two scoped threads while
//! the calling thread waits for the child; both threads are joined before the
//! session reports completion, so output written right before exit is never
//! cut off. Byte order within a stream is preserved, ordering between the two
//! streams is not.
//!
//! Each copy thread owns its pipe. When writing to a sink fails the thread
//! drops the read end, so the child gets a broken pipe instead of blocking on
//! a full pipe buffer.

use std::io::{self, Read, Write};
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::{self, ScopedJoinHandle};

use tracing::{debug, instrument};

use crate::infrastructure::traits::ProcessRelay;
use crate::infrastructure::{InfraError, InfraResult};

const CHUNK_SIZE: usize = 8 * 1024;

/// Transient state of one relay invocation.
#[derive(Debug)]
pub struct RelaySession {
    program: String,
    child: Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
}

impl RelaySession {
    /// Spawn `program` with stdin inherited and both output streams piped.
    pub fn open(program: &str, args: &[String]) -> InfraResult<Self> {
        debug!("open: program={}, args={:?}", program, args);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| InfraError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(InfraError::Pipe {
                program: program.to_string(),
                stream: "stdout",
            });
        };
        let Some(stderr) = child.stderr.take() else {
            reap(&mut child);
            return Err(InfraError::Pipe {
                program: program.to_string(),
                stream: "stderr",
            });
        };

        Ok(Self {
            program: program.to_string(),
            child,
            stdout,
            stderr,
        })
    }

    /// OS process id of the child.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Copy both child streams into `out` and `err` until end-of-stream and
    /// wait for the child. Returns once the child has exited and both copies
    /// have finished.
    pub fn pump<O, E>(self, out: &mut O, err: &mut E) -> InfraResult<ExitStatus>
    where
        O: Write + Send + ?Sized,
        E: Write + Send + ?Sized,
    {
        let RelaySession {
            program,
            mut child,
            stdout,
            stderr,
        } = self;

        thread::scope(|scope| {
            let out_task = match spawn_copy(scope, "relay-stdout", stdout, out) {
                Ok(task) => task,
                Err(e) => {
                    reap(&mut child);
                    return Err(e);
                }
            };
            let err_task = match spawn_copy(scope, "relay-stderr", stderr, err) {
                Ok(task) => task,
                Err(e) => {
                    reap(&mut child);
                    return Err(e);
                }
            };

            let status = child.wait().map_err(|source| InfraError::Wait {
                program: program.clone(),
                source,
            });
            let out_bytes = join_copy(out_task, "stdout");
            let err_bytes = join_copy(err_task, "stderr");

            let status = status?;
            debug!(
                "pump: program={}, status={}, stdout_bytes={:?}, stderr_bytes={:?}",
                program,
                status,
                out_bytes.as_ref().ok(),
                err_bytes.as_ref().ok()
            );
            out_bytes?;
            err_bytes?;
            Ok(status)
        })
    }
}

/// Real relay writing to the current process's stdout and stderr.
#[derive(Debug, Default)]
pub struct StreamRelay;

impl StreamRelay {
    /// Relay into arbitrary sinks instead of the process streams.
    pub fn run_with<O, E>(
        &self,
        program: &str,
        args: &[String],
        out: &mut O,
        err: &mut E,
    ) -> InfraResult<ExitStatus>
    where
        O: Write + Send + ?Sized,
        E: Write + Send + ?Sized,
    {
        let session = RelaySession::open(program, args)?;
        debug!("run_with: program={}, pid={}", program, session.id());
        session.pump(out, err)
    }
}

impl ProcessRelay for StreamRelay {
    #[instrument(skip(self))]
    fn run(&self, program: &str, args: &[String]) -> InfraResult<ExitStatus> {
        // Unlocked handles: the relay threads write concurrently.
        self.run_with(program, args, &mut io::stdout(), &mut io::stderr())
    }
}

fn spawn_copy<'scope, 'env, R, W>(
    scope: &'scope thread::Scope<'scope, 'env>,
    name: &str,
    mut source: R,
    sink: &'env mut W,
) -> InfraResult<ScopedJoinHandle<'scope, io::Result<u64>>>
where
    R: Read + Send + 'scope,
    W: Write + Send + ?Sized,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn_scoped(scope, move || copy_stream(&mut source, sink))
        .map_err(|e| InfraError::io(format!("start {name} thread"), e))
}

/// Forward every chunk as soon as it arrives.
fn copy_stream<R, W>(source: &mut R, sink: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink.write_all(&buf[..n])?;
        sink.flush()?;
        total += n as u64;
    }
    sink.flush()?;
    Ok(total)
}

fn join_copy(
    task: ScopedJoinHandle<'_, io::Result<u64>>,
    stream: &'static str,
) -> InfraResult<u64> {
    match task.join() {
        Ok(result) => result.map_err(|source| InfraError::Relay { stream, source }),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Kill and reap a child we are not going to relay.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
