//! External process execution with timeout enforcement.
//!
//! One workload invocation: spawn the binary, drain its output pipes on
//! background threads, poll for exit, kill on deadline. Sequential by
//! design; the harness never runs two children at once.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{MedirError, Result};

/// Poll interval while waiting for child exit.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Outcome of one child-process invocation.
#[derive(Debug)]
pub enum RunOutcome {
    /// The child terminated on its own within the timeout.
    Completed {
        /// Wall-clock span of the invocation.
        elapsed: Duration,
        /// Whether the child exited with status 0. Non-zero exit is a
        /// workload-level failure, not a harness error.
        exit_success: bool,
        /// Full captured standard output.
        stdout: String,
        /// Full captured standard error.
        stderr: String,
    },
    /// The child exceeded its deadline and was killed. Partial output is
    /// discarded; `elapsed` is defined as exactly the timeout value.
    TimedOut {
        /// The enforced timeout.
        timeout: Duration,
    },
}

/// Drain a pipe to a string on a background thread.
///
/// Reading on a separate thread avoids the classic deadlock where the child
/// blocks on a full pipe buffer while the parent blocks in `wait`.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        let _ = pipe.read_to_string(&mut buf);
        buf
    })
}

/// Execute `path` with `args`, waiting up to `timeout` for termination.
///
/// Feeds no stdin. Returns an error only when the process cannot be spawned
/// at all; abnormal exit and timeout are reported through [`RunOutcome`].
pub fn run(path: &Path, args: &[String], timeout: Duration) -> Result<RunOutcome> {
    let start = Instant::now();

    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| MedirError::Spawn { path: path.to_path_buf(), source })?;

    let stdout_thread = child.stdout.take().map(drain);
    let stderr_thread = child.stderr.take().map(drain);

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Reader threads finish once the pipe writers die; their
                    // partial output is not reliable and is dropped.
                    return Ok(RunOutcome::TimedOut { timeout });
                }
                thread::sleep(WAIT_POLL);
            }
            Err(source) => {
                let _ = child.kill();
                return Err(MedirError::Spawn { path: path.to_path_buf(), source });
            }
        }
    };

    let elapsed = start.elapsed();
    let stdout = stdout_thread.map(|t| t.join().unwrap_or_default()).unwrap_or_default();
    let stderr = stderr_thread.map(|t| t.join().unwrap_or_default()).unwrap_or_default();

    Ok(RunOutcome::Completed { elapsed, exit_success: status.success(), stdout, stderr })
}
