use std::fmt::Debug;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::invocation::InvocationRequest;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const READ_CHUNK: usize = 4096;

/// Whether a detached process could be started. No handle to the process is kept either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The process was started. Whether it does anything useful is not checked.
    Started,
    /// The process could not be started.
    FailedToStart,
}

/// What a process that ran to completion produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// The process exited with a zero status and closed its output before the timeout.
    pub success: bool,
    /// The process was killed because it ran longer than the timeout, or its output was still
    /// held open by a descendant at the timeout.
    pub timed_out: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Starting external processes.
pub trait ProcessLauncher: Debug {
    /// Start `program` with the arguments of `request` and return immediately.
    fn launch_detached(&self, program: &Path, request: &InvocationRequest) -> LaunchOutcome;

    /// Run `program` with the arguments of `request` until it exits and its output pipes are
    /// closed, or until `timeout` passes, capturing stdout and stderr. A timed out process is
    /// killed. Output that is still held open past the timeout by a descendant is abandoned.
    ///
    /// # Errors
    ///
    /// This function returns an error if the process cannot be started or waited for.
    fn run_to_completion(
        &self,
        program: &Path,
        request: &InvocationRequest,
        timeout: Duration,
    ) -> Result<ExecOutput>;
}

/// [`ProcessLauncher`] that starts real processes with [`std::process::Command`].
///
/// Detached children get null stdio and their own process group, so they outlive the caller
/// and do not receive its terminal signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch_detached(&self, program: &Path, request: &InvocationRequest) -> LaunchOutcome {
        let mut cmd = build_command(program, request);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);

        match cmd.spawn() {
            Ok(child) => {
                debug!(pid = child.id(), "started [{cmd:?}]");
                reap_in_background(child);
                LaunchOutcome::Started
            }
            Err(error) => {
                warn!("could not start [{cmd:?}]: {error}");
                LaunchOutcome::FailedToStart
            }
        }
    }

    fn run_to_completion(
        &self,
        program: &Path,
        request: &InvocationRequest,
        timeout: Duration,
    ) -> Result<ExecOutput> {
        let mut cmd = build_command(program, request);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("running command [{cmd:?}]"))?;
        let stdout = child.stdout.take().map(PipeReader::spawn);
        let stderr = child.stderr.take().map(PipeReader::spawn);

        let deadline = Instant::now() + timeout;
        let (exited_ok, mut timed_out) = loop {
            let status = child
                .try_wait()
                .with_context(|| format!("waiting for command [{cmd:?}]"))?;
            if let Some(status) = status {
                break (status.success(), false);
            }
            if Instant::now() >= deadline {
                kill(&mut child);
                break (false, true);
            }
            thread::sleep(POLL_INTERVAL);
        };

        let mut collect = |reader: Option<PipeReader>| {
            let Some(reader) = reader else {
                return String::new();
            };
            if !reader.wait_until(deadline) {
                debug!("output of [{cmd:?}] still open at the deadline");
                timed_out = true;
            }
            reader.contents()
        };
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        Ok(ExecOutput {
            success: exited_ok && !timed_out,
            timed_out,
            stdout,
            stderr,
        })
    }
}

fn build_command(program: &Path, request: &InvocationRequest) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(request.args());
    cmd
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

/// Wait for a detached child on a throwaway thread so it does not linger as a zombie.
fn reap_in_background(mut child: Child) {
    thread::spawn(move || {
        if let Err(error) = child.wait() {
            debug!("could not wait for detached process: {error}");
        }
    });
}

fn kill(child: &mut Child) {
    if let Err(error) = child.kill() {
        debug!("could not kill process {}: {error}", child.id());
    }
    if let Err(error) = child.wait() {
        debug!("could not wait for killed process {}: {error}", child.id());
    }
}

/// Drains a pipe on its own thread. The buffer stays readable while the thread is still
/// blocked, so a reader can be abandoned with whatever arrived so far.
struct PipeReader {
    buffer: Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

impl PipeReader {
    fn spawn<R>(mut pipe: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (sender, done) = mpsc::channel();
        let shared = Arc::clone(&buffer);

        thread::spawn(move || {
            let mut chunk = [0; READ_CHUNK];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => match shared.lock() {
                        Ok(mut buffer) => buffer.extend_from_slice(&chunk[..n]),
                        Err(_) => break,
                    },
                    Err(error) if error.kind() == std::io::ErrorKind::Interrupted => {}
                    Err(error) => {
                        debug!("could not read process output: {error}");
                        break;
                    }
                }
            }
            // the receiver is gone if the reader was abandoned
            let _ = sender.send(());
        });

        Self { buffer, done }
    }

    /// Whether the pipe reached end of file before `deadline`.
    fn wait_until(&self, deadline: Instant) -> bool {
        let remaining = deadline.saturating_duration_since(Instant::now());
        self.done.recv_timeout(remaining).is_ok()
    }

    fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn missing_program_fails_to_start() {
        let outcome = SystemLauncher.launch_detached(
            Path::new("/nonexistent/uemacs-test/emacsclient"),
            &InvocationRequest::new().literal("-n"),
        );
        assert_eq!(outcome, LaunchOutcome::FailedToStart);
    }

    #[test]
    fn captures_output_of_finished_process() {
        let request = InvocationRequest::new()
            .literal("-c")
            .quoted("echo saved; echo oops >&2");
        let output = SystemLauncher
            .run_to_completion(Path::new("/bin/sh"), &request, Duration::from_secs(10))
            .expect("sh runs");

        assert!(output.success);
        assert!(!output.timed_out);
        assert_eq!(output.stdout.trim(), "saved");
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn nonzero_exit_is_not_success() {
        let request = InvocationRequest::new().literal("-c").quoted("exit 3");
        let output = SystemLauncher
            .run_to_completion(Path::new("/bin/sh"), &request, Duration::from_secs(10))
            .expect("sh runs");

        assert!(!output.success);
        assert!(!output.timed_out);
    }

    #[test]
    fn hung_process_is_killed_after_timeout() {
        let request = InvocationRequest::new().literal("-c").quoted("exec sleep 30");
        let started = Instant::now();
        let output = SystemLauncher
            .run_to_completion(Path::new("/bin/sh"), &request, Duration::from_millis(200))
            .expect("sh runs");

        assert!(!output.success);
        assert!(output.timed_out);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn output_held_open_by_descendant_is_abandoned_at_timeout() {
        let request = InvocationRequest::new()
            .literal("-c")
            .quoted("sleep 5 & echo started");
        let started = Instant::now();
        let output = SystemLauncher
            .run_to_completion(Path::new("/bin/sh"), &request, Duration::from_millis(200))
            .expect("sh runs");

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(output.timed_out);
        assert!(!output.success);
        assert_eq!(output.stdout.trim(), "started");
    }

    #[test]
    fn detached_launch_of_existing_program_starts() {
        let outcome =
            SystemLauncher.launch_detached(Path::new("/bin/true"), &InvocationRequest::new());
        assert_eq!(outcome, LaunchOutcome::Started);
    }
}
