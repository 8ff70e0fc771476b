//! Deadline-bounded execution of external analyzer processes
//!
//! Output is captured into unnamed temp files rather than pipes: a polling
//! wait on a piped child can deadlock once the pipe buffer fills.

use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("binary '{0}' not found")]
    NotFound(String),

    #[error("failed to spawn '{0}': {1}")]
    Spawn(String, std::io::Error),

    #[error("'{binary}' exceeded the {}s deadline", deadline.as_secs())]
    TimedOut { binary: String, deadline: Duration },

    #[error("failed waiting for '{0}': {1}")]
    Wait(String, std::io::Error),

    #[error("failed to capture output: {0}")]
    Capture(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run a command to completion or kill it at the deadline.
///
/// On expiry the child is killed and reaped; whatever it wrote is
/// discarded by the caller per the degradation policy.
pub fn run_with_deadline(
    mut command: Command,
    binary: &str,
    deadline: Duration,
) -> Result<CommandOutput, RunnerError> {
    let mut stdout_capture = tempfile::tempfile()?;
    let mut stderr_capture = tempfile::tempfile()?;

    command
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_capture.try_clone()?))
        .stderr(Stdio::from(stderr_capture.try_clone()?));

    let mut child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RunnerError::NotFound(binary.to_string())
        } else {
            RunnerError::Spawn(binary.to_string(), e)
        }
    })?;

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) => {
                if started.elapsed() > deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunnerError::TimedOut {
                        binary: binary.to_string(),
                        deadline,
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(RunnerError::Wait(binary.to_string(), e)),
        }
    }

    let status = child
        .wait()
        .map_err(|e| RunnerError::Wait(binary.to_string(), e))?;

    let stdout = read_capture(&mut stdout_capture)?;
    let stderr = read_capture(&mut stderr_capture)?;

    Ok(CommandOutput {
        status,
        stdout,
        stderr,
    })
}

fn read_capture(file: &mut std::fs::File) -> Result<String, RunnerError> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
