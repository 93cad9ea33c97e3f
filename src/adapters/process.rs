use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::errors::{Result, SignetError};

/// Conservative bound for ordinary tool calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Key generation gathers entropy and can be slow on fresh machines.
pub const KEYGEN_TIMEOUT: Duration = Duration::from_secs(120);

/// Captured result of an external tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn stdout_utf8(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_utf8(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Drain a pipe on a helper thread so the child never blocks on a full
/// buffer while we poll for exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

/// Run an external tool, optionally feeding stdin, and wait at most
/// `timeout` before killing it.
///
/// A non-zero exit is NOT an error at this level; callers inspect
/// `ToolOutput::success` and decide how to report it.
pub fn run_with_timeout(
    mut cmd: Command,
    tool: &str,
    stdin_data: Option<&[u8]>,
    timeout: Duration,
) -> Result<ToolOutput> {
    cmd.stdin(if stdin_data.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| SignetError::ToolInvocation {
        tool: tool.into(),
        reason: format!("failed to start: {e}"),
    })?;

    if let Some(data) = stdin_data {
        if let Some(mut stdin) = child.stdin.take() {
            // A child that exits before reading closes the pipe; its exit
            // status carries the real diagnosis, not the broken pipe.
            if let Err(e) = stdin.write_all(data) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(SignetError::ToolInvocation {
                        tool: tool.into(),
                        reason: format!("failed to write stdin: {e}"),
                    });
                }
            }
        }
    }

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait().map_err(|e| SignetError::ToolInvocation {
            tool: tool.into(),
            reason: format!("failed to wait: {e}"),
        })? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SignetError::Timeout {
                    tool: tool.into(),
                    timeout,
                });
            }
            None => thread::sleep(Duration::from_millis(25)),
        }
    };

    Ok(ToolOutput {
        success: status.success(),
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
    })
}
