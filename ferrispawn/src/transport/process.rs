//! Child process handle built on `tokio::process`.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use log::{debug, warn};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use super::config::SpawnConfig;
use crate::error::{ProcessError, Result};

/// How often `wait_blocking` polls the child for an exit status.
const BLOCKING_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Owned handle to a spawned child process.
///
/// The stdin/stdout pipes are handed out once by [`ProcessHandle::spawn`];
/// the handle itself only answers questions about the child's exit.
pub struct ProcessHandle {
    child: Child,
    program: String,
}

impl ProcessHandle {
    /// Spawn the child with piped stdin and stdout.
    ///
    /// Must be called from within a tokio runtime. If a pipe is missing after
    /// the child started, the child is killed before the error is returned.
    pub fn spawn(config: &SpawnConfig) -> Result<(Self, ChildStdin, ChildStdout)> {
        let mut command = Command::new(&config.program);
        command
            .args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if let Some(dir) = &config.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            program: config.program.clone(),
            source,
        })?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            (stdin, _) => {
                let missing = if stdin.is_none() { "stdin" } else { "stdout" };
                if let Err(e) = child.start_kill() {
                    warn!("failed to kill half-spawned '{}': {}", config.program, e);
                }
                return Err(ProcessError::MissingStream(missing).into());
            }
        };

        debug!(
            "spawned '{}' (pid {:?})",
            config.display_command(),
            child.id()
        );

        Ok((
            Self {
                child,
                program: config.program.clone(),
            },
            stdin,
            stdout,
        ))
    }

    /// OS process id, or `None` once the child has been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// The program this process was started from.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check without blocking whether the child has terminated.
    pub fn has_exited(&mut self) -> Result<bool> {
        let status = self.child.try_wait().map_err(ProcessError::Wait)?;
        Ok(status.is_some())
    }

    /// Wait for the child to terminate.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait().await.map_err(ProcessError::Wait)?;
        debug!("'{}' exited with {}", self.program, status);
        Ok(status)
    }

    /// Block the current thread until the child terminates.
    ///
    /// Polls `try_wait`, so it does not need the runtime to make progress and
    /// is safe to call from synchronous code.
    pub fn wait_blocking(&mut self) -> Result<ExitStatus> {
        loop {
            if let Some(status) = self.child.try_wait().map_err(ProcessError::Wait)? {
                debug!("'{}' exited with {}", self.program, status);
                return Ok(status);
            }
            std::thread::sleep(BLOCKING_POLL_INTERVAL);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_spawn_missing_program() {
        let config = SpawnConfig::new("/definitely/not/a/real/program");
        match ProcessHandle::spawn(&config) {
            Err(Error::Process(ProcessError::SpawnFailed { program, .. })) => {
                assert_eq!(program, "/definitely/not/a/real/program");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("spawn should have failed"),
        }
    }

    #[tokio::test]
    async fn test_exit_after_stdin_closed() {
        let (mut handle, stdin, stdout) = ProcessHandle::spawn(&SpawnConfig::new("cat")).unwrap();
        assert!(handle.id().is_some());
        assert!(!handle.has_exited().unwrap());

        drop(stdin);
        drop(stdout);

        let status = handle.wait().await.unwrap();
        assert!(status.success());
        assert!(handle.has_exited().unwrap());
    }

    #[tokio::test]
    async fn test_wait_blocking() {
        let mut config = SpawnConfig::new("sh");
        config.args = vec!["-c".into(), "exit 3".into()];
        let (mut handle, _stdin, _stdout) = ProcessHandle::spawn(&config).unwrap();

        let status = handle.wait_blocking().unwrap();
        assert_eq!(status.code(), Some(3));
    }
}
