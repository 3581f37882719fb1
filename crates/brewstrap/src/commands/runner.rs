//! Command execution abstractions and types
//!
//! This module provides the port through which every external program is run. The setup
//! steps only ever see this trait, which lets the tests swap in a mock runner instead of
//! spawning a real package manager.

use std::{
    borrow::Cow,
    fmt,
    io::{self, Write},
    process::{ExitStatus, Output},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use thiserror::Error;

/// A chunk of output from a running command
///
/// Represents either stdout or stderr output from a command execution, as it is read from
/// the child's pipe.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputChunk {
    /// Standard output content
    Stdout(String),
    /// Standard error content
    Stderr(String),
}

impl fmt::Display for OutputChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout(s) | Self::Stderr(s) => f.write_str(s),
        }
    }
}

impl OutputChunk {
    /// Write the chunk to the matching stream of this process.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing or flushing the stream.
    pub fn echo(&self) -> io::Result<()> {
        match self {
            Self::Stdout(_) => self.write_to(&mut io::stdout().lock()),
            Self::Stderr(_) => self.write_to(&mut io::stderr().lock()),
        }
    }

    /// Write the chunk's text to `out` and flush it.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing or flushing `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Self::Stdout(s) | Self::Stderr(s) => out.write_all(s.as_bytes())?,
        }
        out.flush()
    }
}

/// Receives each [`OutputChunk`] of a streaming command as it arrives.
pub type OutputCallback = Box<dyn FnMut(OutputChunk) + Send + 'static>;

/// Port for command execution
///
/// Implementations run a command line to completion. A command that starts and exits with
/// a non-zero status is *not* an error at this level; callers inspect
/// [`CommandOutput::is_success`] and decide for themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute a command, wait for it to complete, then return its captured output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if:
    /// - The command cannot be started (IO error)
    /// - The runner has a timeout and the command exceeds it
    async fn execute(&self, command: &str) -> Result<CommandOutput, CommandError>;

    /// Execute a command, handing stdout and stderr to `output_callback` as they are read.
    ///
    /// The returned [`CommandOutput`] still holds everything the command wrote.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if:
    /// - The command cannot be started (IO error)
    /// - Either output pipe cannot be captured or read
    /// - The runner has a timeout and the command exceeds it
    async fn execute_streaming(
        &self,
        command: &str,
        output_callback: OutputCallback,
    ) -> Result<CommandOutput, CommandError>;
}

/// Result of executing a command
///
/// Contains the complete output and metadata from a command execution, including exit
/// status, stdout, stderr, and execution duration.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// The process output containing exit status and output streams
    pub(crate) output: Output,

    /// How long the command took to execute
    pub(crate) duration: Duration,
}

impl CommandOutput {
    #[must_use]
    pub fn new(output: Output, duration: Duration) -> Self {
        Self { output, duration }
    }

    /// Build an output from its parts, as if a process had exited with `exit_code`.
    ///
    /// Mostly useful for fakes and tests that never spawn anything.
    #[must_use]
    pub fn from_exit_code(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            output: Output {
                status: exit_status(exit_code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
            duration: Duration::ZERO,
        }
    }

    /// Get the command's exit code
    ///
    /// Returns -1 if the exit code cannot be determined (e.g., the process was terminated by
    /// a signal).
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.output.status.code().unwrap_or(-1)
    }

    #[must_use]
    pub fn stdout(&self) -> &[u8] {
        &self.output.stdout
    }

    /// Get stdout as a UTF-8 string, replacing invalid sequences.
    #[must_use]
    pub fn stdout_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output.stdout)
    }

    #[must_use]
    pub fn stderr(&self) -> &[u8] {
        &self.output.stderr
    }

    /// Get stderr as a UTF-8 string, replacing invalid sequences.
    #[must_use]
    pub fn stderr_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output.stderr)
    }

    /// Stdout followed by stderr, the way a terminal would have shown them.
    #[must_use]
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout_str().into_owned();
        combined.push_str(&self.stderr_str());
        combined
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Check if the command exited with status code 0.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.output.status.success()
    }

    /// Turn a non-zero exit into a [`CommandError::NonZeroExit`] for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NonZeroExit`] carrying the captured output when the command
    /// did not succeed.
    pub fn ensure_success(self, command: &str) -> Result<Self, CommandError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_error(command))
        }
    }

    /// Describe this output as a failure of `command`, whatever its exit status.
    #[must_use]
    pub fn into_error(self, command: &str) -> CommandError {
        CommandError::NonZeroExit {
            command: command.to_string(),
            exit_code: self.exit_code(),
            stdout: self.stdout_str().into_owned(),
            stderr: self.stderr_str().into_owned(),
            execution_duration: self.duration,
        }
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw((code & 0xff) << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Errors that can occur during command execution
#[derive(Error, Debug, Clone)]
pub enum CommandError {
    /// Command execution exceeded the runner's timeout
    #[error("Command timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },

    /// IO error occurred while starting or running the command
    #[error("IO Error executing command '{command}': {source}")]
    IoError {
        command: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Command executed but returned a non-zero exit code
    #[error("Command failed with exit code {exit_code}: {command}")]
    NonZeroExit {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
        execution_duration: Duration,
    },

    /// Failed to capture stdout during streaming execution
    #[error("Failed spawning stdout during command: {0}")]
    StdoutSpawn(String),

    /// Failed to capture stderr during streaming execution
    #[error("Failed spawning stderr during command: {0}")]
    StderrSpawn(String),
}

impl CommandError {
    pub(crate) fn io(command: &str, source: std::io::Error) -> Self {
        Self::IoError {
            command: command.to_string(),
            source: Arc::new(source),
        }
    }
}
