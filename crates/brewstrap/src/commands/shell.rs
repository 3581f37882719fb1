// Shell command runner adapter implementation

use std::{
    future::Future,
    process::{Output, Stdio},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command,
    sync::mpsc,
};

use super::runner::{CommandError, CommandOutput, CommandRunner, OutputCallback, OutputChunk};

/// Shell command runner implementation
///
/// Every command line is handed to `<shell> -c`, so pipes and redirects work the way they
/// would in a terminal.
#[derive(Clone, Debug)]
pub struct ShellCommandRunner {
    /// Path to the shell executable
    ///
    shell: String,

    /// Upper bound on how long a command may run. `None` waits for as long as it takes.
    ///
    timeout: Option<Duration>,
}

impl ShellCommandRunner {
    /// Create a new shell command runner
    ///
    #[must_use]
    pub fn new(shell: &str, timeout: Option<Duration>) -> Self {
        Self {
            shell: shell.to_string(),
            timeout,
        }
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    async fn with_timeout<F>(&self, command: &str, fut: F) -> Result<CommandOutput, CommandError>
    where
        F: Future<Output = Result<CommandOutput, CommandError>>,
    {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fut).await.map_err(|_| {
                CommandError::Timeout {
                    command: command.to_string(),
                    timeout,
                }
            })?,
            None => fut.await,
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new("/bin/sh", None)
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    /// Execute a command without streaming stdout and stderr.
    ///
    async fn execute(&self, command: &str) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command, "executing command");
        let start_time = Instant::now();
        let mut cmd = self.command(command);

        self.with_timeout(command, async {
            let output = cmd
                .output()
                .await
                .map_err(|e| CommandError::io(command, e))?;

            Ok(CommandOutput::new(output, start_time.elapsed()))
        })
        .await
    }

    async fn execute_streaming(
        &self,
        command: &str,
        mut callback: OutputCallback,
    ) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command, "executing streaming command");
        let start_time = Instant::now();

        let mut cmd = self.command(command);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| CommandError::io(command, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CommandError::StdoutSpawn(command.to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| CommandError::StderrSpawn(command.to_string()))?;

        let (tx, mut rx) = mpsc::channel(32);

        let stdout_task = tokio::spawn(pump(stdout, tx.clone(), OutputChunk::Stdout));
        let stderr_task = tokio::spawn(pump(stderr, tx, OutputChunk::Stderr));

        // Both senders live in the pump tasks, so this ends once both pipes hit EOF.
        let callback_task = tokio::spawn(async move {
            while let Some(chunk) = rx.recv().await {
                callback(chunk);
            }
        });

        let result = self
            .with_timeout(command, async {
                let status = child
                    .wait()
                    .await
                    .map_err(|e| CommandError::io(command, e))?;

                let stdout = join_pump(command, stdout_task).await?;
                let stderr = join_pump(command, stderr_task).await?;
                let _ = callback_task.await;

                Ok(CommandOutput::new(
                    Output {
                        status,
                        stdout,
                        stderr,
                    },
                    start_time.elapsed(),
                ))
            })
            .await;

        if matches!(result, Err(CommandError::Timeout { .. })) {
            let _ = child.kill().await;
        }

        result
    }
}

/// Read `reader` to EOF, forwarding every chunk and keeping a full copy.
async fn pump<R>(
    mut reader: R,
    tx: mpsc::Sender<OutputChunk>,
    output_type: fn(String) -> OutputChunk,
) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut full_output = Vec::new();
    let mut buffer = vec![0; 1024];

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        full_output.extend_from_slice(&buffer[..n]);

        let chunk = String::from_utf8_lossy(&buffer[..n]).to_string();
        // A dropped receiver only means nobody is listening anymore; keep draining.
        let _ = tx.send(output_type(chunk)).await;
    }

    Ok(full_output)
}

async fn join_pump(
    command: &str,
    task: tokio::task::JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<Vec<u8>, CommandError> {
    task.await
        .map_err(|e| CommandError::io(command, std::io::Error::other(e)))?
        .map_err(|e| CommandError::io(command, e))
}
