//! Runs a [`CommandLine`] as a child process.
//!
//! Optional pieces, all off by default:
//! - watchdog that kills the process after `timeout` milliseconds
//! - working directory, created when missing
//! - output redirected to a file, or to `tracing` line by line

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::args::CommandLine;

/// How the child process is run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerSettings {
    /// Kill the process after this many milliseconds. `0` disables the watchdog.
    pub timeout: Option<u64>,
    pub working_directory: Option<PathBuf>,
    /// Write stdout and stderr of the process to this file.
    pub output_file: Option<PathBuf>,
    /// Forward process output to the logger: stdout at info, stderr at error.
    pub use_logger: bool,
    /// With `use_logger`, log stdout at debug instead of info.
    pub quiet_logs: bool,
    /// Do not run anything.
    pub skip: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Timeout. Process runs longer than {millis} ms.")]
    Timeout { millis: u64 },

    #[error("Execution failed: {status}")]
    Failed { status: ExitStatus },

    #[error("the working directory is a file: {path}")]
    WorkingDirectoryIsFile { path: PathBuf },

    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),
}

/// What happened to a run request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Skipped,
    Completed(ExitStatus),
}

pub struct HttpClientRunner {
    settings: RunnerSettings,
}

impl HttpClientRunner {
    pub fn new(settings: RunnerSettings) -> Self {
        Self { settings }
    }

    /// Watchdog duration, if one is armed.
    pub fn watchdog(&self) -> Option<Duration> {
        self.settings
            .timeout
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }

    /// Run the command line and wait for it.
    ///
    /// A non-zero exit is an error; so is hitting the watchdog, in which case
    /// the process has already been killed.
    pub async fn run(&self, command_line: &CommandLine) -> Result<RunOutcome, RunError> {
        if self.settings.skip {
            info!("skipping execute as per configuration");
            return Ok(RunOutcome::Skipped);
        }

        debug!(command_line = %command_line, "Executing command line");
        let mut command = command_line.to_command();
        command.kill_on_drop(true);
        self.prepare_working_directory(&mut command)?;

        let status = if let Some(path) = &self.settings.output_file {
            self.run_to_file(command, path).await?
        } else if self.settings.use_logger {
            self.run_to_logger(command).await?
        } else {
            let mut child = command.spawn()?;
            self.wait(&mut child).await?
        };

        if !status.success() {
            error!(%status, "HTTP Client failed");
            return Err(RunError::Failed { status });
        }
        Ok(RunOutcome::Completed(status))
    }

    fn prepare_working_directory(&self, command: &mut Command) -> Result<(), RunError> {
        let Some(dir) = &self.settings.working_directory else {
            return Ok(());
        };
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        } else if !dir.is_dir() {
            return Err(RunError::WorkingDirectoryIsFile { path: dir.clone() });
        }
        command.current_dir(dir);
        debug!(working_directory = %dir.display(), "Working directory");
        Ok(())
    }

    async fn run_to_file(&self, mut command: Command, path: &Path) -> Result<ExitStatus, RunError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(
                    output_file = %path.display(),
                    error = %e,
                    "Could not create non existing parent directories for the log file"
                );
            }
        }
        let stdout = File::create(path)?;
        let stderr = stdout.try_clone()?;
        command.stdout(Stdio::from(stdout)).stderr(Stdio::from(stderr));
        debug!(output_file = %path.display(), "Will redirect program output to the log file");

        let mut child = command.spawn()?;
        self.wait(&mut child).await
    }

    async fn run_to_logger(&self, mut command: Command) -> Result<ExitStatus, RunError> {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
        debug!("Will redirect program output to the logger");

        let mut child = command.spawn()?;
        let quiet = self.settings.quiet_logs;
        let stdout = child
            .stdout
            .take()
            .map(move |out| forward_lines(out, move |line| log_stdout_line(quiet, line)));
        let stderr = child
            .stderr
            .take()
            .map(|err| forward_lines(err, log_stderr_line));

        let status = self.wait(&mut child).await;
        for handle in [stdout, stderr].into_iter().flatten() {
            // Grandchildren of a killed process may still hold the pipes open.
            if status.is_err() {
                handle.abort();
            }
            join_forwarder(handle).await;
        }
        status
    }

    async fn wait(&self, child: &mut Child) -> Result<ExitStatus, RunError> {
        let Some(limit) = self.watchdog() else {
            return Ok(child.wait().await?);
        };
        debug!(millis = limit.as_millis() as u64, "Set the watchdog");

        let waited = tokio::time::timeout(limit, child.wait()).await;
        match waited {
            Ok(status) => Ok(status?),
            Err(_) => {
                child.kill().await?;
                let millis = limit.as_millis() as u64;
                error!("Timeout. Process runs longer than {millis} ms.");
                Err(RunError::Timeout { millis })
            }
        }
    }
}

fn log_stdout_line(quiet: bool, line: &str) {
    if quiet {
        debug!(target: "ijhttp", "{line}");
    } else {
        info!(target: "ijhttp", "{line}");
    }
}

fn log_stderr_line(line: &str) {
    error!(target: "ijhttp", "{line}");
}

/// Wait for a forwarder task. Cancellation is expected after a kill; a panic is reported.
async fn join_forwarder(handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        if !e.is_cancelled() {
            warn!(error = %e, "Output forwarder stopped abnormally");
        }
    }
}

/// Pump lines from a child pipe into `log` until the pipe closes.
///
/// Lines are decoded lossily; invalid UTF-8 does not stop the pump before EOF.
fn forward_lines<R, F>(reader: R, log: F) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    F: Fn(&str) + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    log(line.trim_end_matches(['\n', '\r']));
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read process output");
                    break;
                }
            }
        }
    })
}
