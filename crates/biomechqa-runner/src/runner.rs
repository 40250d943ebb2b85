//! Runs the external QA script and turns its output into a [`QaResult`].

use async_trait::async_trait;
use biomechqa_common::{QaError, QaResult, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::framing::{Frame, FrameParser, Outcome};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Stderr kept for error messages. Older bytes are dropped first.
const MAX_STDERR_BYTES: usize = 4 * 1024;

/// How long to wait for stderr to drain after the script has exited.
const STDERR_GRACE: Duration = Duration::from_secs(2);

/// Anything that can answer a question against a corpus directory.
#[async_trait]
pub trait QaBackend: Send + Sync {
    async fn ask(&self, corpus_dir: &Path, question: &str) -> Result<QaResult>;
}

/// How to launch the script. The corpus directory and the question are
/// appended after `args` as the final two positional arguments.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub timeout: Duration,
}

impl RunnerConfig {
    /// `python -u <script>`, unbuffered so frames arrive as they are printed.
    pub fn python(python: impl Into<PathBuf>, script: impl Into<PathBuf>, timeout: Duration) -> Self {
        let script: PathBuf = script.into();
        Self {
            program: python.into(),
            args: vec![OsString::from("-u"), script.into_os_string()],
            timeout,
        }
    }
}

/// Spawns one script process per question.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    config: RunnerConfig,
}

enum Drive {
    Exited(ExitStatus),
    Aborted,
}

impl ScriptRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub async fn run(&self, corpus_dir: &Path, question: &str) -> Result<QaResult> {
        info!(
            program = %self.config.program.display(),
            corpus_dir = %corpus_dir.display(),
            question,
            "Starting QA script"
        );

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(corpus_dir)
            .arg(question)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| QaError::Spawn(e.to_string()))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            QaError::Io(std::io::Error::other("stdout pipe was not available"))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            QaError::Io(std::io::Error::other("stderr pipe was not available"))
        })?;
        let stderr_task = tokio::spawn(collect_stderr(stderr));

        // Output parsing and the deadline race; whichever settles first decides.
        let mut parser = FrameParser::new();
        let finished = tokio::select! {
            res = drive(&mut child, stdout, &mut parser) => Some(res),
            _ = tokio::time::sleep(self.config.timeout) => None,
        };

        let driven = match finished {
            None => {
                warn!(timeout_secs = self.config.timeout.as_secs(), "QA script timed out, terminating");
                terminate(&mut child, stderr_task).await;
                return Err(QaError::Timeout(self.config.timeout.as_secs()));
            }
            Some(Err(e)) => {
                terminate(&mut child, stderr_task).await;
                return Err(e);
            }
            Some(Ok(driven)) => driven,
        };

        let status = match driven {
            Drive::Exited(status) => status,
            Drive::Aborted => {
                terminate(&mut child, stderr_task).await;
                let (outcome, _) = parser.finish();
                return Err(match outcome {
                    Outcome::Error(message) => {
                        warn!(error = %message, "QA script reported an error");
                        QaError::Script(message)
                    }
                    Outcome::Result(_) | Outcome::Empty => QaError::NoResult,
                });
            }
        };

        let (outcome, tail) = parser.finish();
        if let Some(frame) = tail {
            log_frame(&frame);
        }
        if let Outcome::Error(message) = outcome {
            warn!(error = %message, "QA script reported an error");
            return Err(QaError::Script(message));
        }

        let stderr = match tokio::time::timeout(STDERR_GRACE, stderr_task).await {
            Ok(Ok(text)) => text,
            _ => String::new(),
        };
        if !status.success() {
            return Err(QaError::ProcessFailed {
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        debug!("QA script completed");

        match outcome {
            Outcome::Result(value) => {
                let result = QaResult::from_value(value)?;
                info!(references = result.references.len(), "QA script produced a result");
                Ok(result)
            }
            Outcome::Empty | Outcome::Error(_) => Err(QaError::NoResult),
        }
    }
}

#[async_trait]
impl QaBackend for ScriptRunner {
    async fn ask(&self, corpus_dir: &Path, question: &str) -> Result<QaResult> {
        self.run(corpus_dir, question).await
    }
}

/// Feed stdout through the parser until EOF or a terminal `error` frame, then
/// wait for the process to exit.
async fn drive(child: &mut Child, stdout: ChildStdout, parser: &mut FrameParser) -> Result<Drive> {
    let mut reader = BufReader::new(stdout);
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).await?;
        if n == 0 {
            break;
        }
        for frame in parser.push(&String::from_utf8_lossy(&line)) {
            log_frame(&frame);
        }
        if parser.is_terminal() {
            return Ok(Drive::Aborted);
        }
    }
    Ok(Drive::Exited(child.wait().await?))
}

async fn terminate(child: &mut Child, stderr_task: JoinHandle<String>) {
    if let Err(e) = child.start_kill() {
        debug!(error = %e, "kill failed, process already gone");
    }
    if let Err(e) = child.wait().await {
        warn!(error = %e, "failed to reap QA script");
    }
    // A grandchild may still hold the pipe open.
    stderr_task.abort();
}

async fn collect_stderr<R: AsyncRead + Unpin>(stderr: R) -> String {
    let mut lines = BufReader::new(stderr).lines();
    let mut kept = String::new();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                debug!(target: "biomechqa_runner::script", "stderr: {}", line);
                kept.push_str(&line);
                kept.push('\n');
                if kept.len() > MAX_STDERR_BYTES {
                    let mut cut = kept.len() - MAX_STDERR_BYTES;
                    while !kept.is_char_boundary(cut) {
                        cut += 1;
                    }
                    kept.drain(..cut);
                }
            }
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "stopped reading stderr");
                break;
            }
        }
    }
    kept
}

fn log_frame(frame: &Frame) {
    match frame {
        Frame::Log(message) => info!(target: "biomechqa_runner::script", "{}", message),
        Frame::Result(_) => debug!("captured result frame"),
        Frame::Error(message) => debug!(error = %message, "captured error frame"),
        Frame::Malformed { line, reason } => {
            warn!(line = %line, reason = %reason, "skipping malformed output line")
        }
        Frame::Unrecognized(line) => debug!(line = %line, "skipping unrecognized output object"),
    }
}
