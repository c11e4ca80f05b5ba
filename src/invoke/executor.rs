//! Bounded child-process execution with full stream capture

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

/// How one invocation ended. Exactly one variant applies per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Process exited within the bound. `-1` stands in for signal death.
    Completed { exit_code: i32 },
    /// Still running when the bound expired; the child was killed.
    TimedOut { limit: Duration },
    /// The executable could not be launched at all.
    NotFound,
}

/// Captured result of one bounded run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub outcome: Outcome,
}

impl ExecutionResult {
    fn not_found() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            outcome: Outcome::NotFound,
        }
    }
}

/// Run `executable` with `args` in `directory`, waiting at most `limit`.
///
/// Both streams are captured in full and only become available once the
/// process has stopped. A child still running at the bound is killed and
/// whatever it wrote before that is kept. Single attempt, no retries.
pub async fn execute(
    executable: &str,
    args: &[String],
    directory: &Path,
    limit: Duration,
) -> ExecutionResult {
    let mut child = match Command::new(executable)
        .args(args)
        .current_dir(directory)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            debug!(executable, error = %err, "failed to launch");
            return ExecutionResult::not_found();
        }
    };

    let stdout_task = drain(child.stdout.take());
    let stderr_task = drain(child.stderr.take());

    let outcome = match timeout(limit, child.wait()).await {
        Ok(Ok(status)) => Outcome::Completed {
            exit_code: status.code().unwrap_or(-1),
        },
        Ok(Err(err)) => {
            // wait() itself failed; reap the child and report signal death
            warn!(executable, error = %err, "wait on child failed");
            let _ = child.kill().await;
            Outcome::Completed { exit_code: -1 }
        }
        Err(_) => {
            let _ = child.kill().await;
            debug!(executable, ?limit, "killed after timeout");
            Outcome::TimedOut { limit }
        }
    };

    // Killing the child closes its pipes, so both drains reach EOF
    ExecutionResult {
        stdout: collect(stdout_task).await,
        stderr: collect(stderr_task).await,
        outcome,
    }
}

fn drain<R>(pipe: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    })
}

async fn collect(task: JoinHandle<Vec<u8>>) -> String {
    String::from_utf8_lossy(&task.await.unwrap_or_default()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tempfile::TempDir;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_execute_captures_both_streams_and_exit_code() {
        let tmp = TempDir::new().unwrap();
        let result = execute(
            "sh",
            &args(&["-c", "echo out; echo err >&2; exit 3"]),
            tmp.path(),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(result.outcome, Outcome::Completed { exit_code: 3 });
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_execute_runs_in_given_directory() {
        let tmp = TempDir::new().unwrap();
        let result = execute("pwd", &[], tmp.path(), Duration::from_secs(10)).await;

        assert_eq!(result.outcome, Outcome::Completed { exit_code: 0 });
        // macOS tempdirs sit behind /private symlinks
        assert!(result.stdout.trim().ends_with(
            tmp.path().file_name().unwrap().to_str().unwrap()
        ));
    }

    #[tokio::test]
    async fn test_execute_times_out_and_kills_the_child() {
        let tmp = TempDir::new().unwrap();
        let limit = Duration::from_millis(300);
        let start = Instant::now();

        let result = execute("sleep", &args(&["30"]), tmp.path(), limit).await;

        assert_eq!(result.outcome, Outcome::TimedOut { limit });
        // Well under the sleep duration: the child did not run to completion
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_execute_keeps_partial_output_on_timeout() {
        let tmp = TempDir::new().unwrap();
        let result = execute(
            "sh",
            &args(&["-c", "echo early; exec sleep 30"]),
            tmp.path(),
            Duration::from_millis(500),
        )
        .await;

        assert!(matches!(result.outcome, Outcome::TimedOut { .. }));
        assert_eq!(result.stdout, "early\n");
    }

    #[tokio::test]
    async fn test_execute_missing_binary_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = execute(
            "toolsmith-no-such-binary",
            &args(&["--version"]),
            tmp.path(),
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(result.outcome, Outcome::NotFound);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.is_empty());
    }
}
