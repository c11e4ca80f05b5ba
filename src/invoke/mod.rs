//! External-command invocation and environment probing
//!
//! The subsystem behind the five package-manager tools: resolve the
//! executable (search path first, then well-known fallback locations),
//! snapshot the target directory's marker files, run the command under a
//! wall-clock bound with both streams captured, and render one uniform
//! report. Nothing here outlives a single call.

pub mod executor;
pub mod prober;
pub mod report;
pub mod resolver;
pub mod spec;

pub use executor::{execute, ExecutionResult, Outcome};
pub use prober::{probe, query_version, ProjectState};
pub use report::InvocationReport;
pub use resolver::{resolve, ResolvedExecutable};
pub use spec::ManagerSpec;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::Result;

/// Run one manager invocation end to end and render its report.
///
/// Validation failures (empty command, missing directory) come back as
/// report text without spawning anything; resolution, probing and
/// execution failures are folded into the report as well. Only a failed
/// current-directory lookup is an `Err`.
pub async fn run(
    spec: &'static ManagerSpec,
    command: &str,
    directory: Option<&str>,
    timeout: Duration,
) -> Result<String> {
    let command = command.trim();
    if command.is_empty() {
        return Ok("Error: Empty command provided".to_string());
    }

    let cwd = match directory {
        Some(dir) => {
            let path = PathBuf::from(dir);
            if !path.exists() {
                return Ok(format!("Error: Directory '{}' does not exist", dir));
            }
            if path.is_absolute() {
                path
            } else {
                env::current_dir()?.join(path)
            }
        }
        None => env::current_dir()?,
    };

    let mut resolved = resolver::resolve(spec).await;
    let state = prober::probe(&cwd, spec);
    resolved.version = prober::query_version(&resolved.invocation, spec).await;

    let args: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    debug!(
        manager = spec.name,
        invocation = %resolved.invocation,
        ?timeout,
        "running manager command"
    );
    let result = executor::execute(&resolved.invocation, &args, &cwd, timeout).await;

    let report = InvocationReport {
        spec,
        command: command.to_string(),
        state,
        resolved,
        result,
    };
    Ok(report.to_string())
}
