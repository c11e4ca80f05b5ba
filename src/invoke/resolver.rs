//! Executable resolution with well-known fallback locations

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::spec::ManagerSpec;

/// Bound on the default-name launch probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Concrete invocation for one manager call: the bare executable name
/// when the search path can find it, otherwise an absolute fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    pub invocation: String,
    /// Best-effort version string, filled in by the prober
    pub version: Option<String>,
}

impl ResolvedExecutable {
    fn bare(name: &str) -> Self {
        Self {
            invocation: name.to_string(),
            version: None,
        }
    }
}

/// Checks the resolver relies on, injectable so resolution is testable
/// without spawning real processes.
#[async_trait]
pub trait ResolverProbe: Send + Sync {
    /// Whether `name` can be launched at all; the exit code is irrelevant,
    /// only start-and-exit within the bound counts.
    async fn can_launch(&self, name: &str, version_arg: &str) -> bool;

    /// Whether `path` exists on the filesystem.
    fn path_exists(&self, path: &Path) -> bool;
}

/// Probe backed by real processes and the real filesystem.
pub struct SystemProbe;

#[async_trait]
impl ResolverProbe for SystemProbe {
    async fn can_launch(&self, name: &str, version_arg: &str) -> bool {
        let run = Command::new(name)
            .arg(version_arg)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();
        matches!(tokio::time::timeout(PROBE_TIMEOUT, run).await, Ok(Ok(_)))
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Resolve the invocation for `spec`.
///
/// The default executable name is trusted first; if it cannot be
/// launched, the spec's fallback paths are checked in declared order and
/// the first existing one wins. When nothing is found the default name
/// is returned anyway: absence is surfaced later as the executor's
/// not-found outcome, never as a resolver error.
pub async fn resolve(spec: &ManagerSpec) -> ResolvedExecutable {
    resolve_with(spec, &SystemProbe).await
}

/// Resolve with an injected probe (for testing).
pub async fn resolve_with(spec: &ManagerSpec, probe: &dyn ResolverProbe) -> ResolvedExecutable {
    if probe.can_launch(spec.executable, spec.version_arg).await {
        return ResolvedExecutable::bare(spec.executable);
    }

    for fallback in spec.fallback_paths {
        let path = expand_home(fallback);
        if probe.path_exists(&path) {
            debug!(
                manager = spec.name,
                path = %path.display(),
                "default executable not launchable, using fallback"
            );
            return ResolvedExecutable {
                invocation: path.to_string_lossy().into_owned(),
                version: None,
            };
        }
    }

    ResolvedExecutable::bare(spec.executable)
}

/// Expand a leading `~/` against the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
