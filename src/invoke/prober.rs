//! Working-directory snapshots and best-effort version queries

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::spec::ManagerSpec;

/// Bound on the advisory version query.
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Presence of one marker file in the probed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub file: &'static str,
    pub present: bool,
}

/// Snapshot of a working directory at invocation time. Immutable once
/// built; markers keep the spec's declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub directory: PathBuf,
    pub markers: Vec<Marker>,
}

/// Check each of the spec's marker files directly under `directory`.
/// No recursion, no symlink handling beyond what the platform does.
pub fn probe(directory: &Path, spec: &ManagerSpec) -> ProjectState {
    let markers = spec
        .markers()
        .into_iter()
        .map(|file| Marker {
            file,
            present: directory.join(file).exists(),
        })
        .collect();

    ProjectState {
        directory: directory.to_path_buf(),
        markers,
    }
}

/// Ask the resolved executable for its version.
///
/// Advisory only: a missing binary, a timeout, a non-zero exit and empty
/// output all collapse to `None` and never abort the invocation.
pub async fn query_version(invocation: &str, spec: &ManagerSpec) -> Option<String> {
    let run = Command::new(invocation)
        .arg(spec.version_arg)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(VERSION_TIMEOUT, run).await {
        Ok(Ok(output)) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if version.is_empty() {
                None
            } else {
                Some(version)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_spec(version_arg: &'static str) -> ManagerSpec {
        ManagerSpec {
            name: "fake",
            display_name: "Fake",
            tool_name: "fake_command",
            summary: "test manager",
            executable: "fakepm",
            fallback_paths: &[],
            version_arg,
            manifest: "fake.toml",
            lock_files: &["fake.lock", "other.lock"],
            cache_dir: "fake_modules",
            install_hint: "Is fakepm installed?",
        }
    }

    #[test]
    fn test_probe_manifest_only() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("fake.toml"), "[project]").unwrap();

        let state = probe(tmp.path(), &fake_spec("--version"));

        assert_eq!(state.directory, tmp.path());
        assert_eq!(
            state.markers,
            vec![
                Marker { file: "fake.toml", present: true },
                Marker { file: "fake.lock", present: false },
                Marker { file: "other.lock", present: false },
                Marker { file: "fake_modules", present: false },
            ]
        );
    }

    #[test]
    fn test_probe_sees_cache_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("fake_modules")).unwrap();

        let state = probe(tmp.path(), &fake_spec("--version"));
        let cache = state.markers.last().unwrap();
        assert_eq!(cache.file, "fake_modules");
        assert!(cache.present);
    }

    #[test]
    fn test_probe_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("fake.lock"), "").unwrap();

        let spec = fake_spec("--version");
        assert_eq!(probe(tmp.path(), &spec), probe(tmp.path(), &spec));
    }

    #[tokio::test]
    async fn test_query_version_trims_stdout() {
        // `echo 9.9.9` stands in for a manager printing its version
        let version = query_version("echo", &fake_spec("9.9.9")).await;
        assert_eq!(version, Some("9.9.9".to_string()));
    }

    #[tokio::test]
    async fn test_query_version_missing_binary_is_none() {
        let version = query_version("toolsmith-no-such-binary", &fake_spec("--version")).await;
        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_query_version_empty_output_is_none() {
        // `sleep 0` exits zero without printing anything
        let version = query_version("sleep", &fake_spec("0")).await;
        assert_eq!(version, None);
    }
}
