//! Deterministic report assembly for manager invocations

use std::fmt;

use super::executor::{ExecutionResult, Outcome};
use super::prober::ProjectState;
use super::resolver::ResolvedExecutable;
use super::spec::ManagerSpec;

/// Everything known about one manager invocation. Rendering via
/// `Display` is pure formatting with a field order that is identical
/// across all manager families, so reports stay diffable between tools:
/// command line, directory, marker lines, version line (only when
/// probed), outcome, then non-empty output sections.
#[derive(Debug)]
pub struct InvocationReport {
    pub spec: &'static ManagerSpec,
    pub command: String,
    pub state: ProjectState,
    pub resolved: ResolvedExecutable,
    pub result: ExecutionResult,
}

impl fmt::Display for InvocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Command: {} {}", self.spec.name, self.command)?;
        writeln!(f, "Directory: {}", self.state.directory.display())?;

        for marker in &self.state.markers {
            writeln!(f, "{} present: {}", label(marker.file), marker.present)?;
        }

        if let Some(version) = &self.resolved.version {
            writeln!(f, "{} version: {}", self.spec.display_name, version)?;
        }

        match &self.result.outcome {
            Outcome::Completed { exit_code } => {
                write!(f, "Exit code: {}", exit_code)?;
            }
            Outcome::TimedOut { limit } => {
                write!(
                    f,
                    "Error: Command timed out after {} seconds",
                    limit.as_secs()
                )?;
            }
            Outcome::NotFound => {
                write!(
                    f,
                    "Error: '{}' command not found. {}",
                    self.spec.executable, self.spec.install_hint
                )?;
            }
        }

        let stdout = self.result.stdout.trim();
        if !stdout.is_empty() {
            write!(f, "\n\nSTDOUT:\n{}", stdout)?;
        }

        let stderr = self.result.stderr.trim();
        if !stderr.is_empty() {
            write!(f, "\n\nSTDERR:\n{}", stderr)?;
        }

        Ok(())
    }
}

/// Marker label: the filename with its first letter upcased, so
/// "package.json" reads as "Package.json present: true".
fn label(file: &str) -> String {
    let mut chars = file.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::prober::Marker;
    use crate::invoke::spec;
    use std::time::Duration;

    fn state(markers: Vec<Marker>) -> ProjectState {
        ProjectState {
            directory: "/work/app".into(),
            markers,
        }
    }

    fn npm_markers(manifest: bool) -> Vec<Marker> {
        vec![
            Marker { file: "package.json", present: manifest },
            Marker { file: "package-lock.json", present: false },
            Marker { file: "node_modules", present: false },
        ]
    }

    #[test]
    fn test_completed_report_layout() {
        let report = InvocationReport {
            spec: &spec::NPM,
            command: "install".to_string(),
            state: state(npm_markers(true)),
            resolved: ResolvedExecutable {
                invocation: "npm".to_string(),
                version: Some("10.2.3".to_string()),
            },
            result: ExecutionResult {
                stdout: "added 12 packages\n".to_string(),
                stderr: String::new(),
                outcome: Outcome::Completed { exit_code: 0 },
            },
        };

        assert_eq!(
            report.to_string(),
            "Command: npm install\n\
             Directory: /work/app\n\
             Package.json present: true\n\
             Package-lock.json present: false\n\
             Node_modules present: false\n\
             npm version: 10.2.3\n\
             Exit code: 0\n\
             \n\
             STDOUT:\n\
             added 12 packages"
        );
    }

    #[test]
    fn test_timed_out_report_has_no_exit_code() {
        let report = InvocationReport {
            spec: &spec::NPM,
            command: "run dev".to_string(),
            state: state(npm_markers(true)),
            resolved: ResolvedExecutable {
                invocation: "npm".to_string(),
                version: None,
            },
            result: ExecutionResult {
                stdout: "starting dev server\n".to_string(),
                stderr: String::new(),
                outcome: Outcome::TimedOut { limit: Duration::from_secs(60) },
            },
        };

        let text = report.to_string();
        assert!(text.contains("Error: Command timed out after 60 seconds"));
        assert!(!text.contains("Exit code:"));
        assert!(!text.contains("version:"));
        // partial output survives the timeout
        assert!(text.contains("STDOUT:\nstarting dev server"));
    }

    #[test]
    fn test_not_found_report_carries_install_hint() {
        let report = InvocationReport {
            spec: &spec::YARN,
            command: "install".to_string(),
            state: state(vec![]),
            resolved: ResolvedExecutable {
                invocation: "yarn".to_string(),
                version: None,
            },
            result: ExecutionResult {
                stdout: String::new(),
                stderr: String::new(),
                outcome: Outcome::NotFound,
            },
        };

        let text = report.to_string();
        assert!(text.contains(
            "Error: 'yarn' command not found. Is Yarn installed? Install with: npm install -g yarn"
        ));
        assert!(!text.contains("STDOUT:"));
        assert!(!text.contains("STDERR:"));
    }

    #[test]
    fn test_empty_streams_render_no_sections() {
        let report = InvocationReport {
            spec: &spec::UV,
            command: "sync".to_string(),
            state: state(vec![]),
            resolved: ResolvedExecutable {
                invocation: "uv".to_string(),
                version: None,
            },
            result: ExecutionResult {
                stdout: "  \n".to_string(),
                stderr: String::new(),
                outcome: Outcome::Completed { exit_code: 1 },
            },
        };

        let text = report.to_string();
        assert!(text.ends_with("Exit code: 1"));
    }

    #[test]
    fn test_stderr_section_follows_stdout() {
        let report = InvocationReport {
            spec: &spec::BUN,
            command: "test".to_string(),
            state: state(vec![]),
            resolved: ResolvedExecutable {
                invocation: "bun".to_string(),
                version: None,
            },
            result: ExecutionResult {
                stdout: "1 pass\n".to_string(),
                stderr: "warn: slow test\n".to_string(),
                outcome: Outcome::Completed { exit_code: 0 },
            },
        };

        let text = report.to_string();
        let stdout_at = text.find("STDOUT:").unwrap();
        let stderr_at = text.find("STDERR:").unwrap();
        assert!(stdout_at < stderr_at);
    }

    #[test]
    fn test_label_upcases_first_letter_only() {
        assert_eq!(label("package.json"), "Package.json");
        assert_eq!(label("node_modules"), "Node_modules");
        assert_eq!(label(".venv"), ".venv");
    }
}
