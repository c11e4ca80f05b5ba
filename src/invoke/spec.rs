//! Static descriptions of the supported package-manager families

/// Static description of one external package-manager family.
///
/// One instance exists per supported manager. Adding a family is a data
/// addition here, not a code addition elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct ManagerSpec {
    /// Canonical name, echoed as the command prefix in reports (e.g. "npm")
    pub name: &'static str,
    /// Name used in version lines and human-facing text (e.g. "Yarn")
    pub display_name: &'static str,
    /// Tool name exposed to callers (e.g. "npm_command")
    pub tool_name: &'static str,
    /// One-line description for the tool listing
    pub summary: &'static str,
    /// Default executable name, trusted to the process search path first
    pub executable: &'static str,
    /// Well-known install locations checked in order when the default
    /// name cannot be launched; a leading `~` expands to the home directory
    pub fallback_paths: &'static [&'static str],
    /// Argument that makes the executable print its version
    pub version_arg: &'static str,
    /// Project manifest filename (e.g. "package.json")
    pub manifest: &'static str,
    /// Lock-file candidates, checked in declared order
    pub lock_files: &'static [&'static str],
    /// Dependency-cache directory name (e.g. "node_modules")
    pub cache_dir: &'static str,
    /// Appended to the not-found report line
    pub install_hint: &'static str,
}

impl ManagerSpec {
    /// Marker filenames in fixed report order: manifest, lock candidates,
    /// cache directory.
    pub fn markers(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2 + self.lock_files.len());
        names.push(self.manifest);
        names.extend_from_slice(self.lock_files);
        names.push(self.cache_dir);
        names
    }
}

pub static UV: ManagerSpec = ManagerSpec {
    name: "uv",
    display_name: "UV",
    tool_name: "uv_command",
    summary: "Run UV commands like sync, add, run, etc.",
    executable: "uv",
    fallback_paths: &["~/.local/bin/uv", "~/.cargo/bin/uv"],
    version_arg: "--version",
    manifest: "pyproject.toml",
    lock_files: &["uv.lock"],
    cache_dir: ".venv",
    install_hint: "Is UV installed?",
};

pub static NPM: ManagerSpec = ManagerSpec {
    name: "npm",
    display_name: "npm",
    tool_name: "npm_command",
    summary: "Run npm commands like install, run, test, etc.",
    executable: "npm",
    fallback_paths: &[],
    version_arg: "--version",
    manifest: "package.json",
    lock_files: &["package-lock.json"],
    cache_dir: "node_modules",
    install_hint: "Is Node.js/npm installed?",
};

pub static NPX: ManagerSpec = ManagerSpec {
    name: "npx",
    display_name: "npx",
    tool_name: "npx_command",
    summary: "Run npx commands to execute packages without installing them globally.",
    executable: "npx",
    fallback_paths: &[],
    version_arg: "--version",
    manifest: "package.json",
    lock_files: &[],
    cache_dir: "node_modules",
    install_hint: "Is Node.js/npm installed?",
};

pub static YARN: ManagerSpec = ManagerSpec {
    name: "yarn",
    display_name: "Yarn",
    tool_name: "yarn_command",
    summary: "Run Yarn commands for package management and script execution.",
    executable: "yarn",
    fallback_paths: &[],
    version_arg: "--version",
    manifest: "package.json",
    lock_files: &["yarn.lock"],
    cache_dir: "node_modules",
    install_hint: "Is Yarn installed? Install with: npm install -g yarn",
};

pub static BUN: ManagerSpec = ManagerSpec {
    name: "bun",
    display_name: "Bun",
    tool_name: "bun_command",
    summary: "Run Bun commands for ultra-fast package management and JavaScript execution.",
    executable: "bun",
    fallback_paths: &["~/.bun/bin/bun", "/usr/local/bin/bun", "/opt/homebrew/bin/bun"],
    version_arg: "--version",
    manifest: "package.json",
    lock_files: &["bun.lockb"],
    cache_dir: "node_modules",
    install_hint: "Is Bun installed? Install from: https://bun.sh",
};

/// All supported manager families.
pub static ALL: [&ManagerSpec; 5] = [&UV, &NPM, &NPX, &YARN, &BUN];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_order_is_manifest_locks_cache() {
        assert_eq!(
            YARN.markers(),
            vec!["package.json", "yarn.lock", "node_modules"]
        );
        assert_eq!(UV.markers(), vec!["pyproject.toml", "uv.lock", ".venv"]);
    }

    #[test]
    fn test_npx_has_no_lock_candidates() {
        assert_eq!(NPX.markers(), vec!["package.json", "node_modules"]);
    }

    #[test]
    fn test_all_specs_have_distinct_tool_names() {
        let mut names: Vec<_> = ALL.iter().map(|s| s.tool_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }
}
