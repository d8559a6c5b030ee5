use crate::error::{BumpError, Result};
use crate::repository::VersionResolver;
use crate::utils::verbose::verbose;
use regex::Regex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "galaxy-bump-";
const STDERR_TAIL_LINES: usize = 5;

/// GalaxyExecutionAgent resolves collection versions by running ansible-galaxy
pub struct GalaxyExecutionAgent {
    galaxy_bin: PathBuf,
    scratch_root: Option<PathBuf>,
}

impl GalaxyExecutionAgent {
    pub fn new<P: AsRef<Path>>(galaxy_bin: P) -> Self {
        Self {
            galaxy_bin: galaxy_bin.as_ref().to_path_buf(),
            scratch_root: None,
        }
    }

    /// Create scratch install directories under `root` instead of the system temp dir.
    pub fn with_scratch_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.scratch_root = Some(root.as_ref().to_path_buf());
        self
    }

    fn create_scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        dir.map_err(|e| {
            BumpError::Resolution(format!("Failed to create scratch directory: {}", e))
        })
    }

    /// Force-install `name` into `install_dir` and capture the verbose output
    fn execute_install(&self, name: &str, install_dir: &Path) -> Result<Output> {
        let args: [&OsStr; 8] = [
            OsStr::new("collection"),
            OsStr::new("install"),
            OsStr::new("-n"),
            OsStr::new("-vv"),
            OsStr::new("--force"),
            OsStr::new("-p"),
            install_dir.as_os_str(),
            OsStr::new(name),
        ];

        verbose!(
            "Executing: {} {}",
            self.galaxy_bin.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        Command::new(&self.galaxy_bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                BumpError::Resolution(format!(
                    "Failed to execute '{}': {}",
                    self.galaxy_bin.display(),
                    e
                ))
            })
    }
}

impl VersionResolver for GalaxyExecutionAgent {
    fn resolve_latest(&self, name: &str) -> Result<String> {
        // Removed when dropped, on every return path below.
        let scratch = self.create_scratch_dir()?;
        let output = self.execute_install(name, scratch.path())?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for block in output_report(name, &stdout, &stderr) {
            verbose!("{}", block);
        }

        match parse_installed_version(&stdout, name) {
            Some(version) => Ok(version),
            None => Err(BumpError::Resolution(format!(
                "No install line for '{}' in ansible-galaxy output (exit code: {}){}",
                name,
                output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                stderr_tail(&stderr)
            ))),
        }
    }
}

/// Extract the version from the `Installing '<name>:<version>' to` line.
pub fn parse_installed_version(output: &str, name: &str) -> Option<String> {
    let pattern = format!("Installing '{}:([^']+)' to", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Captured ansible-galaxy output as verbose blocks; stderr only when non-empty
fn output_report(name: &str, stdout: &str, stderr: &str) -> Vec<String> {
    let mut blocks = vec![format!(
        "ansible-galaxy output for {}:\n{}",
        name,
        stdout.trim_end()
    )];
    if !stderr.trim().is_empty() {
        blocks.push(format!(
            "ansible-galaxy stderr for {}:\n{}",
            name,
            stderr.trim_end()
        ));
    }
    blocks
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!("\n{}", lines[start..].join("\n"))
}
