use anyhow::{Context, Result};
use ptbench::report::RunReport;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A run report stamped with the code revision that produced it.
#[derive(Serialize)]
pub struct Envelope<'a> {
    pub code_rev: String,
    pub version: &'static str,
    pub report: &'a RunReport,
}

impl<'a> Envelope<'a> {
    pub fn new(report: &'a RunReport) -> Self {
        Self {
            code_rev: current_git_rev(),
            version: ptbench::VERSION,
            report,
        }
    }
}

/// Write the JSON envelope for `report` to `path`, creating parent directories.
pub fn write_report<P: AsRef<Path>>(path: P, report: &RunReport) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report dir {}", parent.display()))?;
        }
    }
    let doc = serde_json::to_vec_pretty(&Envelope::new(report))?;
    fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
    Ok(path.to_path_buf())
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
