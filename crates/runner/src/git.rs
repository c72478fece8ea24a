#![forbid(unsafe_code)]

use serde::Serialize;
use std::path::Path;
use std::process::Command;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ChangedFile {
    pub(crate) path: String,
    pub(crate) status: String,
}

/// Working-tree changes as reported by `git status --porcelain`. Any git
/// failure (not a repository, git missing) yields an empty list.
pub(crate) fn changed_files(worktree: &Path) -> Vec<ChangedFile> {
    let output = match Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(worktree)
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(error = %err, "failed to run git status");
            return Vec::new();
        }
    };
    if !output.status.success() {
        tracing::debug!(code = ?output.status.code(), "git status failed; reporting no changes");
    }
    parse_porcelain(&String::from_utf8_lossy(&output.stdout))
}

pub(crate) fn parse_porcelain(stdout: &str) -> Vec<ChangedFile> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<ChangedFile> {
    let code = line.get(..2).unwrap_or(line);
    let path = line.get(3..).unwrap_or("").trim();
    if path.is_empty() {
        return None;
    }
    let trimmed = code.trim();
    let status = if trimmed.is_empty() { code } else { trimmed };
    Some(ChangedFile {
        path: path.to_string(),
        status: status.to_string(),
    })
}
