// src/git.rs
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::warn;

use crate::model::FileRecord;

pub fn ensure_git_installed() -> Result<()> {
    let out = Command::new("git").arg("--version").output();
    match out {
        Ok(o) if o.status.success() => Ok(()),
        _ => bail!("git not found or not runnable. Install git and ensure it's in PATH."),
    }
}

pub fn ensure_git_repo(repo: &Path) -> Result<()> {
    let _ = run_git(repo, &["rev-parse", "--is-inside-work-tree"])
        .with_context(|| format!("{:?} does not appear to be a git repo", repo))?;
    Ok(())
}

pub fn run_git(repo: &Path, args: &[&str]) -> Result<Vec<u8>> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .with_context(|| format!("failed to run git -C {:?} {}", repo, args.join(" ")))?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }
    Ok(out.stdout)
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_repo_rel(s: &str) -> String {
    let mut out = s.replace('\\', "/");
    while let Some(rest) = out.strip_prefix("./") {
        out = rest.to_string();
    }
    while let Some(rest) = out.strip_prefix('/') {
        out = rest.to_string();
    }
    out
}

fn count_loc(blob: &[u8]) -> u64 {
    // count lines = count '\n' + 1 if non-empty
    if blob.is_empty() {
        0
    } else {
        (blob.iter().filter(|b| **b == b'\n').count() as u64) + 1
    }
}

fn safe_join_repo_path(repo: &Path, rel_path: &str) -> Result<PathBuf> {
    let rel = rel_path.trim_start_matches("./").replace('\\', "/");
    if rel.contains("..") {
        bail!("refusing to access path with '..': {}", rel_path);
    }
    Ok(repo.join(Path::new(&rel)))
}

pub fn read_worktree_file(repo: &Path, rel_path: &str) -> Result<Vec<u8>> {
    let p = safe_join_repo_path(repo, rel_path)?;
    std::fs::read(&p).with_context(|| format!("failed to read {}", p.display()))
}

pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Regex>> {
    let mut compiled = Vec::new();
    for rx in patterns {
        compiled
            .push(Regex::new(rx).map_err(|e| anyhow::anyhow!("Bad exclude regex '{}': {}", rx, e))?);
    }
    Ok(compiled)
}

/// Per-file metrics for every tracked file: worktree line count, commit
/// count, distinct author count. A file that cannot be read or logged is
/// warned about and skipped; the run continues.
pub fn collect(repo: &Path, exclude: &[Regex]) -> Result<Vec<FileRecord>> {
    ensure_git_installed()?;
    ensure_git_repo(repo)?;

    let raw = run_git(repo, &["ls-files"])?;
    let mut files: Vec<String> = split_lines(&raw)
        .into_iter()
        .map(|p| normalize_repo_rel(&p))
        .filter(|f| !exclude.iter().any(|rx| rx.is_match(f)))
        .collect();
    files.sort();
    files.dedup();

    let mut records = Vec::with_capacity(files.len());
    for f in &files {
        match file_metrics(repo, f) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping {}: {:#}", f, e),
        }
    }
    Ok(records)
}

fn file_metrics(repo: &Path, path: &str) -> Result<FileRecord> {
    let blob = read_worktree_file(repo, path)?;
    let loc = count_loc(&blob);

    let log = run_git(repo, &["log", "--oneline", "--", path])?;
    let changes = split_lines(&log).len() as u64;

    let emails = run_git(repo, &["log", "--format=%ae", "--", path])?;
    let authors = split_lines(&emails)
        .into_iter()
        .collect::<HashSet<_>>()
        .len() as u64;

    Ok(FileRecord {
        path: path.to_string(),
        loc,
        changes,
        authors,
    })
}
