// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Repository scanning
//!
//! Walks the configured roots looking for `.git` directories. Each root is
//! walked on the blocking pool so several roots are scanned at once.

use crate::layout::{contract_home, expand_tilde};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Marker directory that identifies a repository
const GIT_DIR: &str = ".git";

/// Errors raised while scanning
#[derive(Debug, Error)]
pub enum ScanError {
    /// An ignore pattern is not a valid glob
    #[error("Invalid ignore pattern: {0}")]
    InvalidIgnore(#[from] globset::Error),

    /// A scanning task panicked or was cancelled
    #[error("Scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directories to walk, `~` allowed
    pub roots: Vec<PathBuf>,
    /// Glob patterns to skip
    pub ignores: Vec<String>,
    /// Deepest level (below a root) at which a `.git` directory counts
    pub max_depth: usize,
    /// Follow symlinked directories
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            ignores: Vec::new(),
            max_depth: 5,
            follow_symlinks: false,
        }
    }
}

/// A repository found on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoEntry {
    /// Absolute path of the working tree
    pub path: PathBuf,
    /// Path with the home directory shown as `~`
    pub display: String,
    /// Final path component
    pub name: String,
    /// Display form of the containing directory
    pub parent: String,
}

impl RepoEntry {
    /// Build an entry for a working tree path
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = path.parent().map(contract_home).unwrap_or_default();
        Self {
            display: contract_home(&path),
            name,
            parent,
            path,
        }
    }
}

/// Compile ignore patterns into a single matcher
pub fn build_ignores(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Scan every root concurrently.
///
/// Results keep root order; within a root they are sorted by path. A path
/// reachable from more than one root is reported once.
pub async fn scan(config: &ScanConfig) -> Result<Vec<RepoEntry>, ScanError> {
    let ignores = Arc::new(build_ignores(&config.ignores)?);

    let handles: Vec<_> = config
        .roots
        .iter()
        .map(|root| {
            let root = expand_tilde(root);
            let ignores = Arc::clone(&ignores);
            let max_depth = config.max_depth;
            let follow = config.follow_symlinks;
            tokio::task::spawn_blocking(move || scan_root(&root, &ignores, max_depth, follow))
        })
        .collect();

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for handle in handles {
        for path in handle.await? {
            if seen.insert(path.clone()) {
                entries.push(RepoEntry::from_path(path));
            }
        }
    }

    debug!("scan found {} repositories", entries.len());
    Ok(entries)
}

/// Walk a single root and return the working trees below it, sorted.
pub fn scan_root(root: &Path, ignores: &GlobSet, max_depth: usize, follow_symlinks: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        warn!("Skipping {}: not a directory", root.display());
        return Vec::new();
    }

    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(follow_symlinks)
        .into_iter()
        .filter_entry(|entry| !is_ignored(root, entry, ignores));

    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(err)) => {
                debug!("walk error: {}", err);
                continue;
            }
        };

        if entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == GIT_DIR {
            if let Some(parent) = entry.path().parent() {
                found.push(parent.to_path_buf());
            }
            walker.skip_current_dir();
        }
    }

    found.sort();
    found
}

fn is_ignored(root: &Path, entry: &DirEntry, ignores: &GlobSet) -> bool {
    if entry.depth() == 0 || ignores.is_empty() {
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let ignored = ignores.is_match(relative) || ignores.is_match(entry.file_name());
    if ignored {
        debug!("ignoring {}", entry.path().display());
    }
    ignored
}
