// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod clone;
/// Shell completion generation
pub mod completions;
pub mod config;
pub mod delete;
pub mod list;
pub mod open;
pub mod path;

use crate::config::Config;
use crate::scanner::{self, RepoEntry, ScanConfig};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct Options {
    /// Effective configuration
    pub config: Config,
    /// Location of the config file
    pub config_path: PathBuf,
    /// Emit JSON instead of text
    pub json: bool,
    /// Colorize text output
    pub color: bool,
    /// Suppress status messages
    pub quiet: bool,
}

impl Options {
    /// Scan configuration derived from the effective config
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            roots: self.config.scan_roots(),
            ignores: self.config.ignores.clone(),
            max_depth: self.config.max_depth,
            ..Default::default()
        }
    }

    /// Print a status line unless running quiet
    pub fn status(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Find a cloned repository by path or name.
///
/// An existing working tree path is taken as is. Otherwise the scan results
/// are matched on display or absolute path, then on name.
pub async fn resolve_repo(opts: &Options, query: &str) -> Result<RepoEntry> {
    let direct = Path::new(query);
    if direct.join(".git").is_dir() {
        let path = direct
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", direct.display()))?;
        return Ok(RepoEntry::from_path(path));
    }

    let entries = scanner::scan(&opts.scan_config())
        .await
        .context("Failed to scan repositories")?;

    if let Some(entry) = entries
        .iter()
        .find(|e| e.display == query || e.path == Path::new(query))
    {
        return Ok(entry.clone());
    }

    let mut matches: Vec<RepoEntry> = entries.into_iter().filter(|e| e.name == query).collect();
    match matches.len() {
        0 => bail!("Repository not found: {}", query),
        1 => Ok(matches.remove(0)),
        _ => {
            let candidates: Vec<_> = matches.iter().map(|e| e.display.as_str()).collect();
            bail!(
                "Ambiguous repository name '{}', candidates:\n  {}",
                query,
                candidates.join("\n  ")
            )
        }
    }
}
