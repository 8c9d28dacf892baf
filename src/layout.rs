// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Mapping of repository URLs onto the `<root>/<provider>/<user>/<repo>` layout

use crate::url::{self, RepoUrl};
use std::path::{Path, PathBuf};

/// The current user's home directory
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `~` or `~/` to the home directory.
///
/// `~user` forms are left untouched.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };

    let rest = match text.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return path.to_path_buf(),
    };

    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Replace the home directory prefix with `~` for display
#[must_use]
pub fn contract_home(path: &Path) -> String {
    if let Some(home) = home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

/// Directory for an already parsed URL under `root`
#[must_use]
pub fn directory_for_parsed(parsed: &RepoUrl, root: &Path) -> PathBuf {
    expand_tilde(root)
        .join(parsed.provider.dir_name())
        .join(&parsed.user)
        .join(&parsed.repo)
}

/// Canonical clone directory for `url` under `root`.
///
/// Returns `None` when the URL cannot be parsed.
#[must_use]
pub fn directory_for(url: &str, root: &Path) -> Option<PathBuf> {
    url::parse(url).map(|parsed| directory_for_parsed(&parsed, root))
}
