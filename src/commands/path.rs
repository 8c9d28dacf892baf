// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Path command - print where a repository URL would be cloned

use super::Options;
use crate::layout::directory_for_parsed;
use crate::url;
use anyhow::{anyhow, Result};
use serde_json::json;

/// Run the path command
pub fn run(opts: &Options, repo_url: &str) -> Result<()> {
    let parsed = url::parse(repo_url)
        .ok_or_else(|| anyhow!("Could not infer a directory for {}", repo_url.trim()))?;
    let directory = directory_for_parsed(&parsed, &opts.config.root);

    if opts.json {
        let doc = json!({
            "url": parsed.url,
            "provider": parsed.provider,
            "user": parsed.user,
            "repo": parsed.repo,
            "directory": directory,
            "exists": directory.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", directory.display());
    }

    Ok(())
}
