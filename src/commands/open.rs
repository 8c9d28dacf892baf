// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Open command - launch an editor on a cloned repository

use super::{resolve_repo, Options};
use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Run the open command
pub async fn run(opts: &Options, query: &str, editor: Option<String>) -> Result<()> {
    let entry = resolve_repo(opts, query).await?;
    let editor = editor_for(opts, editor)?;
    launch(&editor, &entry.path).await
}

/// Pick the editor: explicit override, then config, `$VISUAL`, `$EDITOR`
pub fn editor_for(opts: &Options, editor: Option<String>) -> Result<String> {
    editor
        .filter(|e| !e.trim().is_empty())
        .or_else(|| opts.config.editor_command())
        .ok_or_else(|| anyhow!("No editor configured (set `editor`, $VISUAL or $EDITOR)"))
}

/// Run `editor` (which may carry its own arguments) on `path` and wait
pub async fn launch(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow!("Editor command is empty"))?;

    debug!("> {} {}", editor, path.display());

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await
        .with_context(|| format!("Failed to launch {}", program))?;

    if !status.success() {
        bail!("{} exited with {}", program, status);
    }
    Ok(())
}
