// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Delete command - move a cloned repository to the trash, or remove it

use super::{resolve_repo, Options};
use anyhow::{Context, Result};
use dialoguer::Confirm;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::info;

/// Run the delete command
pub async fn run(opts: &Options, query: &str, yes: bool, permanent: bool) -> Result<()> {
    let entry = resolve_repo(opts, query).await?;

    if !yes {
        let prompt = format!("Delete \"{}\"?", entry.display);
        let stdin = io::stdin();
        let confirmed = if stdin.is_terminal() {
            Confirm::new().with_prompt(prompt).default(false).interact()?
        } else {
            confirm(&prompt, &mut stdin.lock(), &mut io::stderr())?
        };
        if !confirmed {
            opts.status("Cancelled");
            return Ok(());
        }
    }

    if permanent {
        tokio::fs::remove_dir_all(&entry.path)
            .await
            .with_context(|| format!("Failed to delete {}", entry.path.display()))?;
        info!("Deleted {}", entry.path.display());
        opts.status(format_args!("Deleted {}", entry.display));
    } else {
        let path = entry.path.clone();
        tokio::task::spawn_blocking(move || trash::delete(&path))
            .await
            .context("Trash task failed")?
            .with_context(|| format!("Failed to move {} to the trash", entry.path.display()))?;
        info!("Trashed {}", entry.path.display());
        opts.status(format_args!("Moved {} to the trash", entry.display));
    }
    Ok(())
}

/// Ask a yes/no question on a plain reader; anything but `y`/`yes` declines
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_accepts_yes() {
        for answer in ["y\n", "YES\n", " yes "] {
            let mut out = Vec::new();
            assert!(confirm("Delete?", &mut Cursor::new(answer), &mut out).unwrap());
            assert_eq!(String::from_utf8(out).unwrap(), "Delete? [y/N] ");
        }
    }

    #[test]
    fn test_confirm_declines_by_default() {
        for answer in ["", "\n", "n\n", "nope\n"] {
            let mut out = Vec::new();
            assert!(!confirm("Delete?", &mut Cursor::new(answer), &mut out).unwrap());
        }
    }
}
