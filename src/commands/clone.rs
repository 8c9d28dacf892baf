// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Clone command - clone a repository into the canonical layout

use super::{open, Options};
use crate::clone::{CloneError, CloneOutcome, CloneRequest};
use crate::layout::{contract_home, directory_for, expand_tilde};
use anyhow::{anyhow, Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for the clone command
#[derive(Debug, Clone)]
pub struct CloneArgs {
    /// Repository URL
    pub repository: String,
    /// Explicit target directory
    pub directory: Option<PathBuf>,
    /// Print the git command instead of running it
    pub print: bool,
    /// Print the README of the fresh checkout
    pub show_readme: bool,
    /// Open the fresh checkout in the editor
    pub open: bool,
}

/// Run the clone command
pub async fn run(opts: &Options, args: CloneArgs) -> Result<()> {
    let directory = match args.directory {
        Some(dir) => expand_tilde(&dir),
        None => directory_for(&args.repository, &opts.config.root)
            .ok_or_else(|| anyhow!("Could not infer a directory for {}", args.repository.trim()))?,
    };

    let request = CloneRequest::new(args.repository, directory);
    request.validate()?;

    if args.print {
        println!("{}", request.command_line());
        return Ok(());
    }

    let editor = if args.open {
        Some(open::editor_for(opts, None)?)
    } else {
        None
    };

    info!("Cloning {} into {}", request.repository.trim(), request.directory.display());

    let outcome = match request.run().await {
        Ok(outcome) => outcome,
        Err(CloneError::Failed { message, stderr }) => {
            debug!("git stderr:\n{}", stderr);
            return Err(anyhow!("Clone failed: {}", message));
        }
        Err(err) => return Err(err.into()),
    };

    report(opts, &outcome, args.show_readme)?;

    if let Some(editor) = editor {
        open::launch(&editor, &outcome.directory).await?;
    }
    Ok(())
}

fn report(opts: &Options, outcome: &CloneOutcome, show_readme: bool) -> Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if show_readme {
        if let Some(readme) = &outcome.readme {
            let content = fs::read_to_string(readme)
                .with_context(|| format!("Failed to read {}", readme.display()))?;
            println!("{content}");
            return Ok(());
        }
    }

    if opts.quiet {
        return Ok(());
    }

    let directory = contract_home(&outcome.directory);
    if opts.color {
        println!("{}", "Repo cloned".green().bold());
        println!("  {} {}", "repository:".bold(), outcome.repository);
        println!("  {} {}", "directory: ".bold(), directory);
    } else {
        println!("Repo cloned");
        println!("  repository: {}", outcome.repository);
        println!("  directory:  {}", directory);
    }
    Ok(())
}
