// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! List command - show repositories cloned under the configured roots

use super::Options;
use crate::scanner;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

/// Run the list command
pub async fn run(opts: &Options) -> Result<()> {
    let scan_config = opts.scan_config();
    info!("Scanning {} root(s)", scan_config.roots.len());

    let entries = scanner::scan(&scan_config)
        .await
        .context("Failed to scan repositories")?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No repositories found");
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        let name = format!("{:width$}", entry.name);
        if opts.color {
            println!("{}  {}", name.bold(), entry.parent.dimmed());
        } else {
            println!("{}  {}", name, entry.parent);
        }
    }

    Ok(())
}
