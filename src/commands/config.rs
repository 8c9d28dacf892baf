// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show, get or set configuration values

use super::Options;
use crate::config;
use anyhow::{Context, Result};
use tracing::info;

/// Run the config command
pub fn run(opts: &Options, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&opts.config)?);
            } else {
                println!("# {}", opts.config_path.display());
                print!("{}", toml::to_string_pretty(&opts.config)?);
            }
        }
        (Some(key), None) => {
            println!("{}", config::get_value(&opts.config, &key)?);
        }
        (Some(key), Some(value)) => {
            config::set_value(&opts.config_path, &key, &value).with_context(|| {
                format!("Failed to update {}", opts.config_path.display())
            })?;
            info!("Setting {} = {}", key, value);
            opts.status(format_args!("Set {} in {}", key, opts.config_path.display()));
        }
    }
    Ok(())
}
