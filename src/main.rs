// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Repohome CLI - a canonical home for every repository you clone

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use repohome::commands::{self, clone::CloneArgs, Options};
use repohome::config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repohome")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress status messages and non-error logs)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "REPOHOME_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Repository root override
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repository into <root>/<provider>/<user>/<repo>
    Clone {
        /// Repository https or ssh URL
        repository: String,

        /// Directory to clone into (inferred from the URL if omitted)
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Print the git command instead of running it
        #[arg(long)]
        print: bool,

        /// Show the README of the new checkout
        #[arg(long)]
        show_readme: bool,

        /// Open the new checkout in the editor afterwards
        #[arg(long)]
        open: bool,
    },

    /// Print the directory a repository URL maps to
    Path {
        /// Repository https or ssh URL
        repository: String,
    },

    /// List cloned repositories
    #[command(alias = "ls")]
    List,

    /// Open a cloned repository in an editor
    Open {
        /// Repository name or path
        repo: String,

        /// Editor command (overrides config, $VISUAL and $EDITOR)
        #[arg(short, long)]
        editor: Option<String>,
    },

    /// Delete a cloned repository from disk
    #[command(alias = "rm")]
    Delete {
        /// Repository name or path
        repo: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Remove the directory instead of moving it to the trash
        #[arg(long)]
        permanent: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (omit to show everything)
        key: Option<String>,

        /// Value to set (omit to get)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // RUST_LOG wins over the verbosity flags
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(config::default_path);
    let mut settings = config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(root) = cli.root {
        settings.root = root;
    }

    let opts = Options {
        config: settings,
        config_path,
        json: cli.json,
        color: !cli.no_color,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Clone { repository, directory, print, show_readme, open } => {
            let args = CloneArgs { repository, directory, print, show_readme, open };
            commands::clone::run(&opts, args).await
        }
        Commands::Path { repository } => {
            commands::path::run(&opts, &repository)
        }
        Commands::List => {
            commands::list::run(&opts).await
        }
        Commands::Open { repo, editor } => {
            commands::open::run(&opts, &repo, editor).await
        }
        Commands::Delete { repo, yes, permanent } => {
            commands::delete::run(&opts, &repo, yes, permanent).await
        }
        Commands::Config { key, value } => {
            commands::config::run(&opts, key, value)
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
