//! CLI command definitions and handlers

mod collect;
mod history;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitevo::collectors::CollectorKind;
use gitevo::config::UserConfig;
use std::path::PathBuf;

/// gitevo - commit history and diff extraction for evolution analysis
#[derive(Parser, Debug)]
#[command(name = "gitevo")]
#[command(
    version,
    about = "Index a git repository's history once, then query commits and per-commit diffs",
    after_help = "\
Examples:
  gitevo commits                       List every commit, newest first
  gitevo -C ../other range             Oldest and newest commit ids
  gitevo diff <NEW> <OLD>              Files changed between two commits
  gitevo change <BLOB> --format json   Kind and path of one file change
  gitevo collect JCTools/JCTools --kind github   Remote repository metadata"
)]
pub struct Cli {
    /// Path to repository, or a name under the configured repositories folder
    #[arg(long = "repo", short = 'C', global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json
    #[arg(long, short = 'f', global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example user config to ~/.config/gitevo/config.toml
    Init,

    /// List every commit id, newest first
    Commits,

    /// Show the least and most recent commit ids
    Range,

    /// Files changed between two commits
    Diff {
        /// Newer commit id
        new: String,
        /// Older commit id
        old: String,
    },

    /// Kind and resulting path of a file change (blob id after the change)
    Change {
        id: String,
    },

    /// Run a registered collector against a target and print its summary
    Collect {
        /// Repository path/name for git, owner/name for github
        target: String,

        /// Collector to run
        #[arg(long, short = 'k', default_value = "git")]
        kind: CollectorKind,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let json = cli.format == "json";

    match cli.command {
        Commands::Init => {
            let path = UserConfig::init_user_config()?;
            println!("Config written to {}", path.display());
            Ok(())
        }
        Commands::Commits => history::commits(&cli.path, json),
        Commands::Range => history::range(&cli.path, json),
        Commands::Diff { new, old } => history::diff(&cli.path, &new, &old, json),
        Commands::Change { id } => history::change(&cli.path, &id, json),
        Commands::Collect { target, kind } => collect::run(&target, kind),
    }
}
