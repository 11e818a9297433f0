//! Command-line interface.

pub mod completions;
pub mod list;
pub mod output;
pub mod push;
pub mod rm;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pigeon - deliver .env secrets to GitHub Actions, sealed end-to-end.
#[derive(Parser)]
#[command(
    name = "pigeon",
    about = "Deliver .env secrets to GitHub Actions, sealed end-to-end",
    version,
    after_help = "Seal it. Send it. 🕊"
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(
        long,
        global = true,
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a .env file and upsert each entry as a repository secret
    Push {
        /// Repository owner or organization
        owner: String,
        /// Repository name
        repo: String,
        /// Path to the .env source file
        #[arg(default_value = ".env")]
        path: PathBuf,
        /// Parse and validate only; nothing leaves the machine
        #[arg(long)]
        dry_run: bool,
        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the secrets a repository has (names only, never values)
    List {
        /// Repository owner or organization
        owner: String,
        /// Repository name
        repo: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a repository secret
    Rm {
        /// Repository owner or organization
        owner: String,
        /// Repository name
        repo: String,
        /// Secret name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub async fn execute(command: Command, api_url: &str) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Push {
            owner,
            repo,
            path,
            dry_run,
            json,
        } => push::execute(api_url, &owner, &repo, &path, dry_run, json).await,
        List { owner, repo, json } => list::execute(api_url, &owner, &repo, json).await,
        Rm {
            owner,
            repo,
            name,
            yes,
        } => rm::execute(api_url, &owner, &repo, &name, yes).await,
        Completions { shell } => completions::execute(shell),
    }
}
