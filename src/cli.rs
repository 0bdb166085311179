// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands:
// - github: flatten a GitHub repository into one text blob
// - local:  flatten files/folders on disk the same way
// - check:  only ask whether the token can read a repository
//
// Secrets and endpoints can come from the environment instead of flags
// (GITHUB_TOKEN, EXTRACTIFY_API_URL), which keeps tokens out of shell history.
// =============================================================================

use crate::config::DEFAULT_API_URL;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "extractify",
    version,
    about = "Flatten a GitHub repository or a local folder into one text blob for AI assistants",
    long_about = "extractify fetches up to 50 files from a GitHub repository (or a local folder) and \
                  prints them as one block of text, each file headed by its name and path. \
                  Paste the result straight into your AI assistant of choice."
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

// GitHub connection settings shared by `github` and `check`
#[derive(Args, Debug, Clone)]
pub struct GithubAuth {
    /// Personal access token used as the bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL (change it for GitHub Enterprise)
    #[arg(long, env = "EXTRACTIFY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract files from a GitHub repository
    ///
    /// Example: extractify github https://github.com/rust-lang/log --line-numbers
    Github {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Prefix every line of code with its line number
        #[arg(short = 'n', long)]
        line_numbers: bool,

        /// Branch to read instead of the repository's default branch
        #[arg(long)]
        branch: Option<String>,

        /// How many files to download at once (1 = one after another)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=16))]
        concurrency: u16,

        /// Print {"code": ...} or {"error": ..., "status": ...} as JSON
        #[arg(long)]
        json: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        auth: GithubAuth,
    },

    /// Extract files from local folders and files
    ///
    /// Example: extractify local ./src ./Cargo.toml
    Local {
        /// Files or folders to include, in this order
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Prefix every line of code with its line number
        #[arg(short = 'n', long)]
        line_numbers: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether the token can read a repository
    ///
    /// Example: extractify check https://github.com/user/private-repo
    Check {
        /// GitHub repository URL
        repo_url: String,

        #[command(flatten)]
        auth: GithubAuth,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It pastes the fields of another Args struct into this subcommand
//    - `github` and `check` both get --token and --api-url from GithubAuth
//
// 2. What is `env = "GITHUB_TOKEN"`?
//    - If the flag is missing, clap reads the environment variable instead
//    - hide_env_values keeps the token out of --help output
//
// 3. Why ArgAction::Count for -v?
//    - Each repetition adds one, so -vv gives verbose = 2
// -----------------------------------------------------------------------------
