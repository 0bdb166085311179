// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only - stdout carries the extracted text)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = refused/denied, 2 = error)
// =============================================================================

mod cli;
mod config;
mod error;
mod extract;
mod github;
mod handler;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, GithubAuth};
use config::ExtractConfig;
use error::ExtractError;
use github::GitHubClient;
use handler::{ExtractRequest, ExtractResponse};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logger::setup_logger(cli.verbose);

    match cli.command {
        Commands::Github {
            repo_url,
            line_numbers,
            branch,
            concurrency,
            json,
            output,
            auth,
        } => {
            let mut request = ExtractRequest::post(&repo_url, auth.token.clone());
            request.include_line_numbers = line_numbers;
            request.branch = branch;
            let config = ExtractConfig::default().with_concurrency(concurrency as usize);
            handle_github(&request, &config, &auth.api_url, json, output.as_deref()).await
        }
        Commands::Local {
            paths,
            line_numbers,
            output,
        } => {
            let config = ExtractConfig::default().with_line_numbers(line_numbers);
            handle_local(paths, config, output.as_deref()).await
        }
        Commands::Check { repo_url, auth } => handle_check(&repo_url, &auth).await,
    }
}

// Handles the 'github' subcommand
async fn handle_github(
    request: &ExtractRequest,
    config: &ExtractConfig,
    api_url: &str,
    json: bool,
    output: Option<&Path>,
) -> Result<i32> {
    eprintln!("🔍 Extracting {}", request.repo_url.as_deref().unwrap_or_default());

    let response = handler::handle(request, config, |token| {
        GitHubClient::new(token, api_url).map_err(|e| ExtractError::Config(format!("{:#}", e)))
    })
    .await;

    if json {
        write_output(&serde_json::to_string_pretty(&response)?, output)?;
    }

    match response {
        ExtractResponse::Code { code } => {
            if !json {
                write_output(&code, output)?;
            }
            eprintln!("✅ Done ({} bytes)", code.len());
            Ok(0)
        }
        ExtractResponse::Error { error, status } => {
            eprintln!("❌ {} (status {})", error, status);
            Ok(if status >= 500 { 2 } else { 1 })
        }
    }
}

// Handles the 'local' subcommand
async fn handle_local(
    paths: Vec<PathBuf>,
    config: ExtractConfig,
    output: Option<&Path>,
) -> Result<i32> {
    eprintln!("📂 Extracting {} local item(s)", paths.len());

    // Reading files is blocking I/O, keep it off the async worker threads
    let combined = tokio::task::spawn_blocking(move || {
        extract::extract_local(&paths, &config, |percent| {
            debug!("Progress: {}%", percent);
        })
    })
    .await
    .context("Local extraction task panicked")??;

    write_output(&combined, output)?;
    eprintln!("✅ Done ({} bytes)", combined.len());
    Ok(0)
}

// Handles the 'check' subcommand
async fn handle_check(repo_url: &str, auth: &GithubAuth) -> Result<i32> {
    let repo = match github::parse_github_url(repo_url) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Ok(1);
        }
    };

    let Some(token) = auth.token.as_deref().filter(|t| !t.trim().is_empty()) else {
        eprintln!("❌ {}", ExtractError::Unauthenticated.user_message());
        return Ok(1);
    };

    let client = GitHubClient::new(token.trim(), &auth.api_url)?;
    if github::check_access(&client, &repo).await? {
        println!("✅ {} is accessible", repo);
        Ok(0)
    } else {
        println!("🔒 {} is not accessible with this token", repo);
        Ok(1)
    }
}

// Sends the result to a file, or to stdout when no file was given
fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
