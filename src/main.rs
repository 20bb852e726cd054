mod cli_args;
mod config;
mod error;
mod git;
mod llm;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::time::Duration;

use crate::cli_args::Cli;
use crate::config::Config;
use crate::error::{CollectorError, CompletionError};
use crate::git::Git;
use crate::llm::copilot::CopilotClient;
use crate::llm::{prompt_builder, token};

/// Collect the staged diff and history, ask Copilot, return the cleaned message.
fn draft_commit_message(cfg: &Config, git: &Git, progress: &ProgressBar) -> error::Result<String> {
    progress.set_message("Reading staged changes...");
    let diff = git.staged_diff()?;
    if diff.trim().is_empty() {
        return Err(CollectorError::NothingStaged.into());
    }

    let author = match &cfg.author {
        Some(author) => Some(author.clone()),
        None => git.user_email()?,
    };
    let user_commits = match author.as_deref() {
        Some(author) => git.recent_subjects(cfg.history, Some(author))?,
        None => {
            log::warn!("git user.email is not set; sending no user history");
            vec![]
        }
    };
    let repo_commits = git.recent_subjects(cfg.history, None)?;

    log::debug!(
        "Diff is {} bytes; {} user and {} repository subjects",
        diff.len(),
        user_commits.len(),
        repo_commits.len()
    );

    let request = prompt_builder::chat_request(prompt_builder::conversation(
        &diff,
        &user_commits,
        &repo_commits,
    ));

    let http = llm::http_client().map_err(CompletionError::Request)?;

    progress.set_message("Authenticating with GitHub Copilot...");
    let session = token::exchange_token(&http, &cfg.token_url, &cfg.github_token)?;

    progress.set_message("Generating commit message...");
    let client = CopilotClient::new(http, cfg.chat_url.as_str(), session);
    let decoded = client.complete(&request)?;

    Ok(decoded.message)
}

fn spinner(verbose: u8) -> ProgressBar {
    // Log lines and a spinner fight over stderr.
    if verbose > 0 {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/", "-"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli)?;
    let git = Git::new(env::current_dir().context("failed to read current directory")?);
    log::debug!("Working tree: {}", git.workdir().display());

    let progress = spinner(cli.verbose);
    let drafted = draft_commit_message(&cfg, &git, &progress);
    progress.finish_and_clear();
    let message = drafted?;

    println!("{message}");

    if cli.apply {
        let path = git
            .write_commit_editmsg(&message)
            .map_err(error::Error::from)?;
        log::info!("Wrote commit message to {}", path.display());
    }

    Ok(())
}
