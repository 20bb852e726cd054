use clap::{ArgAction, Parser};

/// CLI options
#[derive(Parser, Debug, Default)]
#[command(
    name = "aicommit",
    version,
    about = "Draft a git commit message for your staged changes with GitHub Copilot"
)]
pub struct Cli {
    /// GitHub token exchanged for a Copilot session token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Number of recent commit subjects to show the model (default 10)
    #[arg(short = 'n', long, value_name = "N")]
    pub history: Option<usize>,

    /// Author whose commits form the user history (default: git user.email)
    #[arg(long, value_name = "EMAIL")]
    pub author: Option<String>,

    /// Also write the message into .git/COMMIT_EDITMSG (no commit is created)
    #[arg(long)]
    pub apply: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
