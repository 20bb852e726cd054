use crate::Cli;
use crate::llm::{DEFAULT_CHAT_URL, DEFAULT_TOKEN_URL};
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_HISTORY: usize = 10;

/// Final resolved configuration for aicommit.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub history: usize,
    /// Author filter for the user history; `None` means ask git.
    pub author: Option<String>,
    pub token_url: String,
    pub chat_url: String,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--github-token` also reads `GITHUB_TOKEN`)
    ///   2. Env vars `AICOMMIT_HISTORY`, `AICOMMIT_TOKEN_URL`, `AICOMMIT_CHAT_URL`
    ///   3. TOML `~/.config/aicommit.toml`
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Result<Self> {
        let file_cfg = load_file_config().unwrap_or_default();
        Self::resolve(cli, |key| env::var(key).ok(), file_cfg)
    }

    fn resolve(
        cli: &Cli,
        env_var: impl Fn(&str) -> Option<String>,
        file_cfg: FileConfig,
    ) -> Result<Self> {
        let history_env = env_var("AICOMMIT_HISTORY")
            .map(|v| {
                v.trim()
                    .parse::<usize>()
                    .with_context(|| format!("AICOMMIT_HISTORY must be a number, got {v:?}"))
            })
            .transpose()?;

        let history = cli
            .history
            .or(history_env)
            .or(file_cfg.history)
            .unwrap_or(DEFAULT_HISTORY);

        let github_token = cli
            .github_token
            .clone()
            .or(file_cfg.github_token)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("a GitHub token is required: pass --github-token or set GITHUB_TOKEN")
            })?;

        let author = cli.author.clone().or(file_cfg.author);

        let token_url = env_var("AICOMMIT_TOKEN_URL")
            .or(file_cfg.token_url)
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

        let chat_url = env_var("AICOMMIT_CHAT_URL")
            .or(file_cfg.chat_url)
            .unwrap_or_else(|| DEFAULT_CHAT_URL.to_string());

        Ok(Config {
            github_token,
            history,
            author,
            token_url,
            chat_url,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    github_token: Option<String>,
    history: Option<usize>,
    author: Option<String>,
    token_url: Option<String>,
    chat_url: Option<String>,
}

/// Return `~/.config/aicommit.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("aicommit.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Ignoring unreadable config {}: {e}", path.display());
            return None;
        }
    };

    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}
