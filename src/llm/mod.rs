pub mod copilot;
pub mod prompt_builder;
mod prompts;
pub mod stream;
pub mod token;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::time::Duration;

pub const DEFAULT_TOKEN_URL: &str = "https://api.github.com/copilot_internal/v2/token";
pub const DEFAULT_CHAT_URL: &str = "https://api.githubcopilot.com/chat/completions";

pub const MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 4096;
pub const TEMPERATURE: f64 = 0.2;
pub const TOP_P: f64 = 1.0;
pub const STREAM: bool = true;

const EDITOR_VERSION: &str = "vscode/1.92.2";
const EDITOR_PLUGIN_VERSION: &str = "copilot-chat/0.18.2";
const CLIENT_USER_AGENT: &str = "GitHubCopilotChat/0.18.2";

const HTTP_TIMEOUT: Duration = Duration::from_secs(90);

/// Client identification headers sent with every Copilot request.
pub fn client_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("editor-version"),
        HeaderValue::from_static(EDITOR_VERSION),
    );
    headers.insert(
        HeaderName::from_static("editor-plugin-version"),
        HeaderValue::from_static(EDITOR_PLUGIN_VERSION),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers
}

/// Blocking HTTP client shared by the token exchange and the completion call.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .default_headers(client_headers())
        .build()
}
