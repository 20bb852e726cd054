use crate::error::AuthError;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::fmt;

#[derive(Deserialize)]
struct TokenResponse {
    token: Option<String>,
    expires_at: Option<i64>,
}

/// Short-lived bearer token for the chat endpoint.
pub struct SessionToken {
    token: String,
    pub expires_at: Option<i64>,
}

impl SessionToken {
    pub fn secret(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Trade a GitHub token for a Copilot session token.
pub fn exchange_token(http: &Client, url: &str, github_token: &str) -> Result<SessionToken, AuthError> {
    log::info!("Requesting Copilot session token from {url}");

    let resp = http
        .get(url)
        .header(AUTHORIZATION, format!("token {github_token}"))
        .send()
        .map_err(AuthError::Request)?;

    let status = resp.status();
    let body = resp.text().map_err(AuthError::Request)?;

    if !status.is_success() {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    parse_token_response(&body)
}

fn parse_token_response(body: &str) -> Result<SessionToken, AuthError> {
    let parsed: TokenResponse = serde_json::from_str(body).map_err(AuthError::Malformed)?;
    let token = parsed
        .token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    Ok(SessionToken {
        token,
        expires_at: parsed.expires_at,
    })
}
