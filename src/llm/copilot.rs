use super::prompt_builder::ChatRequest;
use super::stream::{Decoded, StreamDecoder};
use super::token::SessionToken;
use crate::error::CompletionError;
use reqwest::blocking::Client;
use std::io::BufReader;

/// Streams chat completions from Copilot with one session token.
pub struct CopilotClient {
    http: Client,
    chat_url: String,
    session: SessionToken,
    decoder: StreamDecoder,
}

impl CopilotClient {
    pub fn new(http: Client, chat_url: impl Into<String>, session: SessionToken) -> Self {
        if let Some(expires_at) = session.expires_at {
            log::debug!("Session token expires at {expires_at}");
        }

        CopilotClient {
            http,
            chat_url: chat_url.into(),
            session,
            decoder: StreamDecoder::default(),
        }
    }

    pub fn complete(&self, req: &ChatRequest) -> Result<Decoded, CompletionError> {
        log::info!("Streaming Copilot model {:?}", req.model);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(body) = serde_json::to_string_pretty(req) {
                log::trace!("Chat request body:\n{}", truncate(&body, 6000));
            }
        }

        let resp = self
            .http
            .post(&self.chat_url)
            .bearer_auth(self.session.secret())
            .json(req)
            .send()
            .map_err(CompletionError::Request)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded = self
            .decoder
            .decode(BufReader::new(resp))
            .map_err(CompletionError::Read)?;

        log::debug!(
            "Decoded {} fragment(s) into {} chars, {} line(s) skipped",
            decoded.fragments,
            decoded.message.len(),
            decoded.anomalies
        );

        if decoded.message.is_empty() {
            return Err(CompletionError::Empty {
                anomalies: decoded.anomalies,
            });
        }

        Ok(decoded)
    }
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...\n[truncated {} chars]", &s[..end], s.len() - end)
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo", 2), "h...\n[truncated 5 chars]");
    }
}
