use serde::Deserialize;
use std::io::{self, BufRead};

/// Marker in front of every payload line of an event stream.
pub const DATA_PREFIX: &str = "data:";

/// Payload that closes an OpenAI-style event stream.
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: Option<StreamDelta>,
}

#[derive(Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// Result of decoding a whole stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Concatenated fragments with whitespace and fencing removed.
    pub message: String,
    /// Number of delta fragments that carried text.
    pub fragments: usize,
    /// Data lines skipped because they were not a usable chunk.
    pub anomalies: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Skip,
    Done,
    Fragment(String),
    Anomaly,
}

/// Reassembles the text of a streamed chat completion.
#[derive(Debug, Clone)]
pub struct StreamDecoder {
    sentinel: String,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::with_sentinel(DONE_SENTINEL)
    }
}

impl StreamDecoder {
    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// Read the stream line-by-line until it ends or the sentinel arrives.
    ///
    /// Malformed chunks are counted and skipped; only I/O errors abort.
    pub fn decode<R: BufRead>(&self, reader: R) -> io::Result<Decoded> {
        let mut raw = String::new();
        let mut fragments = 0;
        let mut anomalies = 0;

        for line in reader.lines() {
            let line = line?;
            log::trace!("stream line: {line}");

            match self.parse_line(&line) {
                Line::Skip => {}
                Line::Done => break,
                Line::Fragment(chunk) => {
                    raw.push_str(&chunk);
                    fragments += 1;
                }
                Line::Anomaly => {
                    log::debug!("skipping unusable stream line: {line}");
                    anomalies += 1;
                }
            }
        }

        if anomalies > 0 {
            log::warn!("skipped {anomalies} unusable stream line(s)");
        }

        Ok(Decoded {
            message: strip_fencing(&raw),
            fragments,
            anomalies,
        })
    }

    fn parse_line(&self, line: &str) -> Line {
        let line = line.trim();
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            // Blank lines, comments and event/id/retry fields carry no text.
            return Line::Skip;
        };

        let data = data.trim();
        if data == self.sentinel {
            return Line::Done;
        }

        let Ok(chunk) = serde_json::from_str::<StreamChunk>(data) else {
            return Line::Anomaly;
        };

        match chunk.choices.into_iter().next().and_then(|c| c.delta) {
            None => Line::Anomaly,
            Some(StreamDelta {
                content: Some(content),
            }) if !content.is_empty() => Line::Fragment(content),
            Some(_) => Line::Skip,
        }
    }
}

/// Trim whitespace and one run of backticks from both ends.
///
/// When the text opened with a code fence, a fence info string such as
/// `text` on the first line goes with it.
pub fn strip_fencing(raw: &str) -> String {
    let trimmed = raw.trim();
    let unfenced = trimmed.trim_matches('`');

    let body = if trimmed.starts_with("```") {
        drop_info_string(unfenced)
    } else {
        unfenced
    };

    body.trim().to_string()
}

fn drop_info_string(s: &str) -> &str {
    match s.split_once('\n') {
        Some((first, rest)) if is_info_string(first) => rest,
        _ => s,
    }
}

fn is_info_string(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}
