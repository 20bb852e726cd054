use thiserror::Error;

/// Failures while collecting the diff or history from git.
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {args} exited with status {code:?}: {stderr}")]
    Exit {
        args: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("no staged changes; stage something with `git add` first")]
    NothingStaged,

    #[error("failed to write commit message to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while exchanging the GitHub credential for a session token.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("token endpoint rejected the credential: HTTP {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("token response is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("token response has no `token` field")]
    MissingToken,
}

/// Failures while requesting or reading the streamed completion.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("chat endpoint returned HTTP {status} - {body}")]
    Status { status: u16, body: String },

    #[error("failed to read completion stream: {0}")]
    Read(#[source] std::io::Error),

    #[error("stream carried no commit message ({anomalies} unusable line(s))")]
    Empty { anomalies: usize },
}

/// Any fatal failure of a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("git: {0}")]
    Collector(#[from] CollectorError),

    #[error("authentication: {0}")]
    Auth(#[from] AuthError),

    #[error("completion: {0}")]
    Completion(#[from] CompletionError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
