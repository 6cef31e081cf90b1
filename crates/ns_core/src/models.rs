use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Failure of a single chat-completion call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("rate limited by provider")]
    RateLimited,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ChatError::RateLimited)
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        if e.status().map(|s| s.as_u16()) == Some(429) {
            ChatError::RateLimited
        } else {
            ChatError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send one user prompt and return the raw text of the first choice
    async fn complete(&self, prompt: &str) -> std::result::Result<String, ChatError>;
}
